use crate::api::ChatMessage;

/// Ordered, append-only conversation log.
///
/// Index 0 is always the single system message. It is set at construction
/// and can never be removed or replaced.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(persona: impl Into<String>) -> Self {
        Self { messages: vec![ChatMessage::system(persona)] }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// Drop everything after the first `len` messages. The system message
    /// always survives.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.messages.truncate(len.max(1));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn system(&self) -> &ChatMessage {
        &self.messages[0]
    }

    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;

    #[test]
    fn starts_with_system_message() {
        let t = Transcript::new("persona");
        assert_eq!(t.len(), 1);
        assert_eq!(t.system().role, Role::System);
        assert_eq!(t.system().content, "persona");
    }

    #[test]
    fn preserves_insertion_order() {
        let mut t = Transcript::new("p");
        t.push_user("one");
        t.push_assistant("two");
        let contents: Vec<&str> = t.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["p", "one", "two"]);
    }

    #[test]
    fn pushes_never_add_a_system_message() {
        let mut t = Transcript::new("p");
        t.push_user("u");
        t.push_assistant("a");
        let roles: Vec<Role> = t.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(t.messages().iter().filter(|m| m.role == Role::System).count(), 1);
    }

    #[test]
    fn truncate_never_drops_system_message() {
        let mut t = Transcript::new("p");
        t.push_user("x");
        t.truncate(0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.system().content, "p");
    }
}
