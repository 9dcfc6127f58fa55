use tracing::{debug, warn};

use crate::api::{self, BackendError, ChatBackend, ChatMessage};
use crate::session::{SeedExchange, Transcript};

/// One conversation with one backend: the transcript plus the means to
/// extend it through completions.
pub struct Session<B> {
    backend: B,
    transcript: Transcript,
}

impl<B: ChatBackend> Session<B> {
    /// Build the transcript: system message, then each seed pair in order.
    pub fn initialize(backend: B, persona: &str, seeds: &[SeedExchange]) -> Self {
        let mut transcript = Transcript::new(persona);
        for seed in seeds {
            transcript.push_user(seed.user);
            transcript.push_assistant(seed.assistant);
        }
        Self { backend, transcript }
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.transcript.push_user(text);
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.transcript.push_assistant(text);
    }

    pub fn snapshot(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one exchange: append `input`, stream a completion over the full
    /// transcript, then record the joined reply.
    ///
    /// On failure the user message is rolled back and the transcript is
    /// left as it was before the call. Dropping the future mid-stream
    /// leaves the user message in place.
    pub async fn exchange<F>(
        &mut self,
        input: impl Into<String>,
        emit_tokens: bool,
        on_token: F,
    ) -> Result<String, BackendError>
    where
        F: FnMut(&str),
    {
        let checkpoint = self.transcript.len();
        self.append_user(input);

        let outcome = api::complete(&self.backend, self.snapshot(), emit_tokens, on_token).await;
        match outcome {
            Ok(reply) => {
                self.append_assistant(reply.clone());
                debug!(messages = self.transcript.len(), "exchange recorded");
                Ok(reply)
            }
            Err(err) => {
                warn!(error = %err, "exchange failed; transcript rolled back");
                self.transcript.truncate(checkpoint);
                Err(err)
            }
        }
    }

    /// An exchange whose tokens are never surfaced. The reply is still
    /// recorded and shapes every later request.
    pub async fn silent_exchange(&mut self, input: impl Into<String>) -> Result<String, BackendError> {
        self.exchange(input, false, |_| {}).await
    }
}
