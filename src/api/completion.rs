use futures_util::StreamExt;
use tracing::debug;

use crate::api::{BackendError, ChatBackend, ChatMessage};

/// Stream one completion for `transcript` and return the joined response.
///
/// Fragments are handed to `on_token` as they arrive when `emit_tokens` is
/// set; otherwise they are only accumulated. The first error ends the call
/// and is returned as-is, discarding whatever was accumulated.
pub async fn complete<B, F>(
    backend: &B,
    transcript: &[ChatMessage],
    emit_tokens: bool,
    mut on_token: F,
) -> Result<String, BackendError>
where
    B: ChatBackend + ?Sized,
    F: FnMut(&str),
{
    debug!(messages = transcript.len(), emit_tokens, "issuing completion request");

    let mut stream = backend.stream_chat(transcript.to_vec());
    let mut final_text = String::new();
    let mut fragments = 0usize;

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        if emit_tokens {
            on_token(&fragment);
        }
        final_text.push_str(&fragment);
        fragments += 1;
    }

    debug!(fragments, chars = final_text.chars().count(), "completion finished");
    Ok(final_text)
}
