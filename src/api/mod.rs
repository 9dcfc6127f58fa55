pub mod client;
pub mod completion;
pub mod error;
pub mod models;
pub mod ollama;

use std::pin::Pin;
use std::sync::Arc;

use futures_util::Stream;

pub use completion::complete;
pub use error::BackendError;
pub use models::{ChatMessage, Role};

/// Lazy, finite sequence of response fragments for one request.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, BackendError>> + Send + 'static>>;

/// A streaming chat-completion service.
///
/// Each call issues one fresh request; the returned stream is not
/// restartable. Nothing is sent until the stream is first polled.
pub trait ChatBackend: Send + Sync {
    fn stream_chat(&self, messages: Vec<ChatMessage>) -> TokenStream;
}

impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    fn stream_chat(&self, messages: Vec<ChatMessage>) -> TokenStream {
        (**self).stream_chat(messages)
    }
}
