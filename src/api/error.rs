/// The one failure kind of the inference boundary. Transport errors,
/// bad status codes, malformed lines and model-side errors all land here.
#[derive(Debug, thiserror::Error)]
#[error("backend call failed: {message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("network error: {}", err))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed response line: {}", err))
    }
}
