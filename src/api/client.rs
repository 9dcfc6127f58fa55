use reqwest::Client;

use crate::api::BackendError;

#[derive(Clone)]
pub struct HttpClient {
    pub client: Client,
}

impl HttpClient {
    /// No request timeout is set: a stalled backend stalls the caller.
    pub fn new() -> Result<Self, BackendError> {
        let client = Client::builder()
            .pool_max_idle_per_host(8)
            .user_agent(concat!("hubsystem/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}
