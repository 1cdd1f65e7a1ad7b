use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout for every network call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "MoonData/0.1"
}

/// Build the shared HTTP client with the fixed timeout and user agent
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(get_user_agent())
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Retrieves the raw bytes behind an image URL
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Single-GET fetcher; no retries
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(url, len = bytes.len(), "fetched image");
        Ok(bytes.to_vec())
    }
}
