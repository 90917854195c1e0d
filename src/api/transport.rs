use super::error::ApiError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

/// Performs one GET round-trip and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpTransport { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<String, ApiError> {
        debug!("GET {}{}", url.origin().ascii_serialization(), url.path());
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
