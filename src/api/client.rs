use super::error::{ApiError, ProviderError};
use super::request::ApiRequest;
use super::response::{decode_envelopes, ActionResult};
use super::transport::Transport;
use crate::constants::API_URL;
use log::debug;
use serde_json::Value;
use url::Url;

/// Payloads and provider errors collected across every request of one fetch.
#[derive(Debug, Default)]
pub struct Responses {
    pub datas: Vec<Value>,
    pub errors: Vec<ProviderError>,
}

impl Responses {
    /// Returns the payloads, or every provider error as a single `ApiError::Provider`.
    pub fn into_datas(self) -> Result<Vec<Value>, ApiError> {
        if !self.errors.is_empty() {
            return Err(ApiError::Provider(self.errors));
        }
        Ok(self.datas)
    }

    fn push(&mut self, result: ActionResult) {
        match result {
            ActionResult::Data { data, .. } => self.datas.push(data),
            ActionResult::Errors { action, errors } => {
                debug!("action '{}' reported {} error(s)", action, errors.len());
                self.errors.extend(errors);
            }
        }
    }
}

pub struct ApiClient<T: Transport> {
    api_key: String,
    base_url: Url,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(api_key: &str, transport: T) -> Result<Self, ApiError> {
        let base_url = Url::parse(API_URL)
            .map_err(|e| ApiError::Transport(format!("invalid API url {API_URL}: {e}")))?;
        Ok(Self::with_base_url(api_key, base_url, transport))
    }

    pub fn with_base_url(api_key: &str, base_url: Url, transport: T) -> Self {
        ApiClient {
            api_key: api_key.to_string(),
            base_url,
            transport,
        }
    }

    /// Starts an empty request bound to this client's credential and endpoint.
    pub fn request(&self) -> ApiRequest {
        ApiRequest::new(&self.api_key, self.base_url.clone())
    }

    /// Sends every batch of `request` in order. The first transport or envelope
    /// decoding failure aborts the fetch; provider errors are collected instead.
    pub async fn get_json(&self, request: &ApiRequest) -> Result<Responses, ApiError> {
        let mut responses = Responses::default();
        let urls = request.render();

        for (i, url) in urls.iter().enumerate() {
            debug!("sending batch {}/{}", i + 1, urls.len());
            let body = self.transport.get(url).await?;
            for result in decode_envelopes(&body)? {
                responses.push(result);
            }
        }

        Ok(responses)
    }
}
