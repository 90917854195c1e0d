use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// A single `(code, message)` pair reported inside a response envelope.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProviderError {
    #[serde(rename = "ERRORCODE")]
    pub code: i64,
    #[serde(rename = "ERRORMESSAGE", default)]
    pub message: String,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Code: {}] {}", self.code, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("{}", join_provider_errors(.0))]
    Provider(Vec<ProviderError>),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Unexpected number of results: expected {expected}, got {actual}")]
    UnexpectedResults { expected: usize, actual: usize },
}

fn join_provider_errors(errors: &[ProviderError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("\n")
}

// Request URLs carry the api key in their query string.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.without_url().to_string())
    }
}
