use super::error::{ApiError, ProviderError};
use serde::Deserialize;
use serde_json::Value;

/// Error-shape view of an envelope. `DATA` stays opaque so an envelope carrying
/// errors never fails to decode because of its payload.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "ACTION", default)]
    action: String,
    #[serde(rename = "ERRORARRAY", default)]
    errors: Option<Vec<ProviderError>>,
    #[serde(rename = "DATA", default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBody {
    Batch(Vec<RawEnvelope>),
    Single(RawEnvelope),
}

/// Outcome of one action within a response.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    Data { action: String, data: Value },
    Errors {
        action: String,
        errors: Vec<ProviderError>,
    },
}

impl ActionResult {
    pub fn action(&self) -> &str {
        match self {
            ActionResult::Data { action, .. } | ActionResult::Errors { action, .. } => action,
        }
    }
}

impl From<RawEnvelope> for ActionResult {
    fn from(envelope: RawEnvelope) -> Self {
        match envelope.errors {
            Some(errors) if !errors.is_empty() => ActionResult::Errors {
                action: envelope.action,
                errors,
            },
            _ => ActionResult::Data {
                action: envelope.action,
                data: envelope.data.unwrap_or(Value::Null),
            },
        }
    }
}

/// Decodes a response body into one result per submitted action.
pub fn decode_envelopes(body: &str) -> Result<Vec<ActionResult>, ApiError> {
    let raw: RawBody = serde_json::from_str(body)
        .map_err(|e| ApiError::Decode(format!("malformed response envelope: {e}")))?;

    let envelopes = match raw {
        RawBody::Batch(envelopes) => envelopes,
        RawBody::Single(envelope) => vec![envelope],
    };

    Ok(envelopes.into_iter().map(ActionResult::from).collect())
}
