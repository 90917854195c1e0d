use crate::constants::{
    ACTION_PARAM, API_KEY_PARAM, BATCH_ACTION, MAX_BATCH_REQUESTS, REQUEST_ARRAY_PARAM,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;

/// One named remote operation and its string parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiAction {
    method: String,
    params: BTreeMap<String, String>,
}

impl ApiAction {
    fn new(method: &str) -> Self {
        ApiAction {
            method: method.to_string(),
            params: BTreeMap::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Parameters as sent inside a batch, with the action name under `api_action`.
    fn values(&self) -> Value {
        let mut values: Map<String, Value> = self
            .params
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        values.insert(
            ACTION_PARAM.to_string(),
            Value::String(self.method.clone()),
        );
        Value::Object(values)
    }
}

/// Accumulates actions and renders them into batched request URLs.
///
/// Every rendered URL uses the `batch` request shape, including batches holding a
/// single action.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    api_key: String,
    base_url: Url,
    actions: Vec<ApiAction>,
}

impl ApiRequest {
    pub fn new(api_key: &str, base_url: Url) -> Self {
        ApiRequest {
            api_key: api_key.to_string(),
            base_url,
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, method: &str) -> &mut ApiAction {
        self.actions.push(ApiAction::new(method));
        let last = self.actions.len() - 1;
        &mut self.actions[last]
    }

    pub fn actions(&self) -> &[ApiAction] {
        &self.actions
    }

    /// Renders one URL per batch of at most `MAX_BATCH_REQUESTS` actions. A request
    /// without actions renders no URLs, so nothing is sent for it.
    pub fn render(&self) -> Vec<Url> {
        self.actions
            .chunks(MAX_BATCH_REQUESTS)
            .map(|batch| self.render_batch(batch))
            .collect()
    }

    fn render_batch(&self, batch: &[ApiAction]) -> Url {
        let request_array = Value::Array(batch.iter().map(ApiAction::values).collect());

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair(API_KEY_PARAM, &self.api_key)
            .append_pair(ACTION_PARAM, BATCH_ACTION)
            .append_pair(REQUEST_ARRAY_PARAM, &request_array.to_string());
        url
    }
}
