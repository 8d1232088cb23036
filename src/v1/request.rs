use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized inbound request, the subset of the API Gateway proxy event
/// the dispatcher cares about. The method stays a raw string so that
/// unsupported verbs route to the InvalidRequest default instead of
/// failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRequest {
    #[serde(rename = "httpMethod")]
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: impl ToString, path: impl ToString) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            body: None,
        }
    }
    pub fn with_body(mut self, body: impl ToString) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// Normalized outbound response envelope. The headers key is dropped from
/// the serialized form when empty, matching the deployed contract.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl ApiResponse {
    pub fn json(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
        }
    }
    // The 404 and 400 envelopes carry no headers on the wire.
    pub fn json_without_headers(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            headers: HashMap::new(),
        }
    }
}
