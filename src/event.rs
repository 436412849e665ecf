//! Wire types for the API Gateway REST proxy integration.
//!
//! The request keeps `queryStringParameters` and
//! `multiValueQueryStringParameters` apart because the greeter lookup treats
//! them as separate sources.

use std::collections::HashMap;

use lambda_http::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    /// Remaining proxy fields, kept so the whole event can be logged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IncomingRequest {
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.http_method.to_ascii_uppercase().as_bytes()).ok()
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(name)
            .map(String::as_str)
    }

    /// First value of a multi-value query parameter.
    pub fn multi_value_query_parameter(&self, name: &str) -> Option<&str> {
        self.multi_value_query_string_parameters
            .as_ref()?
            .get(name)?
            .first()
            .map(String::as_str)
    }

    /// Header lookup, ignoring ASCII case of the header name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_context.as_ref()?.request_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl OutgoingResponse {
    pub const CONTENT_TYPE: &'static str = "application/json";

    pub fn json(status: StatusCode, body: Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), Self::CONTENT_TYPE.to_string());
        Self {
            status_code: status.as_u16(),
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").map(String::as_str)
    }
}
