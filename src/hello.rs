use lambda_http::http::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::BodyError;
use crate::event::{IncomingRequest, OutgoingResponse};

const GREETER: &str = "greeter";

/// Where a greeting's greeter was looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreeterSource {
    QueryStringParameters,
    MultiValueQueryStringParameters,
    Headers,
    Body,
}

impl GreeterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryStringParameters => "queryStringParameters",
            Self::MultiValueQueryStringParameters => "multiValueQueryStringParameters",
            Self::Headers => "headers",
            Self::Body => "body",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Greeting {
    pub message: String,
    pub http_method: &'static str,
    pub source: GreeterSource,
}

impl Greeting {
    fn new(greeter: Option<&str>, http_method: &'static str, source: GreeterSource) -> Self {
        let message = match greeter {
            Some(greeter) => format!("Hello, {greeter} !"),
            None if source == GreeterSource::Headers => "Hello, Guest!".to_string(),
            None => "Hello, None !".to_string(),
        };
        Self {
            message,
            http_method,
            source,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message,
            "httpMethod": self.http_method,
            "source": self.source.as_str(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `GET /hello`: query string, then multi-value query string, then headers.
pub fn get_hello(request: &IncomingRequest) -> OutgoingResponse {
    let mut source = GreeterSource::QueryStringParameters;
    let mut greeter = non_empty(request.query_parameter(GREETER));

    if greeter.is_none() {
        info!("Greeter not found in query string parameter! checking multi value query string parameters");
        source = GreeterSource::MultiValueQueryStringParameters;
        greeter = non_empty(request.multi_value_query_parameter(GREETER));
    }

    if greeter.is_none() {
        info!("Greeter not found in multi value query string parameters! checking headers");
        source = GreeterSource::Headers;
        greeter = non_empty(request.header(GREETER));
    }

    let greeting = Greeting::new(greeter, "GET", source);
    let status = if greeter.is_some() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    OutgoingResponse::json(status, greeting.to_json())
}

/// Decodes the request body as JSON.
pub fn json_body(request: &IncomingRequest) -> Result<Value, BodyError> {
    let body = request.body.as_deref().ok_or(BodyError::Missing)?;
    Ok(serde_json::from_str(body)?)
}

/// `POST /hello`: greeter comes from the JSON body.
pub fn post_hello(request: &IncomingRequest) -> OutgoingResponse {
    info!("POST /hello");

    let body = match json_body(request) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "Invalid JSON in request body");
            return OutgoingResponse::json(
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid JSON format" }),
            );
        }
    };

    match non_empty(body.get(GREETER).and_then(Value::as_str)) {
        Some(greeter) => OutgoingResponse::json(
            StatusCode::OK,
            Greeting::new(Some(greeter), "POST", GreeterSource::Body).to_json(),
        ),
        None => OutgoingResponse::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": "Internal Server Error", "httpMethod": "POST" }),
        ),
    }
}
