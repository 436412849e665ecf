use thiserror::Error;

/// Failures while turning a log record into a log line.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("required environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("failed to encode log line: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while decoding a request body.
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("request has no body")]
    Missing,

    #[error("invalid JSON in request body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
        }
    }
}
