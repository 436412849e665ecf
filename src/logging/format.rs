//! The fixed JSON shape every log line is emitted in.

use serde::Serialize;

use crate::config::EnvSource;
use crate::error::FormatError;

pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const AWS_REGION: &str = "AWS_REGION";
pub const FUNCTION_VERSION: &str = "AWS_LAMBDA_FUNCTION_VERSION";
const DEFAULT_FUNCTION_VERSION: &str = "$LATEST";

/// One structured log entry as produced by the logging layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    pub level: Option<String>,
    pub message: Option<String>,
    pub correlation_id: Option<String>,
    pub xray_trace_id: Option<String>,
    pub function_name: Option<String>,
    pub function_arn: Option<String>,
    pub function_memory_size: Option<u32>,
    pub timestamp: Option<String>,
    pub sample_rate_value: Option<f64>,
    pub cold_start: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogLine<'a> {
    log_level: Option<&'a str>,
    message: Option<&'a str>,
    environment: String,
    aws_region: String,
    correlation_ids: CorrelationIds<'a>,
    lambda_function: LambdaFunction<'a>,
    timestamp: Option<&'a str>,
    logger: LoggerInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CorrelationIds<'a> {
    aws_request_id: Option<&'a str>,
    x_ray_trace_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LambdaFunction<'a> {
    name: Option<&'a str>,
    arn: Option<&'a str>,
    #[serde(rename = "memoryLimitInMB")]
    memory_limit_in_mb: Option<u32>,
    version: String,
    cold_start: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoggerInfo {
    sample_rate_value: Option<f64>,
}

fn required(env: &impl EnvSource, key: &'static str) -> Result<String, FormatError> {
    env.var(key).ok_or(FormatError::MissingVariable(key))
}

/// Fails when a variable every log line depends on is unset.
pub fn require_environment(env: &impl EnvSource) -> Result<(), FormatError> {
    required(env, ENVIRONMENT)?;
    required(env, AWS_REGION)?;
    Ok(())
}

/// Serializes `record` into a single-line JSON document.
///
/// `ENVIRONMENT` and `AWS_REGION` have no default: if either is missing the
/// call fails and nothing is produced.
pub fn serialize(record: &LogRecord, env: &impl EnvSource) -> Result<String, FormatError> {
    let line = LogLine {
        log_level: record.level.as_deref(),
        message: record.message.as_deref(),
        environment: required(env, ENVIRONMENT)?,
        aws_region: required(env, AWS_REGION)?,
        correlation_ids: CorrelationIds {
            aws_request_id: record.correlation_id.as_deref(),
            x_ray_trace_id: record.xray_trace_id.as_deref(),
        },
        lambda_function: LambdaFunction {
            name: record.function_name.as_deref(),
            arn: record.function_arn.as_deref(),
            memory_limit_in_mb: record.function_memory_size,
            version: env
                .var(FUNCTION_VERSION)
                .unwrap_or_else(|| DEFAULT_FUNCTION_VERSION.to_string()),
            cold_start: record.cold_start,
        },
        timestamp: record.timestamp.as_deref(),
        logger: LoggerInfo {
            sample_rate_value: record.sample_rate_value,
        },
    };
    Ok(serde_json::to_string(&line)?)
}
