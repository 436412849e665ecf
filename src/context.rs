//! Per-invocation log context.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::field::Empty;
use tracing::Span;

use crate::config::EnvSource;
use crate::event::IncomingRequest;

/// `true` exactly once per process.
#[derive(Debug, Default)]
pub struct ColdStart(AtomicBool);

impl ColdStart {
    pub fn take(&self) -> bool {
        !self.0.swap(true, Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationContext {
    pub correlation_id: String,
    pub xray_trace_id: Option<String>,
    pub function_name: Option<String>,
    pub function_arn: String,
    pub function_memory_size: Option<u32>,
    pub cold_start: bool,
}

impl InvocationContext {
    /// The correlation id is the REST request id, or the Lambda request id
    /// when the event carries none.
    pub fn from_lambda(
        request: &IncomingRequest,
        lambda: &lambda_runtime::Context,
        env: &impl EnvSource,
        cold_start: bool,
    ) -> Self {
        let correlation_id = request
            .request_id()
            .map(str::to_string)
            .unwrap_or_else(|| lambda.request_id.clone());

        Self {
            correlation_id,
            xray_trace_id: env.var("_X_AMZN_TRACE_ID").as_deref().and_then(trace_root),
            function_name: env.var("AWS_LAMBDA_FUNCTION_NAME"),
            function_arn: lambda.invoked_function_arn.clone(),
            function_memory_size: env
                .var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE")
                .and_then(|size| size.parse().ok()),
            cold_start,
        }
    }

    /// Opened at error level so it exists whatever level is configured.
    pub fn span(&self) -> Span {
        let span = tracing::error_span!(
            "invocation",
            correlation_id = %self.correlation_id,
            function_arn = %self.function_arn,
            cold_start = self.cold_start,
            xray_trace_id = Empty,
            function_name = Empty,
            function_memory_size = Empty,
        );
        if let Some(trace) = &self.xray_trace_id {
            span.record("xray_trace_id", trace.as_str());
        }
        if let Some(name) = &self.function_name {
            span.record("function_name", name.as_str());
        }
        if let Some(memory) = self.function_memory_size {
            span.record("function_memory_size", memory);
        }
        span
    }
}

/// `Root=1-abc;Parent=def;Sampled=1` -> `1-abc`
fn trace_root(header: &str) -> Option<String> {
    let root = header.split(';').next()?.trim();
    let root = root.strip_prefix("Root=").unwrap_or(root);
    (!root.is_empty()).then(|| root.to_string())
}
