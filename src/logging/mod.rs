//! Structured log output.

mod format;
mod layer;

pub use format::{require_environment, serialize, LogRecord, AWS_REGION, ENVIRONMENT, FUNCTION_VERSION};
pub use layer::StructuredLogLayer;
