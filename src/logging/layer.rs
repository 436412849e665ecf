use std::fmt;
use std::io::Write;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::format::{self, LogRecord};
use crate::config::EnvSource;

/// Writes every event as one formatted JSON line.
///
/// Fields recorded on enclosing spans (see [`crate::context`]) are copied
/// into the record, so anything logged during an invocation carries its
/// correlation id and function metadata.
pub struct StructuredLogLayer<E, W> {
    env: E,
    make_writer: W,
    sample_rate: Option<f64>,
}

impl<E, W> StructuredLogLayer<E, W>
where
    E: EnvSource,
    W: for<'w> MakeWriter<'w>,
{
    pub fn new(env: E, make_writer: W) -> Self {
        Self {
            env,
            make_writer,
            sample_rate: None,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }
}

/// Invocation fields captured from span attributes.
#[derive(Debug, Clone, Default)]
struct SpanFields {
    correlation_id: Option<String>,
    xray_trace_id: Option<String>,
    function_name: Option<String>,
    function_arn: Option<String>,
    function_memory_size: Option<u32>,
    cold_start: Option<bool>,
}

impl SpanFields {
    fn apply_to(&self, record: &mut LogRecord) {
        if self.correlation_id.is_some() {
            record.correlation_id = self.correlation_id.clone();
        }
        if self.xray_trace_id.is_some() {
            record.xray_trace_id = self.xray_trace_id.clone();
        }
        if self.function_name.is_some() {
            record.function_name = self.function_name.clone();
        }
        if self.function_arn.is_some() {
            record.function_arn = self.function_arn.clone();
        }
        if self.function_memory_size.is_some() {
            record.function_memory_size = self.function_memory_size;
        }
        if self.cold_start.is_some() {
            record.cold_start = self.cold_start;
        }
    }

    fn set_str(&mut self, name: &str, value: String) {
        match name {
            "correlation_id" => self.correlation_id = Some(value),
            "xray_trace_id" => self.xray_trace_id = Some(value),
            "function_name" => self.function_name = Some(value),
            "function_arn" => self.function_arn = Some(value),
            "function_memory_size" => self.function_memory_size = value.parse().ok(),
            "cold_start" => self.cold_start = value.parse().ok(),
            _ => {}
        }
    }
}

impl Visit for SpanFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_str(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "function_memory_size" {
            self.function_memory_size = u32::try_from(value).ok();
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "function_memory_size" {
            self.function_memory_size = u32::try_from(value).ok();
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "cold_start" {
            self.cold_start = Some(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set_str(field.name(), format!("{value:?}"));
    }
}

#[derive(Default)]
struct MessageVisitor(Option<String>);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG | Level::TRACE => "DEBUG",
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S,%3f%z")
        .to_string()
}

impl<S, E, W> Layer<S> for StructuredLogLayer<E, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    E: EnvSource + 'static,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut fields = SpanFields::default();
            attrs.record(&mut fields);
            span.extensions_mut().insert(fields);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut extensions = span.extensions_mut();
            if let Some(fields) = extensions.get_mut::<SpanFields>() {
                values.record(fields);
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut message = MessageVisitor::default();
        event.record(&mut message);

        let mut record = LogRecord {
            level: Some(level_name(event.metadata().level()).to_string()),
            message: message.0,
            timestamp: Some(timestamp()),
            sample_rate_value: self.sample_rate,
            ..Default::default()
        };

        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(fields) = span.extensions().get::<SpanFields>() {
                    fields.apply_to(&mut record);
                }
            }
        }

        // A record that cannot be formatted is dropped.
        if let Ok(line) = format::serialize(&record, &self.env) {
            let mut writer = self.make_writer.make_writer();
            let _ = writeln!(writer, "{line}");
        }
    }
}
