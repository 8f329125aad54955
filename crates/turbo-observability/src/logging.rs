//! Structured logging with component context.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Component that emitted the entry.
    pub component: String,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}: {}", self.level, self.component, self.message);

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let mut fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// Destination for emitted log entries.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Forward to the `tracing` macros. Without an installed subscriber
    /// this is a no-op.
    #[default]
    Tracing,
    /// Write formatted entries to stderr.
    Stderr,
    /// Keep entries in memory so callers can inspect them.
    Memory(Arc<Mutex<Vec<LogEntry>>>),
    /// Drop everything.
    Discard,
}

/// Structured logger handle.
///
/// Components take one of these explicitly instead of reaching for a
/// process-wide logger. Cloning is cheap; clones share a `Memory` sink.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    component: String,
    start_time: std::time::Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new("turbo")
    }
}

impl StructuredLogger {
    /// Create a new logger for a component.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            start_time: std::time::Instant::now(),
            min_level: LogLevel::Debug,
            format: LogFormat::Json,
            sink: LogSink::Tracing,
        }
    }

    /// Create a logger that drops every entry.
    pub fn disabled() -> Self {
        Self::new("turbo").with_sink(LogSink::Discard)
    }

    /// Create a logger that captures entries in memory.
    ///
    /// Returns the logger together with the shared buffer.
    pub fn capturing(component: impl Into<String>) -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let logger = Self::new(component)
            .with_min_level(LogLevel::Trace)
            .with_sink(LogSink::Memory(Arc::clone(&buffer)));
        (logger, buffer)
    }

    /// Derive a logger for a sub-component sharing sink and settings.
    pub fn scoped(&self, component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..self.clone()
        }
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the sink.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    /// Log at debug level with fields.
    pub fn debug_with(&self, message: &str, fields: &[(&str, &dyn fmt::Debug)]) {
        self.log(LogLevel::Debug, message, debug_fields(fields));
    }

    /// Log at error level with fields.
    pub fn error_with(&self, message: &str, fields: &[(&str, &dyn fmt::Debug)]) {
        self.log(LogLevel::Error, message, debug_fields(fields));
    }

    /// Check whether a level would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level && !matches!(self.sink, LogSink::Discard)
    }

    fn log(&self, level: LogLevel, message: &str, fields: HashMap<String, serde_json::Value>) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            component: self.component.clone(),
            fields,
            elapsed_us: Some(self.start_time.elapsed().as_micros() as u64),
        };

        match &self.sink {
            LogSink::Tracing => emit_tracing(&entry, self.format),
            LogSink::Stderr => eprintln!("{}", self.render(&entry)),
            LogSink::Memory(buffer) => {
                // A poisoned buffer only means a test thread panicked mid-push.
                let mut entries = buffer.lock().unwrap_or_else(|e| e.into_inner());
                entries.push(entry);
            }
            LogSink::Discard => {}
        }
    }

    fn render(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        }
    }
}

fn debug_fields(fields: &[(&str, &dyn fmt::Debug)]) -> HashMap<String, serde_json::Value> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::json!(format!("{:?}", v))))
        .collect()
}

fn emit_tracing(entry: &LogEntry, format: LogFormat) {
    let line = match format {
        LogFormat::Json => entry.to_json(),
        LogFormat::Human => entry.to_human(),
    };
    let component = entry.component.as_str();
    match entry.level {
        LogLevel::Trace => tracing::trace!(component = %component, "{}", line),
        LogLevel::Debug => tracing::debug!(component = %component, "{}", line),
        LogLevel::Info => tracing::info!(component = %component, "{}", line),
        LogLevel::Warn => tracing::warn!(component = %component, "{}", line),
        LogLevel::Error => tracing::error!(component = %component, "{}", line),
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: HashMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a duration field (in milliseconds).
    pub fn duration_ms(mut self, key: &str, duration: std::time::Duration) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(duration.as_millis() as u64));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }

    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturing_logger_records_entries() {
        let (logger, buffer) = StructuredLogger::capturing("waiter");
        logger.debug_builder("poll").emit();
        logger.error_with("gave up", &[("attempts", &3)]);

        let entries = buffer.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Debug);
        assert_eq!(entries[1].message, "gave up");
        assert_eq!(entries[1].component, "waiter");
    }

    #[test]
    fn test_min_level_filters() {
        let (logger, buffer) = StructuredLogger::capturing("registry");
        let logger = logger.with_min_level(LogLevel::Info);
        logger.debug_builder("hidden").emit();
        logger.error_with("shown", &[]);

        let entries = buffer.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn test_scoped_shares_sink() {
        let (logger, buffer) = StructuredLogger::capturing("root");
        let child = logger.scoped("child");
        child.info_builder("hello").emit();

        let entries = buffer.lock().unwrap();
        assert_eq!(entries[0].component, "child");
    }

    #[test]
    fn test_disabled_logger() {
        let logger = StructuredLogger::disabled();
        assert!(!logger.enabled(LogLevel::Error));
        logger.error_with("nothing happens", &[]);
    }

    #[test]
    fn test_builder_fields() {
        let (logger, buffer) = StructuredLogger::capturing("cli");
        logger
            .info_builder("rendered")
            .field("kind", "js")
            .field_i64("count", 3)
            .field_bool("local", true)
            .emit();

        let entries = buffer.lock().unwrap();
        let entry = &entries[0];
        assert_eq!(entry.fields["kind"], serde_json::json!("js"));
        assert_eq!(entry.fields["count"], serde_json::json!(3));
        assert_eq!(entry.fields["local"], serde_json::json!(true));
    }

    #[test]
    fn test_human_format() {
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "slow".to_string(),
            component: "waiter".to_string(),
            fields: HashMap::new(),
            elapsed_us: Some(12),
        };
        assert_eq!(entry.to_human(), "[WARN] waiter: slow (12us)");
    }

    #[test]
    fn test_json_format_flattens_fields() {
        let mut fields = HashMap::new();
        fields.insert("selector".to_string(), serde_json::json!("#out"));
        let entry = LogEntry {
            level: LogLevel::Debug,
            message: "poll".to_string(),
            component: "waiter".to_string(),
            fields,
            elapsed_us: None,
        };
        let value: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(value["level"], "debug");
        assert_eq!(value["selector"], "#out");
        assert!(value.get("elapsed_us").is_none());
    }
}
