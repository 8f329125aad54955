//! Output formatting for the CLI.

use console::style;
use turbo_observability::{LogFormat, LogSink, StructuredLogger};

/// Output handler for CLI messages.
///
/// Rendered HTML goes to stdout untouched; status lines go to stderr so
/// the tags can be piped straight into a template.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print raw text to stdout.
    pub fn raw(&self, text: &str) {
        if !text.is_empty() {
            println!("{}", text);
        }
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        println!("  {} {}", style("•").dim(), item);
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Logger for library calls: human lines on stderr when verbose,
    /// otherwise silent.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        if self.verbose && !self.json {
            StructuredLogger::new(component)
                .with_format(LogFormat::Human)
                .with_sink(LogSink::Stderr)
        } else {
            StructuredLogger::disabled()
        }
    }
}
