//! Logging and Terminal Output
//!
//! - `tracing` subscriber with a stderr layer and an optional daily-rolling
//!   JSON file layer
//! - `log` records bridged into `tracing`
//! - Small `console`-styled helpers for CLI output

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use console::style;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "gallows.log";

// ============================================================================
// Logging Initialization
// ============================================================================

/// Default directory for log files.
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("gallows").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system.
///
/// This sets up:
/// 1. A human-readable stderr logger (stdout is reserved for output).
/// 2. When enabled, a JSON file logger rolling daily.
/// 3. Redirects standard `log` crate events to `tracing`.
///
/// `RUST_LOG` overrides the configured level. Returns the file writer's
/// `WorkerGuard`, which must be kept alive so buffered logs are flushed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (file_layer, guard) = if config.file_logging {
        let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
        match prepare_log_dir(&log_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .with_filter(env_filter(&config.level));
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter(&config.level));

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer);

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }

    if guard.is_some() {
        log::debug!(
            "Logging to {} (daily rolling)",
            config
                .log_dir
                .clone()
                .unwrap_or_else(default_log_dir)
                .join(LOG_FILE_NAME)
                .display()
        );
    }

    guard
}

fn prepare_log_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

// ============================================================================
// Rich Text
// ============================================================================

/// Builder for styled text segments
#[derive(Default)]
pub struct RichText {
    segments: Vec<String>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add plain text
    pub fn text(mut self, text: &str) -> Self {
        self.segments.push(text.to_string());
        self
    }

    /// Add bold text
    pub fn bold(mut self, text: &str) -> Self {
        self.segments.push(format!("{}", style(text).bold()));
        self
    }

    /// Add accent text (style names, numbering)
    pub fn accent(mut self, text: &str) -> Self {
        self.segments.push(format!("{}", style(text).magenta().bold()));
        self
    }

    /// Add muted/dim text
    pub fn muted(mut self, text: &str) -> Self {
        self.segments.push(format!("{}", style(text).dim()));
        self
    }

    /// Build the final string
    pub fn build(self) -> String {
        self.segments.join("")
    }
}

impl std::fmt::Display for RichText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for seg in &self.segments {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

// ============================================================================
// Status Messages
// ============================================================================

/// Print a success message to stderr
pub fn print_success(message: &str) {
    eprintln!("{} {}", style("✔").green(), style(message).green());
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✘").red(), style(message).red().bold());
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), style(message).yellow().bold());
}
