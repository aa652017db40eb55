//! Tracing setup for echoframe
//!
//! Provides one logging configuration shared by the server and the client.
//!
//! # Usage
//!
//! ```ignore
//! use echoframe_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::default())?;
//! ```
//!
//! The server can switch to JSON lines:
//! ```ignore
//! use echoframe_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::daemon())?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Target prefix shared by every crate in the workspace.
const TARGET_PREFIX: &str = "echoframe";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format (default)
    #[default]
    Compact,
    /// JSON lines, one object per event
    Json,
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// The level used when neither `RUST_LOG` nor `env_filter` is set
    pub default_level: Level,
    /// Output format for log messages
    pub output_format: TracingOutputFormat,
    /// Whether to include file/line information
    pub include_location: bool,
    /// Whether to include the target (module path)
    pub include_target: bool,
    /// Whether to include timestamps
    pub include_timestamp: bool,
    /// Whether to log span open/close events
    pub include_span_events: bool,
    /// Custom env filter directive, takes precedence over `RUST_LOG`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: true,
            include_span_events: false,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Verbose single-line output for `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            output_format: TracingOutputFormat::Compact,
            include_location: true,
            include_target: true,
            include_timestamp: false,
            include_span_events: false,
            env_filter: None,
        }
    }

    /// JSON output for a long-running server.
    #[must_use]
    pub fn daemon() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Json,
            include_location: true,
            include_target: true,
            include_timestamp: true,
            include_span_events: true,
            env_filter: None,
        }
    }

    /// Set the default log level
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set a custom env filter directive
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Directive applied when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> String {
        format!("{}={}", TARGET_PREFIX, self.default_level)
    }

    fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(ref filter) = self.env_filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive())))
    }
}

/// Initialize tracing with the given configuration.
///
/// Call once at process start. `RUST_LOG` overrides the default level unless
/// an explicit filter was configured.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the
/// filter directive does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = config.build_filter()?;

    let span_events = if config.include_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target)
        .with_span_events(span_events);

    let layer = match (config.output_format, config.include_timestamp) {
        (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
        (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
        (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
        (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
        (TracingOutputFormat::Json, true) => layer.json().boxed(),
        (TracingOutputFormat::Json, false) => layer.json().without_time().boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
