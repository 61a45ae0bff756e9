//! Tracing initialization for the Lambda function.
//!
//! Configures JSON-formatted tracing output suitable for CloudWatch Logs, with
//! a plain-text alternative for local runs.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format, selected with the `LOG_FORMAT` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON structured logging (default, CloudWatch).
    #[default]
    Json,
    /// Human-readable text logging (local development).
    Text,
}

impl LogFormat {
    /// Accepts "text" or "pretty"; anything else is JSON.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Initialize tracing for the Lambda.
///
/// This should be called once at the start of the Lambda `main` function,
/// before calling `lambda_runtime::run()`.
///
/// The log level can be controlled via the `RUST_LOG` environment variable.
/// Defaults to `info` if not set.
///
/// # Example
///
/// ```no_run
/// use stayhub_lambda_shared::init_tracing;
///
/// init_tracing();
/// ```
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::from_env() {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .flatten_event(true);
            registry.with(fmt_layer).init();
        }
        LogFormat::Text => {
            registry.with(fmt::layer().with_target(true)).init();
        }
    }
}
