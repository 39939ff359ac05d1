//! `tracing` subscriber setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use miette::{IntoDiagnostic, WrapErr};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go.
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a Path),
    /// Standard error.
    Stderr,
    /// Nowhere. The full-screen UI owns the terminal.
    Discard,
}

/// Install the global subscriber. An unparsable filter falls back to `warn`.
pub fn init(filter: &str, target: LogTarget<'_>) -> miette::Result<()> {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        LogTarget::Stderr => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::Discard => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .init();
        }
    }
    Ok(())
}
