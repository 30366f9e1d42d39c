// src/logging.rs

//! Logging setup for `stepdag` using `tracing` + `tracing-subscriber`.
//!
//! The filter is resolved in this order:
//! 1. the explicit `directives` argument, if provided (any `EnvFilter`
//!    directive string, e.g. "debug" or "stepdag=trace")
//! 2. the `STEPDAG_LOG` environment variable
//! 3. default to "info"
//!
//! Logs go to STDERR so stdout stays free for whatever the embedding
//! application prints.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global logging subscriber.
///
/// Call once at startup. Embedding applications that install their own
/// subscriber should skip this entirely.
pub fn init_logging(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_env("STEPDAG_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
