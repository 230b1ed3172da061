//! Tracing setup for the terminal binary.
//!
//! The renderer owns stdout, so log lines only ever go to a file.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install a file-backed subscriber when `log_file` is given.
///
/// Without a log file no subscriber is installed and every event is dropped.
/// Returns `Ok(false)` in that case, `Ok(true)` once logging is live.
pub fn init(log_file: Option<&Path>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    // Don't fail if a subscriber is already set (tests, embedding).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();

    Ok(true)
}
