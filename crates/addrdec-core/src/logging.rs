//! Logging init: file under XDG state dir, or stderr.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,addrdec=debug";

/// `RUST_LOG` if set and valid, else [`DEFAULT_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Directory holding `addrdec.log`.
fn log_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("addrdec")?;
    Ok(xdg_dirs.get_state_home().join("addrdec"))
}

/// Initialize structured logging to `~/.local/state/addrdec/addrdec.log`.
/// Returns Err if the log file can't be opened or a subscriber is already set,
/// so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("addrdec.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!("addrdec logging initialized at {}", log_file_path.display());
    Ok(())
}

/// Initialize logging to stderr only. A no-op if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
