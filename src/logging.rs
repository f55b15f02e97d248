//! Tracing setup
//!
//! The terminal belongs to the TUI, so logs go to a file.
//! Filter with RUST_LOG; defaults to `flixtui=info` (`debug` with -v).

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default log location (~/.local/share/flixtui/flixtui.log on Linux)
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("flixtui")
        .join("flixtui.log")
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "flixtui=debug"
    } else {
        "flixtui=info"
    }
}

/// Install the global subscriber. Returns the file being written.
pub fn init(log_file: Option<PathBuf>, verbose: bool) -> Result<PathBuf> {
    let path = log_file.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {}", e))?;

    Ok(path)
}
