//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so in that mode logs go to a file in the
//! platform cache dir. One-shot commands log to stderr. `RUST_LOG` overrides
//! the default filter in both cases.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

const APP_DIR_NAME: &str = "onthisday-explorer";
const LOG_FILENAME: &str = "onthisday.log";

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Log file location, e.g. `~/.cache/onthisday-explorer/onthisday.log`
pub fn default_log_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(cache_dir.join(APP_DIR_NAME).join(LOG_FILENAME))
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(target: LogTarget) -> Result<()> {
    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter("onthisday_explorer=warn"))
            .with_writer(std::io::stderr)
            .compact()
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create log directory")?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter("onthisday_explorer=info"))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
