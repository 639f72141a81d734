//! Log subscriber setup
//!
//! The terminal belongs to the UI, so logs only go to a file. Without one
//! no subscriber is installed and every `tracing` call is a no-op.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::{FromEnvError, LevelFilter};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("cannot open log file {}: {source}", path.display())]
    OpenLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid RUST_LOG filter: {0}")]
    Filter(#[from] FromEnvError),

    #[error("a global subscriber is already installed")]
    Install(#[from] TryInitError),
}

fn open_log(path: &Path) -> Result<File, TelemetryError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::OpenLog {
            path: path.to_path_buf(),
            source,
        })
}

/// `RUST_LOG` if set, `info` otherwise.
fn env_filter() -> Result<EnvFilter, FromEnvError> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
}

/// Install the global subscriber. Returns whether one was installed.
pub fn init(log_file: Option<&Path>) -> Result<bool, TelemetryError> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = open_log(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish()
        .try_init()?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}
