use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the async session runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The session task has stopped; no more commands are accepted.
    #[error("slot session has shut down")]
    SessionClosed,

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
