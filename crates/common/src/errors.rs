//! Error types for CiteNetX
//!
//! One error enum for the whole workspace. Remote-source failures are
//! terminal at the expansion engine's fetch call site (recorded and logged,
//! never propagated past it); checkpoint and query failures are surfaced to
//! the caller as typed variants.

use thiserror::Error;

/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Remote source errors
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication rejected by source: {message}")]
    Unauthorized { message: String },

    #[error("rate limited by source: {message}")]
    RateLimited { message: String },

    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    #[error("source returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("unexpected response shape: {message}")]
    MalformedResponse { message: String },

    // Checkpoint errors
    #[error("checkpoint not found: {path}")]
    CheckpointNotFound { path: String },

    #[error("corrupt checkpoint at {path}: {source}")]
    CheckpointCorrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // Graph query errors
    #[error("node not found in citation graph: {id}")]
    NodeNotFound { id: String },

    #[error("no path from {id} to any initial-sample node")]
    Unreachable { id: String },

    // Infrastructure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl Error {
    /// Whether this error came out of a remote fetch attempt
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(_)
                | Error::Unauthorized { .. }
                | Error::RateLimited { .. }
                | Error::RecordNotFound { .. }
                | Error::Upstream { .. }
                | Error::MalformedResponse { .. }
        )
    }
}
