//! Error types for the refresh boundary and demo feed loading.
//!
//! Refresh failures are **non-fatal** by policy: the container swallows them
//! after notifying an optional observer, and the pull indicator simply goes
//! away. Feed errors are fatal at startup and propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a refresh action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The refresh action ran and failed.
    #[error("refresh failed: {0}")]
    Failed(String),

    /// The refresh was dropped before it settled (worker gone or panicked).
    #[error("refresh abandoned before it settled")]
    Abandoned,
}

/// Errors raised while loading a demo feed file.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The file could not be read.
    #[error("Failed to read feed at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of feed items.
    #[error("Invalid feed JSON in {path}: {source}")]
    Parse {
        /// Path with invalid contents.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
