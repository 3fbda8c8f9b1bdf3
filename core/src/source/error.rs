//! Error types for source adapters

use std::path::PathBuf;
use thiserror::Error;

/// Transport and availability failures from either source.
///
/// "No match" is not an error: secondary lookups report it as `Ok(None)`
/// so logs and tests can tell "no entry exists" from "could not check".
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("unexpected page shape for {handle}: {reason}")]
    MalformedPage { handle: String, reason: String },

    #[error("failed to read snapshot {path}")]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode snapshot {path}")]
    DecodeSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
