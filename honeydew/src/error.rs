//! Error taxonomy for the honeydew pipeline.
//!
//! Every failure mode gets its own variant so callers (and tests) can tell
//! a missing config key apart from a malformed one, or a rejected push from
//! a rejected forced push. Variants carry the path/key/status context needed
//! to report the failure as a single line.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config store unreachable, or the key lookup itself failed.
    #[error("config store unavailable for key '{key}': {reason}")]
    ConfigUnavailable { key: String, reason: String },

    /// Stored value is not valid JSON or lacks the expected shape.
    #[error("config value for key '{key}' is malformed: {reason}")]
    ConfigMalformed { key: String, reason: String },

    /// Required environment variable is unset or blank.
    #[error("required environment variable {0} is unset or empty")]
    MissingConfig(&'static str),

    #[error("repository directory {} does not exist", path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot access {}: {source}", path.display())]
    PathError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open tracked file {}: {source}", path.display())]
    FileOpenError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot append to tracked file {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("git add failed: {0}")]
    StageError(String),

    #[error("git commit failed: {0}")]
    CommitError(String),

    #[error("git push failed: {0}")]
    PushError(String),

    #[error("forced git push failed: {0}")]
    ForcePushError(String),

    #[error("cannot close tracked file {}: {source}", path.display())]
    CloseError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
