//! Domain-specific error types for the dots engine.
//!
//! Internal modules return [`DotsError`] for failures that belong to the
//! command taxonomy (configuration, validation, version control, feature
//! gaps) and plain [`anyhow::Error`] for unexpected I/O failures.  Command
//! handlers at the CLI boundary convert everything to [`anyhow::Error`] via
//! the standard `?` operator.
//!
//! Sync conflicts (wrong link, regular file in the way) are deliberately
//! *not* errors: they flow through the
//! [`SyncReport`](crate::repo::sync::SyncReport) and never abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the dots engine.
#[derive(Error, Debug)]
pub enum DotsError {
    /// Missing or corrupt repository structure, or an unreadable
    /// configuration file.  Fatal before any mutation occurs.
    #[error("configuration error: {0}")]
    Config(String),

    /// A command precondition failed for the given path.  Validation runs
    /// before all side effects, so no partial mutation occurs.
    #[error("{reason}: {}", path.display())]
    Validation {
        /// The offending path, as the user supplied it.
        path: PathBuf,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// A git operation failed.  Filesystem changes already applied are kept;
    /// only the version-control step needs retrying.
    #[error("git {action} failed: {detail}")]
    Vcs {
        /// The git operation that failed (e.g., `"commit"`).
        action: &'static str,
        /// Trimmed stderr (or execution error) from git.
        detail: String,
    },

    /// A feature accepted by the interface surface but not implemented.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl DotsError {
    /// Build a [`DotsError::Validation`] from a path and a reason.
    pub fn validation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
