//! Version-control adapter.
//!
//! The repository engine only needs staging, committing, and (for `init`)
//! repository creation plus a host branch.  Everything goes through the
//! [`Vcs`] trait so tests can substitute a recording fake and run without a
//! git binary; the production implementation shells out to `git` via
//! [`exec`](crate::exec).

use std::path::Path;

use crate::error::DotsError;
use crate::exec;

/// Fixed prefix for every commit created by the tool.
pub const COMMIT_PREFIX: &str = "dots: ";

/// External version-control collaborator.
///
/// Failures are fatal for the invoking command; the filesystem is left in a
/// consistent but not-yet-committed state and re-running the command's
/// commit step (or a manual commit) recovers.
pub trait Vcs {
    /// Initialise a new repository at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Vcs`] when repository creation fails.
    fn init(&self, root: &Path) -> Result<(), DotsError>;

    /// Create and check out a branch named `name` (host identity).
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Vcs`] when branch creation fails.
    fn checkout_new_branch(&self, root: &Path, name: &str) -> Result<(), DotsError>;

    /// Stage all changes under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Vcs`] when staging fails.
    fn stage_all(&self, root: &Path) -> Result<(), DotsError>;

    /// Commit staged changes; `message` receives the [`COMMIT_PREFIX`].
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Vcs`] when the commit fails.
    fn commit(&self, root: &Path, message: &str) -> Result<(), DotsError>;

    /// Whether `root` is inside a version-controlled directory.
    fn is_repository(&self, root: &Path) -> bool {
        root.join(".git").exists()
    }
}

/// Production [`Vcs`] backed by the `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git;

impl Git {
    fn git(root: &Path, action: &'static str, args: &[&str]) -> Result<(), DotsError> {
        exec::run_in(root, "git", args).map_err(|e| DotsError::Vcs {
            action,
            detail: format!("{e:#}"),
        })?;
        Ok(())
    }
}

impl Vcs for Git {
    fn init(&self, root: &Path) -> Result<(), DotsError> {
        Self::git(root, "init", &["init"])
    }

    fn checkout_new_branch(&self, root: &Path, name: &str) -> Result<(), DotsError> {
        Self::git(root, "checkout", &["checkout", "-b", name])
    }

    fn stage_all(&self, root: &Path) -> Result<(), DotsError> {
        Self::git(root, "add", &["add", "--all"])
    }

    fn commit(&self, root: &Path, message: &str) -> Result<(), DotsError> {
        let message = format!("{COMMIT_PREFIX}{message}");
        Self::git(root, "commit", &["commit", "-m", &message])
    }
}
