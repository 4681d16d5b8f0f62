//! Path translation between the home, storage, and repository path spaces.
//!
//! A stored file lives under `<repo>/files/<rel>` and appears in the home
//! directory at `<home>/<rel>`.  The [`Mapper`] holds the two anchors (home
//! directory and repository root) and performs pure translations between the
//! spaces; it does no I/O and raises no errors — callers validate inputs.

use std::path::{Component, Path, PathBuf};

/// Pure path translator anchored on a home directory and a repository root.
///
/// The home directory is threaded through explicitly (never read from a
/// global) so the engine can be exercised with synthetic home paths.
#[derive(Debug, Clone)]
pub struct Mapper {
    home: PathBuf,
    repo_root: PathBuf,
}

impl Mapper {
    /// Create a mapper for the given home directory and repository root.
    #[must_use]
    pub fn new(home: PathBuf, repo_root: PathBuf) -> Self {
        Self { home, repo_root }
    }

    /// The home directory this mapper is anchored on.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Map a storage-relative path to its home-directory target.
    #[must_use]
    pub fn target_path(&self, stored_rel: &Path) -> PathBuf {
        self.home.join(stored_rel)
    }

    /// Inverse of [`target_path`](Self::target_path): the storage-relative
    /// path for a home-directory location.  `None` when `target` is not
    /// under the home directory.
    #[must_use]
    pub fn stored_rel(&self, target: &Path) -> Option<PathBuf> {
        let rel = target.strip_prefix(&self.home).ok()?;
        if rel.as_os_str().is_empty() {
            return None;
        }
        Some(rel.to_path_buf())
    }

    /// Path relative to the repository root, with a leading separator.
    ///
    /// Used purely for anchored ignore matching: the leading `/` lets
    /// `/files/...` patterns match against a stable, root-anchored form.
    /// Paths outside the repository are returned unchanged.
    #[must_use]
    pub fn repo_rel(&self, abs: &Path) -> PathBuf {
        match abs.strip_prefix(&self.repo_root) {
            Ok(rel) => Path::new("/").join(rel),
            Err(_) => abs.to_path_buf(),
        }
    }
}

/// Lexically normalize a path: resolve `.` and `..` components without
/// touching the filesystem (so symlinks are *not* resolved, which matters
/// when classifying the path itself).
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
