// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed home and repository plus a
// recording version-control fake, so each integration test gets an
// isolated environment and runs without a git binary.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use dots::error::DotsError;
use dots::repo::Repository;
use dots::vcs::Vcs;

/// A [`Vcs`] fake that records commit messages and never shells out.
#[derive(Default, Clone)]
pub struct RecordingVcs {
    pub commits: Rc<RefCell<Vec<String>>>,
}

impl Vcs for RecordingVcs {
    fn init(&self, _root: &Path) -> Result<(), DotsError> {
        Ok(())
    }

    fn checkout_new_branch(&self, _root: &Path, _name: &str) -> Result<(), DotsError> {
        Ok(())
    }

    fn stage_all(&self, _root: &Path) -> Result<(), DotsError> {
        Ok(())
    }

    fn commit(&self, _root: &Path, message: &str) -> Result<(), DotsError> {
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }

    fn is_repository(&self, _root: &Path) -> bool {
        true
    }
}

/// An isolated test environment: a synthetic home directory containing an
/// already-initialized repository, torn down on drop.
pub struct TestEnv {
    /// Temporary directory holding the synthetic home.
    pub tmp: tempfile::TempDir,
    /// The synthetic home directory.
    pub home: PathBuf,
    /// Repository handle rooted at `<home>/dots`.
    pub repo: Repository,
    /// Commit messages recorded by the fake VCS, in order.
    pub commits: Rc<RefCell<Vec<String>>>,
}

impl TestEnv {
    /// Create an environment with no ignore rules.
    pub fn new() -> Self {
        Self::with_ignores(&[])
    }

    /// Create an environment with the given ignore patterns configured.
    pub fn with_ignores(patterns: &[&str]) -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let home = tmp.path().join("home");
        let root = home.join("dots");
        fs::create_dir_all(root.join("files")).expect("create files dir");
        fs::create_dir_all(root.join("encrypted")).expect("create encrypted dir");

        let ignored: Vec<String> = patterns.iter().map(|s| (*s).to_string()).collect();
        let vcs = RecordingVcs::default();
        let commits = vcs.commits.clone();
        let repo = Repository::new(root, home.clone(), &ignored, Box::new(vcs))
            .expect("construct repository");

        Self {
            tmp,
            home,
            repo,
            commits,
        }
    }

    /// Write a file under the synthetic home, creating parent directories.
    pub fn home_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.home.join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("create home parents");
        fs::write(&path, content).expect("write home file");
        path
    }

    /// Write a file directly into repository storage, creating parents.
    pub fn stored_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.repo.files_path().join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("create storage parents");
        fs::write(&path, content).expect("write stored file");
        path
    }

    /// Whether `rel` under the home directory is a symlink to its stored
    /// counterpart.
    pub fn is_linked(&self, rel: &str) -> bool {
        fs::read_link(self.home.join(rel))
            .is_ok_and(|dest| dest == self.repo.files_path().join(rel))
    }
}
