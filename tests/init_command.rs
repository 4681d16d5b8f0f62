// Repository initialization scenarios.

mod common;

use std::fs;
use std::path::PathBuf;

use dots::prompt::StaticAnswer;
use dots::repo::Repository;

use common::{RecordingVcs, TestEnv};

fn bare_env() -> (tempfile::TempDir, PathBuf, Repository, RecordingVcs) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let home = tmp.path().join("home");
    fs::create_dir_all(&home).expect("create home");
    let root = home.join("dots");
    let vcs = RecordingVcs::default();
    let repo = Repository::new(root.clone(), home, &[], Box::new(vcs.clone()))
        .expect("construct repository");
    (tmp, root, repo, vcs)
}

#[test]
fn init_builds_the_full_repository_skeleton() {
    let (_tmp, root, repo, vcs) = bare_env();

    assert!(repo.init("workstation", &StaticAnswer(false)).expect("init"));

    assert!(root.join("files/.gitkeep").is_file());
    assert!(root.join("encrypted/.gitkeep").is_file());
    assert_eq!(
        fs::read_to_string(root.join(".gitignore")).expect("read .gitignore"),
        "encrypted/*.cleartext\n"
    );
    assert_eq!(vcs.commits.borrow().as_slice(), ["initialize repository"]);
}

#[test]
fn declining_the_overwrite_prompt_preserves_an_existing_repository() {
    let env = TestEnv::new();
    let precious = env.stored_file(".bashrc", "do not lose me");

    assert!(!env.repo.init("workstation", &StaticAnswer(false)).expect("init"));

    assert_eq!(
        fs::read_to_string(&precious).expect("read"),
        "do not lose me"
    );
    assert!(env.commits.borrow().is_empty());
}

#[test]
fn confirming_the_overwrite_prompt_replaces_the_repository() {
    let env = TestEnv::new();
    let old = env.stored_file(".bashrc", "old contents");

    assert!(env.repo.init("workstation", &StaticAnswer(true)).expect("init"));

    assert!(!old.exists());
    assert!(env.repo.files_path().join(".gitkeep").is_file());
    assert_eq!(env.commits.borrow().as_slice(), ["initialize repository"]);
}

#[test]
fn operations_before_init_point_at_the_fix() {
    let (_tmp, _root, repo, _vcs) = bare_env();

    let err = repo.list().expect_err("must fail");
    assert!(err.to_string().contains("run 'dots init' first"));
}

#[test]
fn a_freshly_initialized_repository_syncs_cleanly() {
    let (_tmp, _root, repo, _vcs) = bare_env();
    repo.init("workstation", &StaticAnswer(false)).expect("init");

    // Only the .gitkeep markers exist and they are ignored.
    let report = repo.list().expect("list");
    assert_eq!(report, dots::repo::sync::SyncReport::default());
}
