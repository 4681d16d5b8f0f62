// End-to-end add/rm scenarios: moving files into and out of the
// repository, with the commit history recorded by the fake VCS.

mod common;

use std::fs;

use dots::error::DotsError;
use dots::prompt::StaticAnswer;

use common::TestEnv;

#[test]
fn adding_a_dotfile_moves_it_and_links_back() {
    let env = TestEnv::new();
    let bashrc = env.home_file(".bashrc", "export EDITOR=vim");

    env.repo.add(&bashrc, false).expect("add");

    assert!(env.is_linked(".bashrc"));
    assert_eq!(
        fs::read_to_string(env.repo.files_path().join(".bashrc")).expect("read stored"),
        "export EDITOR=vim"
    );
    // Transparent to anything reading the original path.
    assert_eq!(
        fs::read_to_string(&bashrc).expect("read through link"),
        "export EDITOR=vim"
    );
    assert_eq!(env.commits.borrow().as_slice(), ["add .bashrc"]);
}

#[test]
fn adding_a_nested_file_mirrors_its_directory_structure() {
    let env = TestEnv::new();
    let config = env.home_file(".config/git/config", "[user]");

    env.repo.add(&config, false).expect("add");

    assert!(env.is_linked(".config/git/config"));
    assert_eq!(env.commits.borrow().as_slice(), ["add .config/git/config"]);
}

#[test]
fn encrypted_add_fails_fast() {
    let env = TestEnv::new();
    let netrc = env.home_file(".netrc", "machine example login me");

    let err = env.repo.add(&netrc, true).expect_err("must fail");
    let err = err.downcast::<DotsError>().expect("domain error");
    assert!(matches!(err, DotsError::Unsupported(_)));

    // Nothing moved, nothing committed.
    assert!(!netrc.symlink_metadata().expect("stat").is_symlink());
    assert!(env.commits.borrow().is_empty());
}

#[test]
fn add_refuses_a_file_outside_home() {
    let env = TestEnv::new();
    let outside = env.tmp.path().join("stray.conf");
    fs::write(&outside, "x").expect("write");

    let err = env.repo.add(&outside, false).expect_err("must fail");
    assert!(
        err.to_string()
            .starts_with("file is outside the home directory")
    );
}

#[test]
fn add_refuses_a_file_inside_the_repository() {
    let env = TestEnv::new();
    let readme = env.repo.root().join("README.md");
    fs::write(&readme, "notes").expect("write");

    let err = env.repo.add(&readme, false).expect_err("must fail");
    assert!(err.to_string().starts_with("file is inside the repository"));
}

#[test]
fn removing_restores_the_original_file() {
    let env = TestEnv::new();
    let vimrc = env.home_file(".vimrc", "set nocompatible");
    env.repo.add(&vimrc, false).expect("add");

    env.repo.remove(&vimrc, &StaticAnswer(true)).expect("rm");

    assert!(!vimrc.symlink_metadata().expect("stat").is_symlink());
    assert_eq!(
        fs::read_to_string(&vimrc).expect("read"),
        "set nocompatible"
    );
    assert!(!env.repo.files_path().join(".vimrc").exists());
    assert_eq!(
        env.commits.borrow().as_slice(),
        ["add .vimrc", "remove .vimrc"]
    );
}

#[test]
fn removing_a_nested_file_prunes_emptied_directories() {
    let env = TestEnv::new();
    let config = env.home_file(".config/git/config", "[user]");
    env.repo.add(&config, false).expect("add");

    env.repo.remove(&config, &StaticAnswer(true)).expect("rm");

    assert!(!env.repo.files_path().join(".config").exists());
    assert!(env.repo.files_path().is_dir());
}

#[test]
fn declining_cleanup_keeps_emptied_directories() {
    let env = TestEnv::new();
    let config = env.home_file(".config/git/config", "[user]");
    env.repo.add(&config, false).expect("add");

    env.repo.remove(&config, &StaticAnswer(false)).expect("rm");

    // The removal itself still succeeded.
    assert_eq!(fs::read_to_string(&config).expect("read"), "[user]");
    assert!(env.repo.files_path().join(".config/git").is_dir());
}

#[test]
fn rm_refuses_an_unmanaged_file() {
    let env = TestEnv::new();
    let plain = env.home_file(".bashrc", "x");

    let err = env
        .repo
        .remove(&plain, &StaticAnswer(true))
        .expect_err("must fail");
    assert!(
        err.to_string()
            .starts_with("not a repository-managed link")
    );
    assert_eq!(fs::read_to_string(&plain).expect("read"), "x");
}

#[test]
fn rm_refuses_a_link_that_points_elsewhere() {
    let env = TestEnv::new();
    let real = env.home_file("real.conf", "x");
    let link = env.home.join("fake.conf");
    std::os::unix::fs::symlink(&real, &link).expect("create link");

    let err = env
        .repo
        .remove(&link, &StaticAnswer(true))
        .expect_err("must fail");
    assert!(
        err.to_string()
            .starts_with("link does not point to its storage location")
    );
    assert!(link.symlink_metadata().expect("stat").is_symlink());
}

#[test]
fn add_then_rm_is_an_exact_round_trip() {
    let env = TestEnv::new();
    let file = env.home_file("notes/todo.txt", "remember the milk");

    env.repo.add(&file, false).expect("add");
    env.repo.remove(&file, &StaticAnswer(true)).expect("rm");

    assert!(!file.symlink_metadata().expect("stat").is_symlink());
    assert_eq!(
        fs::read_to_string(&file).expect("read"),
        "remember the milk"
    );
    assert!(!env.repo.files_path().join("notes").exists());
}
