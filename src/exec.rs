//! External process execution, used for git and hostname lookup.

use std::path::Path;
use std::process::Command;

use anyhow::{Context as _, Result, bail};

/// Run a program and return its stdout.
///
/// # Errors
///
/// Returns an error if the program cannot be started or exits non-zero
/// (with its trimmed stderr in the message).
pub fn run(program: &str, args: &[&str]) -> Result<String> {
    capture(Command::new(program).args(args), program)
}

/// Run a program in `dir` and return its stdout.
///
/// # Errors
///
/// Same failure modes as [`run`].
pub fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<String> {
    let label = format!("{program} in {}", dir.display());
    capture(Command::new(program).args(args).current_dir(dir), &label)
}

fn capture(cmd: &mut Command, label: &str) -> Result<String> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute {label}"))?;
    if !output.status.success() {
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        bail!(
            "{label} exited with {code}: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Best-effort hostname of the current machine.
///
/// Checks the `HOSTNAME` environment variable first, then the `hostname`
/// binary, then falls back to `"localhost"`.  Feeds the host-specific
/// configuration section and the host branch created by `init`.
#[must_use]
pub fn hostname() -> String {
    let from_env = std::env::var("HOSTNAME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if let Some(name) = from_env {
        return name;
    }
    run("hostname", &[])
        .ok()
        .map(|out| out.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let out = run("echo", &["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        assert!(run("false", &[]).is_err());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = run("this-program-does-not-exist-12345", &[]).unwrap_err();
        assert!(err.to_string().contains("failed to execute"));
    }

    #[test]
    fn run_in_honors_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_in(dir.path(), "pwd", &[]).unwrap();
        // The temp dir may sit behind a symlink; compare canonical forms.
        assert_eq!(
            std::fs::canonicalize(out.trim()).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
    }

    #[test]
    fn hostname_is_never_empty() {
        assert!(!hostname().is_empty());
    }
}
