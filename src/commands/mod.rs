//! Top-level subcommand orchestration.
//!
//! Each submodule owns one subcommand and stays thin: resolve the
//! environment, open the repository, call into [`repo`](crate::repo), and
//! report.  The shared setup sequence lives here so the commands do not
//! repeat it.

pub mod add;
pub mod init;
pub mod list;
pub mod rm;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::exec;
use crate::paths::normalize;
use crate::repo::Repository;
use crate::vcs::Git;

/// Default configuration file name under the home directory.
const CONFIG_FILE: &str = ".dots.conf";

/// Shared state produced by the common command setup sequence.
pub struct CommandSetup {
    pub repo: Repository,
    pub hostname: String,
}

impl CommandSetup {
    /// Resolve the home directory, load configuration, and open the
    /// repository handle.  Performs no repository I/O; structural
    /// validation happens inside each operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// configuration file fails to parse.
    pub fn init(global: &GlobalOpts) -> Result<Self> {
        let home = resolve_home()?;
        let hostname = exec::hostname();

        let config_path = global
            .config
            .clone()
            .unwrap_or_else(|| home.join(CONFIG_FILE));
        let settings = Settings::load(&config_path, &hostname, &home)?;

        // Command line beats configuration.
        let repo_dir = global
            .repo_dir
            .clone()
            .unwrap_or_else(|| settings.repo_dir.clone());

        let repo = Repository::new(repo_dir, home, &settings.ignored_files, Box::new(Git))?;
        Ok(Self { repo, hostname })
    }
}

/// The current user's home directory: `$HOME` if set, otherwise the
/// platform lookup.
fn resolve_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    match dirs::home_dir() {
        Some(home) => Ok(home),
        None => bail!("cannot determine home directory"),
    }
}

/// Turn a user-supplied path into an absolute, lexically normalized one.
fn resolve_input_path(path: &Path) -> Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(path)
    };
    Ok(normalize(&abs))
}
