use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dots tool.
#[derive(Parser, Debug)]
#[command(
    name = "dots",
    about = "Centralize dotfiles in a version-controlled repository via symlinks",
    version = option_env!("DOTS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the configuration file (default ~/.dots.conf)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the repository directory from the configuration
    #[arg(long, global = true)]
    pub repo_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new repository
    Init,
    /// Show the link status of every stored file
    List,
    /// Move a file into the repository and symlink it back
    Add(AddOpts),
    /// Restore a managed file to its original location
    Rm(RmOpts),
    /// Create missing symlinks for all stored files
    Sync(SyncOpts),
}

/// Options for the `add` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AddOpts {
    /// File to move into the repository
    pub file: PathBuf,

    /// Store the file encrypted
    #[arg(short, long)]
    pub encrypted: bool,
}

/// Options for the `rm` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RmOpts {
    /// Managed file to restore
    pub file: PathBuf,

    /// Do not prompt before deleting emptied storage directories
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Replace conflicting files and links without prompting
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_force() {
        let cli = Cli::parse_from(["dots", "sync", "--force"]);
        assert!(matches!(cli.command, Command::Sync(SyncOpts { force: true })));
    }

    #[test]
    fn parse_sync_force_short() {
        let cli = Cli::parse_from(["dots", "sync", "-f"]);
        assert!(matches!(cli.command, Command::Sync(SyncOpts { force: true })));
    }

    #[test]
    fn parse_add_with_encrypted() {
        let cli = Cli::parse_from(["dots", "add", "-e", "/home/user/.netrc"]);
        if let Command::Add(opts) = cli.command {
            assert!(opts.encrypted);
            assert_eq!(opts.file, PathBuf::from("/home/user/.netrc"));
        } else {
            panic!("expected add command");
        }
    }

    #[test]
    fn parse_rm_quiet() {
        let cli = Cli::parse_from(["dots", "rm", "--quiet", ".bashrc"]);
        if let Command::Rm(opts) = cli.command {
            assert!(opts.quiet);
            assert_eq!(opts.file, PathBuf::from(".bashrc"));
        } else {
            panic!("expected rm command");
        }
    }

    #[test]
    fn parse_global_config_before_subcommand() {
        let cli = Cli::parse_from(["dots", "--config", "/tmp/alt.conf", "list"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/alt.conf")));
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn parse_global_repo_dir_after_subcommand() {
        let cli = Cli::parse_from(["dots", "init", "--repo-dir", "/tmp/repo"]);
        assert_eq!(cli.global.repo_dir, Some(PathBuf::from("/tmp/repo")));
        assert!(matches!(cli.command, Command::Init));
    }

    #[test]
    fn parse_verbose_global() {
        let cli = Cli::parse_from(["dots", "-v", "list"]);
        assert!(cli.verbose);
    }
}
