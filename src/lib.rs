//! Dotfiles repository engine.
//!
//! Centralizes configuration files in one version-controlled directory and
//! exposes them in the home directory through symlinks: `add` moves a file
//! into storage and links it back, `sync` materializes links for every
//! stored file, `rm` restores a file to its original location, and every
//! mutation lands as a git commit.
//!
//! The public API is organised into three layers:
//!
//! - **[`config`]**, **[`paths`]**, **[`ignore`]** — settings, path
//!   translation, and ignore matching (pure, no I/O beyond reading config)
//! - **[`repo`]** — the repository lifecycle and the plan/apply reconciler
//! - **[`commands`]** — top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod ignore;
pub mod logging;
pub mod paths;
pub mod prompt;
pub mod repo;
pub mod vcs;
