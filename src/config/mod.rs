//! Configuration file loading for the dots tool.
//!
//! The configuration lives in a single INI file (default `~/.dots.conf`)
//! with a `[DEFAULT]` section and optional per-host sections keyed by
//! hostname, whose values override the defaults on that machine.

pub mod ini;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default repository location, relative to the home directory.
const DEFAULT_REPO_DIR: &str = "~/dots";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Repository root directory (`~` expanded).
    pub repo_dir: PathBuf,
    /// GPG key for encrypted storage.  Reserved; unused by the core.
    pub gpg_key_id: Option<String>,
    /// Glob patterns for files that sync should skip.
    pub ignored_files: Vec<String>,
}

impl Settings {
    /// Load settings from `path`, merging `[DEFAULT]` with the section
    /// matching `hostname` (host values win).  A missing file yields pure
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path, hostname: &str, home: &Path) -> Result<Self> {
        let sections = ini::parse_sections(path)
            .with_context(|| format!("loading config {}", path.display()))?;

        let mut settings = Self::defaults(home);
        // DEFAULT first, then the host section, so host keys override.
        for header in ["DEFAULT", hostname] {
            if let Some(section) = sections.iter().find(|s| s.header == header) {
                settings.apply(section, home);
            }
        }
        Ok(settings)
    }

    /// The built-in defaults for a given home directory.
    #[must_use]
    pub fn defaults(home: &Path) -> Self {
        Self {
            repo_dir: expand_tilde(DEFAULT_REPO_DIR, home),
            gpg_key_id: None,
            ignored_files: Vec::new(),
        }
    }

    fn apply(&mut self, section: &ini::Section, home: &Path) {
        for (key, value) in &section.entries {
            match key.as_str() {
                "repo_dir" => self.repo_dir = expand_tilde(value, home),
                "gpg_key_id" => {
                    self.gpg_key_id = if value.is_empty() {
                        None
                    } else {
                        Some(value.clone())
                    };
                }
                "ignored_files" => {
                    self.ignored_files = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect();
                }
                // Unknown keys are tolerated so configs can be shared
                // across tool versions.
                _ => {}
            }
        }
    }
}

/// Expand a leading `~` or `~/` to the home directory.
#[must_use]
pub fn expand_tilde(value: &str, home: &Path) -> PathBuf {
    if value == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = value.strip_prefix("~/") {
        return home.join(rest);
    }
    PathBuf::from(value)
}
