//! Glob-based ignore rules for stored files.
//!
//! Two matching modes, decided per rule by its first character:
//!
//! - `/pattern` (anchored) — matched against the full repository-relative
//!   path, which always carries a leading separator (see
//!   [`Mapper::repo_rel`](crate::paths::Mapper::repo_rel)).
//! - `pattern` (bare) — matched against the basename only, so `*.bak`
//!   applies everywhere while `/files/secrets/*` pins a subtree.
//!
//! Matching uses shell-glob semantics (`*`, `?`, `[seq]`) via
//! [`glob::Pattern`].  The first matching rule short-circuits.

use std::path::Path;

use glob::Pattern;

use crate::error::DotsError;

/// Marker file that keeps otherwise-empty storage directories trackable;
/// always implicitly ignored.
pub const GITKEEP: &str = ".gitkeep";

/// A single ignore rule, pre-parsed into its matching mode.
#[derive(Debug, Clone)]
enum IgnoreRule {
    /// Leading-`/` rule, matched against the repository-relative path.
    Anchored(Pattern),
    /// Bare rule, matched against the basename only.
    Basename(Pattern),
}

/// The configured set of ignore rules, read-only during a run.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Parse the configured pattern list.
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Config`] when a pattern is not valid glob
    /// syntax, naming the offending pattern.
    pub fn parse(patterns: &[String]) -> Result<Self, DotsError> {
        let mut rules = Vec::with_capacity(patterns.len());
        for raw in patterns {
            let pattern = Pattern::new(raw).map_err(|e| {
                DotsError::Config(format!("invalid ignore pattern '{raw}': {e}"))
            })?;
            if raw.starts_with('/') {
                rules.push(IgnoreRule::Anchored(pattern));
            } else {
                rules.push(IgnoreRule::Basename(pattern));
            }
        }
        Ok(Self { rules })
    }

    /// Whether a stored file is ignored.
    ///
    /// `repo_rel` is the repository-relative path with its leading
    /// separator; `basename` is the file name alone.
    #[must_use]
    pub fn is_ignored(&self, basename: &str, repo_rel: &Path) -> bool {
        if basename == GITKEEP {
            return true;
        }
        let repo_rel = repo_rel.to_string_lossy();
        self.rules.iter().any(|rule| match rule {
            IgnoreRule::Anchored(p) => p.matches(&repo_rel),
            IgnoreRule::Basename(p) => p.matches(basename),
        })
    }
}
