//! Filesystem reconciliation: walk the stored tree, classify every file's
//! link status at its home-directory target, and bring targets into line.
//!
//! The work is split into a pure *plan* phase (walk + classify, read-only)
//! and an *apply* phase that executes the plan, so list-only mode and
//! mutation mode share one planner.  Classification is recomputed fresh on
//! every pass from live filesystem state — never cached across runs — which
//! makes re-running the natural retry mechanism: every transition is
//! independently idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::ignore::IgnoreRules;
use crate::logging::Logger;
use crate::paths::{Mapper, normalize};
use crate::prompt::Confirm;

/// Relationship between a stored file and its home-directory target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// No entry at the target path.
    Missing,
    /// Target is a symlink resolving to the stored file.
    CorrectLink,
    /// Target is a symlink resolving elsewhere.
    WrongLink {
        /// Where the existing link actually points.
        actual: PathBuf,
    },
    /// Target exists and is a plain file or directory, not a link.
    RegularFileConflict,
}

/// Whether a pass may mutate the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report only; never touch the filesystem.
    ListOnly,
    /// Create and replace links.
    Apply,
}

/// One stored file with its classified state and mapped target.
#[derive(Debug, Clone)]
pub struct PlannedLink {
    /// The canonical copy under the repository's storage tree.
    pub stored: PathBuf,
    /// The home-directory location where the link belongs.
    pub target: PathBuf,
    /// Link status at plan time.
    pub state: LinkState,
}

/// Outcome counts for one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Targets already linked correctly.
    pub ok: u32,
    /// Links created (apply mode).
    pub created: u32,
    /// Conflicting entries replaced by links (apply mode).
    pub replaced: u32,
    /// Conflicts left in place after a declined confirmation.
    pub skipped: u32,
    /// Targets that would gain a link (list-only mode).
    pub missing: u32,
    /// Conflicts reported (list-only mode).
    pub conflicts: u32,
}

impl SyncReport {
    /// Whether the pass changed the filesystem.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.created > 0 || self.replaced > 0
    }
}

/// Classify the link status of `target` with respect to `stored`.
///
/// Determined solely from current filesystem state.
#[must_use]
pub fn classify(stored: &Path, target: &Path) -> LinkState {
    match fs::read_link(target) {
        Ok(dest) => {
            let resolved = if dest.is_absolute() {
                dest
            } else {
                target.parent().map_or(dest.clone(), |p| p.join(&dest))
            };
            if paths_equal(&resolved, stored) {
                LinkState::CorrectLink
            } else {
                LinkState::WrongLink { actual: resolved }
            }
        }
        // Not a symlink: either nothing is there, or a real file/dir is.
        Err(_) => {
            if target.symlink_metadata().is_ok() {
                LinkState::RegularFileConflict
            } else {
                LinkState::Missing
            }
        }
    }
}

/// Walk the storage tree and classify every non-ignored file.
///
/// Directory entries are visited in name order so listings are
/// reproducible within a run.  Read-only.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn plan(
    files_path: &Path,
    mapper: &Mapper,
    ignores: &IgnoreRules,
) -> Result<Vec<PlannedLink>> {
    let mut out = Vec::new();
    walk(files_path, files_path, mapper, ignores, &mut out)?;
    Ok(out)
}

fn walk(
    dir: &Path,
    files_path: &Path,
    mapper: &Mapper,
    ignores: &IgnoreRules,
    out: &mut Vec<PlannedLink>,
) -> Result<()> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("reading entry in {}", dir.display()))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading file type of {}", path.display()))?;
        if file_type.is_dir() {
            walk(&path, files_path, mapper, ignores, out)?;
            continue;
        }

        let basename = entry.file_name().to_string_lossy().into_owned();
        if ignores.is_ignored(&basename, &mapper.repo_rel(&path)) {
            continue;
        }

        let rel = path
            .strip_prefix(files_path)
            .with_context(|| format!("stored file outside storage tree: {}", path.display()))?;
        let target = mapper.target_path(rel);
        let state = classify(&path, &target);
        out.push(PlannedLink {
            stored: path,
            target,
            state,
        });
    }
    Ok(())
}

/// Execute a plan.
///
/// In [`Mode::ListOnly`] nothing is mutated; every state is only reported.
/// In [`Mode::Apply`], missing links are created and conflicts are resolved
/// per file: `force` replaces unconditionally, otherwise the confirmer
/// decides (default no) and a declined file is skipped — the pass always
/// continues to the next file.  Replacing a regular file is destructive and
/// is called out as such.
///
/// # Errors
///
/// Only filesystem errors outside the expected conflict states (permission
/// denied, I/O failure) abort the run.
pub fn apply(
    plan: &[PlannedLink],
    mode: Mode,
    force: bool,
    confirm: &dyn Confirm,
    log: &Logger,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for item in plan {
        match &item.state {
            LinkState::CorrectLink => {
                log.debug(&format!("ok: {}", item.target.display()));
                report.ok += 1;
            }
            LinkState::Missing => {
                if mode == Mode::ListOnly {
                    log.info(&format!("missing: {}", item.target.display()));
                    report.missing += 1;
                } else {
                    create_link(&item.stored, &item.target)?;
                    log.info(&format!(
                        "synced: {} -> {}",
                        item.target.display(),
                        item.stored.display()
                    ));
                    report.created += 1;
                }
            }
            LinkState::WrongLink { actual } => {
                if mode == Mode::ListOnly {
                    log.warn(&format!(
                        "conflict: {} points to {}",
                        item.target.display(),
                        actual.display()
                    ));
                    report.conflicts += 1;
                } else {
                    let question = format!(
                        "{} points to {}, relink it",
                        item.target.display(),
                        actual.display()
                    );
                    resolve_conflict(item, force, confirm, &question, log, &mut report)?;
                }
            }
            LinkState::RegularFileConflict => {
                if mode == Mode::ListOnly {
                    log.warn(&format!(
                        "conflict: {} exists and is not a link",
                        item.target.display()
                    ));
                    report.conflicts += 1;
                } else {
                    let question = format!(
                        "{} exists, replace it (its contents will be LOST)",
                        item.target.display()
                    );
                    resolve_conflict(item, force, confirm, &question, log, &mut report)?;
                }
            }
        }
    }

    Ok(report)
}

/// Force-or-prompt-or-skip policy shared by both conflict states.
fn resolve_conflict(
    item: &PlannedLink,
    force: bool,
    confirm: &dyn Confirm,
    question: &str,
    log: &Logger,
    report: &mut SyncReport,
) -> Result<()> {
    if force || confirm.confirm(question) {
        remove_entry(&item.target)?;
        create_link(&item.stored, &item.target)?;
        log.info(&format!(
            "replaced: {} -> {}",
            item.target.display(),
            item.stored.display()
        ));
        report.replaced += 1;
    } else {
        log.warn(&format!("skipped: {}", item.target.display()));
        report.skipped += 1;
    }
    Ok(())
}

/// Create a symlink at `target` pointing to `stored`, creating parent
/// directories as needed.
fn create_link(stored: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    std::os::unix::fs::symlink(stored, target).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            target.display(),
            stored.display()
        )
    })?;
    Ok(())
}

/// Remove whatever sits at `path`: a link or file via `remove_file`, a real
/// directory via `remove_dir_all` (the destructive case the caller has
/// already confirmed).
fn remove_entry(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("removing directory: {}", path.display()))?;
    } else {
        fs::remove_file(path).with_context(|| format!("removing: {}", path.display()))?;
    }
    Ok(())
}

/// Compare two paths, lexically first, then through canonicalization (which
/// handles symlinked parents such as `/tmp` on some systems).
fn paths_equal(a: &Path, b: &Path) -> bool {
    if normalize(a) == normalize(b) {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
