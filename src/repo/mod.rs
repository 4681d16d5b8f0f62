//! Repository lifecycle: creation, structural validation, and the
//! add/remove/sync operations over the stored tree.
//!
//! A repository is a directory with two storage subtrees, `files/` (plain
//! storage, mirrored into the home directory via symlinks) and `encrypted/`
//! (reserved, currently rejected at the interface), kept under version
//! control through the injected [`Vcs`] adapter.
//!
//! Every mutating operation validates its preconditions before touching
//! anything, performs its filesystem changes, and finally stages and
//! commits.  A version-control failure therefore never leaves the
//! filesystem half-mutated: the files are in their final state and only the
//! commit needs retrying.

pub mod sync;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::error::DotsError;
use crate::ignore::{GITKEEP, IgnoreRules};
use crate::logging::Logger;
use crate::paths::{Mapper, normalize};
use crate::prompt::{Confirm, StaticAnswer};
use crate::vcs::Vcs;

use self::sync::{Mode, SyncReport};

/// Name of the plain storage subtree.
const FILES_DIR: &str = "files";
/// Name of the reserved encrypted storage subtree.
const ENCRYPTED_DIR: &str = "encrypted";
/// Seed `.gitignore` content: decrypted scratch files must never be
/// committed.
const GITIGNORE_CONTENT: &str = "encrypted/*.cleartext\n";

/// A dotfiles repository rooted at a fixed directory.
pub struct Repository {
    root: PathBuf,
    files_path: PathBuf,
    enc_files_path: PathBuf,
    mapper: Mapper,
    ignores: IgnoreRules,
    vcs: Box<dyn Vcs>,
    log: Logger,
}

impl Repository {
    /// Assemble a repository handle.  Performs no I/O; structural checks
    /// happen per-operation via [`ensure_valid`](Self::ensure_valid) so
    /// `init` can run against a root that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Config`] when an ignore pattern fails to parse.
    pub fn new(
        root: PathBuf,
        home: PathBuf,
        ignored: &[String],
        vcs: Box<dyn Vcs>,
    ) -> Result<Self, DotsError> {
        let ignores = IgnoreRules::parse(ignored)?;
        Ok(Self {
            files_path: root.join(FILES_DIR),
            enc_files_path: root.join(ENCRYPTED_DIR),
            mapper: Mapper::new(home, root.clone()),
            root,
            ignores,
            vcs,
            log: Logger::new(),
        })
    }

    /// The repository root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The plain storage subtree (`<root>/files`).
    #[must_use]
    pub fn files_path(&self) -> &Path {
        &self.files_path
    }

    /// Verify the structural invariants every operation other than `init`
    /// relies on: both storage subtrees exist and the root is under version
    /// control.
    fn ensure_valid(&self) -> Result<(), DotsError> {
        if !self.files_path.is_dir() || !self.enc_files_path.is_dir() {
            return Err(DotsError::Config(format!(
                "repository storage missing under {} (run 'dots init' first)",
                self.root.display()
            )));
        }
        if !self.vcs.is_repository(&self.root) {
            return Err(DotsError::Config(format!(
                "{} is not version-controlled",
                self.root.display()
            )));
        }
        Ok(())
    }

    /// Create a fresh repository: storage subtrees with `.gitkeep` markers,
    /// the seed `.gitignore`, version-control init, a branch named after
    /// this host, and an initial commit.
    ///
    /// When the root already exists the user is asked before it is wiped
    /// (default no); a declined prompt returns `Ok(false)` without touching
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns an error when directory creation, file writes, or any
    /// version-control step fails.
    pub fn init(&self, host: &str, confirm: &dyn Confirm) -> Result<bool> {
        if self.root.exists() {
            let question = format!(
                "{} already exists, overwrite it (its contents will be LOST)",
                self.root.display()
            );
            if !confirm.confirm(&question) {
                self.log.info("init aborted, repository left untouched");
                return Ok(false);
            }
            fs::remove_dir_all(&self.root)
                .with_context(|| format!("removing {}", self.root.display()))?;
        }

        for dir in [&self.files_path, &self.enc_files_path] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            fs::write(dir.join(GITKEEP), "")
                .with_context(|| format!("writing {} marker in {}", GITKEEP, dir.display()))?;
        }
        fs::write(self.root.join(".gitignore"), GITIGNORE_CONTENT)
            .with_context(|| format!("writing .gitignore in {}", self.root.display()))?;

        self.vcs.init(&self.root)?;
        self.vcs.checkout_new_branch(&self.root, host)?;
        self.vcs.stage_all(&self.root)?;
        self.vcs.commit(&self.root, "initialize repository")?;

        self.log.info(&format!(
            "initialized repository at {} on branch {host}",
            self.root.display()
        ));
        Ok(true)
    }

    /// Move a home-directory file into storage and leave a symlink behind.
    ///
    /// The original location keeps working immediately through the link, so
    /// the operation is transparent to anything reading the file.
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Unsupported`] for `encrypted`,
    /// [`DotsError::Validation`] when a precondition fails (all checks run
    /// before any mutation), and [`DotsError::Vcs`] when the commit fails.
    pub fn add(&self, source: &Path, encrypted: bool) -> Result<()> {
        if encrypted {
            return Err(DotsError::Unsupported("encrypted storage").into());
        }
        self.ensure_valid()?;

        let source = normalize(source);
        let meta = fs::symlink_metadata(&source)
            .map_err(|_| DotsError::validation(&source, "file not found"))?;
        if meta.file_type().is_symlink() {
            return Err(DotsError::validation(&source, "file is already a symlink").into());
        }
        let rel = self
            .mapper
            .stored_rel(&source)
            .ok_or_else(|| DotsError::validation(&source, "file is outside the home directory"))?;
        if source.starts_with(&self.root) {
            return Err(DotsError::validation(&source, "file is inside the repository").into());
        }
        if !meta.is_file() {
            return Err(DotsError::validation(&source, "not a regular file").into());
        }
        let stored = self.files_path.join(&rel);
        if stored.symlink_metadata().is_ok() {
            return Err(DotsError::validation(&source, "file is already managed").into());
        }

        if let Some(parent) = stored.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        move_file(&source, &stored)?;
        std::os::unix::fs::symlink(&stored, &source).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                source.display(),
                stored.display()
            )
        })?;

        self.vcs.stage_all(&self.root)?;
        self.vcs.commit(&self.root, &format!("add {}", rel.display()))?;

        self.log.info(&format!("added {}", rel.display()));
        Ok(())
    }

    /// Restore a managed file to its home-directory location: delete the
    /// symlink, move the stored copy back, and prune storage directories
    /// the move left empty (each deletion behind a confirmation; a declined
    /// prompt stops pruning without failing the removal).
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Validation`] when `target` is not a link
    /// resolving to its expected storage location, and [`DotsError::Vcs`]
    /// when the commit fails.
    pub fn remove(&self, target: &Path, confirm: &dyn Confirm) -> Result<()> {
        self.ensure_valid()?;

        let target = normalize(target);
        let dest = fs::read_link(&target)
            .map_err(|_| DotsError::validation(&target, "not a repository-managed link"))?;
        let resolved = if dest.is_absolute() {
            normalize(&dest)
        } else {
            target
                .parent()
                .map_or_else(|| dest.clone(), |p| normalize(&p.join(&dest)))
        };
        let rel = self
            .mapper
            .stored_rel(&target)
            .ok_or_else(|| DotsError::validation(&target, "file is outside the home directory"))?;
        let stored = self.files_path.join(&rel);
        if resolved != stored {
            return Err(DotsError::validation(
                &target,
                "link does not point to its storage location",
            )
            .into());
        }
        if !stored.is_file() {
            return Err(DotsError::validation(&stored, "stored copy missing").into());
        }

        fs::remove_file(&target)
            .with_context(|| format!("removing link {}", target.display()))?;
        move_file(&stored, &target)?;
        if let Some(parent) = stored.parent() {
            self.prune_empty_dirs(parent, confirm)?;
        }

        self.vcs.stage_all(&self.root)?;
        self.vcs
            .commit(&self.root, &format!("remove {}", rel.display()))?;

        self.log.info(&format!("removed {}", rel.display()));
        Ok(())
    }

    /// Walk upward from `from`, deleting directories the removal left
    /// empty.  Stops at the storage root (never deleted), at the first
    /// non-empty directory, or at the first declined confirmation.
    fn prune_empty_dirs(&self, from: &Path, confirm: &dyn Confirm) -> Result<()> {
        let mut dir = from;
        while dir != self.files_path && dir.starts_with(&self.files_path) {
            let mut entries = fs::read_dir(dir)
                .with_context(|| format!("reading directory {}", dir.display()))?;
            if entries.next().is_some() {
                break;
            }
            if !confirm.confirm(&format!("remove empty directory {}", dir.display())) {
                break;
            }
            fs::remove_dir(dir)
                .with_context(|| format!("removing directory {}", dir.display()))?;
            self.log.debug(&format!("pruned {}", dir.display()));
            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        Ok(())
    }

    /// Reconcile the home directory against storage: plan (walk + classify)
    /// then apply per `mode`.  Safe to re-run; an already-converged tree is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DotsError::Config`] when the repository structure is
    /// invalid, otherwise only unexpected I/O failures.
    pub fn sync(&self, mode: Mode, force: bool, confirm: &dyn Confirm) -> Result<SyncReport> {
        self.ensure_valid()?;
        let plan = sync::plan(&self.files_path, &self.mapper, &self.ignores)?;
        sync::apply(&plan, mode, force, confirm, &self.log)
    }

    /// Report link status for every stored file without mutating anything.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`sync`](Self::sync).
    pub fn list(&self) -> Result<SyncReport> {
        self.sync(Mode::ListOnly, false, &StaticAnswer(false))
    }
}

/// Move a file, falling back to copy-and-delete when a rename crosses
/// filesystems.
fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    fs::copy(src, dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    fs::remove_file(src).with_context(|| format!("removing {}", src.display()))?;
    Ok(())
}
