//! Reference store (branches and HEAD)
//!
//! Branch pointers are text files at `<root>/refs/heads/<name>` holding a
//! commit fingerprint in hex, or nothing at all for a branch with no commit
//! yet. HEAD at `<root>/HEAD` holds `ref: refs/heads/<name>` and selects the
//! active branch.
//!
//! Pointer writes take an exclusive advisory lock. A read-modify-write of a
//! tip (read the parent, then advance the pointer) goes through
//! [`BranchLock`], which holds the lock across both steps: the tip read
//! there can never go stale before the matching update lands.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{HEADS_PREFIX, SYMREF_PREFIX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Branch name used when no HEAD record exists yet
pub const DEFAULT_BRANCH_ENV: &str = "KEG_DEFAULT_BRANCH";
const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, new)]
pub struct Refs {
    /// Repository state root (the directory holding HEAD and refs/)
    path: Box<Path>,
}

impl Refs {
    /// The configured default branch name.
    pub fn default_branch() -> String {
        std::env::var(DEFAULT_BRANCH_ENV).unwrap_or_else(|_| DEFAULT_BRANCH.to_string())
    }

    /// Mark a branch as the active one (symbolic HEAD).
    pub fn set_head(&self, branch_name: &BranchName) -> Result<()> {
        self.update_ref_file(
            &self.head_path(),
            format!("{}{}{}", SYMREF_PREFIX, HEADS_PREFIX, branch_name),
        )
    }

    /// Name of the active branch.
    ///
    /// Falls back to the default branch name when no HEAD record exists, and
    /// also when HEAD is detached (raw fingerprint content) — a detached
    /// HEAD is never rewritten or otherwise disturbed here.
    pub fn current_branch(&self) -> Result<BranchName> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return BranchName::try_parse(Self::default_branch());
        }

        let content = std::fs::read_to_string(&head_path)?;
        let content = content.trim();

        match content
            .strip_prefix(SYMREF_PREFIX)
            .and_then(|target| target.strip_prefix(HEADS_PREFIX))
        {
            Some(name) => BranchName::try_parse(name.to_string()),
            None => BranchName::try_parse(Self::default_branch()),
        }
    }

    /// Create a branch pointing at the given commit, or at nothing.
    ///
    /// A `None` tip writes an empty pointer file — the unborn-branch state a
    /// fresh repository's initial branch starts in.
    pub fn create_branch(&self, name: &BranchName, tip: Option<&ObjectId>) -> Result<()> {
        let branch_path = self.branch_path(name);

        if branch_path.exists() {
            return Err(Error::BranchExists(name.to_string()));
        }

        let raw_ref = tip.map(|oid| oid.as_ref().to_string()).unwrap_or_default();
        self.update_ref_file(&branch_path, raw_ref)
    }

    /// Advance an existing branch's tip. The only way a tip ever moves.
    pub fn update_branch(&self, name: &BranchName, tip: &ObjectId) -> Result<()> {
        self.lock_branch(name)?.set_tip(tip)
    }

    /// Exclusively lock a branch pointer for a read-modify-write.
    ///
    /// Fails with `NoSuchBranch` if the branch was never created. The lock
    /// is released when the returned handle is dropped.
    pub fn lock_branch(&self, name: &BranchName) -> Result<BranchLock> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Err(Error::NoSuchBranch(name.to_string()));
        }

        let branch_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&branch_path)?;
        let guard = file_guard::lock(Box::new(branch_file), Lock::Exclusive, 0, 1)?;

        Ok(BranchLock { guard })
    }

    /// Commit the branch points at, or `None` for a branch with no commit yet.
    pub fn branch_commit(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Err(Error::NoSuchBranch(name.to_string()));
        }

        let content = std::fs::read_to_string(&branch_path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// All branch names, `/`-nested ones included.
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    /// Delete a branch pointer. The active branch cannot be deleted.
    pub fn delete_branch(&self, name: &BranchName) -> Result<()> {
        if *name == self.current_branch()? {
            return Err(Error::CannotDeleteCurrent(name.to_string()));
        }

        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Err(Error::NoSuchBranch(name.to_string()));
        }

        std::fs::remove_file(&branch_path)?;
        self.prune_empty_parent_dirs(&branch_path)?;

        Ok(())
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::corrupt("ref path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut lock = file_guard::lock(&mut ref_file, file_guard::Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.heads_path().join(name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}

/// Exclusive hold on one branch pointer file.
///
/// The advisory lock stays pinned from the first `tip` read until the handle
/// is dropped, so the tip seen through this handle is still the tip on disk
/// when `set_tip` lands.
#[derive(Debug)]
pub struct BranchLock {
    guard: FileGuard<Box<File>>,
}

impl BranchLock {
    /// Commit the branch points at, `None` for a branch with no commit yet.
    pub fn tip(&mut self) -> Result<Option<ObjectId>> {
        let branch_file = self.guard.deref_mut();
        branch_file.seek(SeekFrom::Start(0))?;

        let mut content = String::new();
        branch_file.read_to_string(&mut content)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// Advance the locked branch's tip.
    pub fn set_tip(&mut self, tip: &ObjectId) -> Result<()> {
        let branch_file = self.guard.deref_mut();
        branch_file.set_len(0)?;
        branch_file.seek(SeekFrom::Start(0))?;
        branch_file.write_all(tip.as_ref().as_bytes())?;

        Ok(())
    }
}
