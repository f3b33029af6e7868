//! Staging index
//!
//! The index tracks the entries that will make up the next commit. It is an
//! ordered set of path → blob fingerprint records, persisted as JSON at
//! `<root>/index` and fully replaced on every mutation — never patched in
//! place.
//!
//! ## Locking
//!
//! Readers load through `rehydrate`, which takes a shared advisory lock for
//! the duration of the read. Mutating operations load through
//! `rehydrate_for_update`, which takes an exclusive lock and holds it until
//! `write_updates` has persisted the new state: the whole read-modify-write
//! happens under one lock, and a concurrent process cannot slip its own load
//! or store in between.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{Error, Result};
use file_guard::{FileGuard, Lock};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;

pub struct Index {
    /// Path to the index file
    path: Box<Path>,
    /// Staged entries keyed by path; BTreeMap iteration gives the byte-wise
    /// ascending path order tree construction relies on
    entries: BTreeMap<String, IndexEntry>,
    /// Set when the in-memory state has diverged from disk
    changed: bool,
    /// Exclusive lock pinned by `rehydrate_for_update`, released by
    /// `write_updates`
    held_lock: Option<FileGuard<Box<File>>>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
            held_lock: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index for reading, replacing any in-memory state.
    ///
    /// The shared lock is released before this returns.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.reset();

        if !self.path.exists() {
            File::create(&self.path)?;
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        drop(lock);

        self.load_entries(&content);

        Ok(())
    }

    /// Load the index for a mutation.
    ///
    /// Takes an exclusive lock on the index file and keeps it until
    /// `write_updates` runs, so the entries seen here are still the entries
    /// on disk when the new state is persisted.
    pub fn rehydrate_for_update(&mut self) -> Result<()> {
        self.reset();

        let index_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(Box::new(index_file), Lock::Exclusive, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        self.load_entries(&content);

        self.held_lock = Some(lock);

        Ok(())
    }

    /// A missing or empty file yields an empty index. An unparseable file is
    /// the one sanctioned repair case: log a warning and reset to empty
    /// rather than fail every later operation on a broken staging area.
    fn load_entries(&mut self, content: &str) {
        if content.trim().is_empty() {
            return;
        }

        match serde_json::from_str::<Vec<IndexEntry>>(content) {
            Ok(records) => {
                for record in records {
                    self.entries.insert(record.path.clone(), record);
                }
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "index file is unreadable, resetting to empty");
                self.entries.clear();
            }
        }
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.changed = false;
        self.held_lock = None;
    }

    /// Upsert an entry: any existing entry for the path is replaced.
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.path.clone(), entry);
        self.changed = true;
    }

    /// Drop the entry for a path.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        match self.entries.remove(path) {
            Some(_) => {
                self.changed = true;
                Ok(())
            }
            None => Err(Error::NotStaged(path.to_string())),
        }
    }

    /// Drop every entry (after a successful commit).
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Staged entries in ascending path order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the full entry list, replacing the file content, and release
    /// the update lock. A load that saw no mutation leaves the file alone.
    pub fn write_updates(&mut self) -> Result<()> {
        let mut lock = match self.held_lock.take() {
            Some(lock) => lock,
            None => {
                let index_file = std::fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create(true)
                    .open(&self.path)?;
                file_guard::lock(Box::new(index_file), Lock::Exclusive, 0, 1)?
            }
        };

        if !self.changed {
            return Ok(());
        }

        let records: Vec<&IndexEntry> = self.entries.values().collect();
        let content = serde_json::to_vec_pretty(&records)?;

        let index_file = lock.deref_mut();
        index_file.set_len(0)?;
        index_file.seek(SeekFrom::Start(0))?;
        index_file.write_all(&content)?;

        self.changed = false;

        Ok(())
    }
}
