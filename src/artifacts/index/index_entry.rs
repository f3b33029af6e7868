//! Staging entry record
//!
//! Each entry maps one relative path to the blob fingerprint staged for it,
//! together with its permission mode and the moment it was staged.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One staged path → blob mapping
///
/// The record shape is fixed: loading a file with unknown or missing fields
/// fails instead of silently defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(deny_unknown_fields)]
pub struct IndexEntry {
    /// Path relative to the repository root (unique key)
    pub path: String,
    /// Fingerprint of the staged blob
    pub fingerprint: ObjectId,
    /// Permission mode recorded for the path
    pub mode: EntryMode,
    /// When the entry was staged
    pub staged_at: chrono::DateTime<chrono::Utc>,
}

impl IndexEntry {
    pub fn staged_now(path: String, fingerprint: ObjectId, mode: EntryMode) -> Self {
        Self::new(path, fingerprint, mode, chrono::Utc::now())
    }
}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.path.cmp(&other.path)
    }
}
