//! Tree object
//!
//! A tree is the ordered listing of every path captured by a commit. Entries
//! are kept sorted byte-wise ascending by path, which makes the encoding a
//! pure function of the entry set: the same entries in any input order
//! produce the same fingerprint.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <path>\0<20-byte-fingerprint>`

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Decodable, Encodable, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// One tree entry: permission mode plus child fingerprint
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeRecord {
    pub mode: EntryMode,
    pub fingerprint: ObjectId,
}

/// Directory snapshot mapping paths to blob fingerprints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeRecord>,
}

impl Tree {
    /// Build a tree from staged index entries.
    ///
    /// Entries are sorted by path regardless of input order. Should two
    /// entries collide on path, the last one wins — the same upsert rule the
    /// staging index applies, so index-fed trees never actually collide.
    pub fn build<'e>(entries: impl Iterator<Item = &'e IndexEntry>) -> Self {
        let mut tree = Self::default();

        for entry in entries {
            tree.put(
                entry.path.clone(),
                TreeRecord::new(entry.mode, entry.fingerprint.clone()),
            );
        }

        tree
    }

    pub fn put(&mut self, path: String, record: TreeRecord) {
        self.entries.insert(path, record);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeRecord)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Encodable for Tree {
    fn encode(&self) -> Result<Bytes> {
        let mut content_bytes = Vec::new();

        for (path, record) in &self.entries {
            let header = format!("{} {}", record.mode.as_str(), path);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            record.fingerprint.write_raw_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.kind().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Decodable for Tree {
    fn decode(reader: impl BufRead) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut path_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(Error::corrupt("unexpected EOF in tree entry mode"));
            }

            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|_| Error::corrupt("tree entry mode is not valid utf-8"))
                .and_then(EntryMode::try_from)?;

            path_bytes.clear();
            let n = reader.read_until(b'\0', &mut path_bytes)?;
            if n == 0 || path_bytes.pop() != Some(b'\0') {
                return Err(Error::corrupt("unexpected EOF in tree entry path"));
            }
            let path = std::str::from_utf8(&path_bytes)
                .map_err(|_| Error::corrupt("tree entry path is not valid utf-8"))?
                .to_owned();

            let fingerprint = ObjectId::read_raw_from(&mut reader)
                .map_err(|_| Error::corrupt("unexpected EOF in tree entry fingerprint"))?;

            entries.insert(path, TreeRecord::new(mode, fingerprint));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(path, record)| {
                format!(
                    "{} blob {}\t{}",
                    record.mode.as_str(),
                    record.fingerprint.as_ref(),
                    path
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
