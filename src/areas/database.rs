//! Object store
//!
//! Persists immutable objects keyed by their content fingerprint at
//! `objects/<first-2-hex>/<remaining-hex>`, each file holding the canonical
//! encoding `"<kind> <byte-length>\0<payload>"` verbatim. Objects are
//! write-once: storing identical content twice is a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Decodable, Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{Cursor, Write};
use std::path::Path;

#[derive(Debug, new)]
pub struct Database {
    /// Path to the objects directory
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object and return its fingerprint.
    ///
    /// Idempotent: if the object file already exists the content is left
    /// untouched and the same fingerprint is returned. New objects are
    /// written to a temp file and renamed into place so a crash never leaves
    /// a half-written object under a valid fingerprint.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let fingerprint = object.fingerprint()?;
        let object_path = self.path.join(fingerprint.to_path());

        if !object_path.exists() {
            let parent = object_path
                .parent()
                .ok_or_else(|| Error::corrupt("object path has no parent directory"))?;
            std::fs::create_dir_all(parent)?;

            self.write_object(&object_path, object.encode()?)?;
            tracing::debug!(kind = %object.kind(), %fingerprint, "stored object");
        }

        Ok(fingerprint)
    }

    /// Read the full canonical encoding of an object.
    pub fn load(&self, fingerprint: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(fingerprint.to_path());

        match std::fs::read(&object_path) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(fingerprint.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Retrieve an object as its kind plus raw payload.
    ///
    /// Fails with `NotFound` when no object exists under the fingerprint and
    /// with `Corrupt` when the stored encoding cannot be parsed or its
    /// declared length disagrees with the payload.
    pub fn retrieve(&self, fingerprint: &ObjectId) -> Result<(ObjectKind, Bytes)> {
        let content = self.load(fingerprint)?;
        let mut reader = Cursor::new(content);

        let (kind, declared_len) = ObjectKind::parse_header(&mut reader)?;
        let payload_start = reader.position() as usize;
        let payload = reader.into_inner().slice(payload_start..);

        if payload.len() != declared_len {
            return Err(Error::corrupt(format!(
                "object {fingerprint} declares {declared_len} bytes but carries {}",
                payload.len()
            )));
        }

        Ok((kind, payload))
    }

    /// Parse an object into its typed representation.
    pub fn parse_object(&self, fingerprint: &ObjectId) -> Result<ObjectBox> {
        let (kind, payload) = self.retrieve(fingerprint)?;
        let reader = Cursor::new(payload);

        match kind {
            ObjectKind::Blob => Ok(ObjectBox::Blob(Box::new(Blob::decode(reader)?))),
            ObjectKind::Tree => Ok(ObjectBox::Tree(Box::new(Tree::decode(reader)?))),
            ObjectKind::Commit => Ok(ObjectBox::Commit(Box::new(Commit::decode(reader)?))),
        }
    }

    pub fn parse_blob(&self, fingerprint: &ObjectId) -> Result<Blob> {
        match self.parse_object(fingerprint)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            _ => Err(Error::NotABlob(fingerprint.clone())),
        }
    }

    pub fn parse_tree(&self, fingerprint: &ObjectId) -> Result<Tree> {
        match self.parse_object(fingerprint)? {
            ObjectBox::Tree(tree) => Ok(*tree),
            _ => Err(Error::NotATree(fingerprint.clone())),
        }
    }

    pub fn parse_commit(&self, fingerprint: &ObjectId) -> Result<Commit> {
        match self.parse_object(fingerprint)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            _ => Err(Error::NotACommit(fingerprint.clone())),
        }
    }

    fn write_object(&self, object_path: &Path, content: Bytes) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::corrupt("object path has no parent directory"))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;
        file.write_all(&content)?;

        // rename the temp file onto the object path to make the write atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!(
            "tmp-obj-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        )
    }
}
