use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

/// Produce the canonical byte encoding `"<kind> <len>\0<payload>"`.
pub trait Encodable {
    fn encode(&self) -> Result<Bytes>;
}

/// Rebuild an object from its payload (the header has already been consumed).
pub trait Decodable {
    fn decode(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Encodable {
    fn kind(&self) -> ObjectKind;

    fn display(&self) -> String;

    /// Fingerprint of the object: SHA-1 over the full canonical encoding.
    ///
    /// Deterministic: identical payload of the same kind always yields the
    /// identical fingerprint.
    fn fingerprint(&self) -> Result<ObjectId> {
        let content = self.encode()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let digest = hasher.finalize();
        ObjectId::try_parse(format!("{digest:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.fingerprint()?.to_path())
    }
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectBox::Blob(_) => ObjectKind::Blob,
            ObjectBox::Tree(_) => ObjectKind::Tree,
            ObjectBox::Commit(_) => ObjectKind::Commit,
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
