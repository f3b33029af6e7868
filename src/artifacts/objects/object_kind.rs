use crate::errors::{Error, Result};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }

    /// Parse the canonical header `"<kind> <byte-length>\0"` off a reader.
    ///
    /// Returns the kind and the declared payload length, leaving the reader
    /// positioned at the start of the payload. A missing separator, unknown
    /// kind tag, or non-numeric length is reported as a corrupt object.
    pub fn parse_header(reader: &mut impl BufRead) -> Result<(ObjectKind, usize)> {
        let mut kind_bytes = Vec::new();
        reader.read_until(b' ', &mut kind_bytes)?;
        if kind_bytes.pop() != Some(b' ') {
            return Err(Error::corrupt("missing space after object kind"));
        }

        let kind = std::str::from_utf8(&kind_bytes)
            .map_err(|_| Error::corrupt("object kind is not valid utf-8"))?;
        let kind = ObjectKind::try_from(kind)?;

        let mut len_bytes = Vec::new();
        reader.read_until(b'\0', &mut len_bytes)?;
        if len_bytes.pop() != Some(b'\0') {
            return Err(Error::corrupt("missing NUL separator after object length"));
        }

        let len = std::str::from_utf8(&len_bytes)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| Error::corrupt("object length is not a number"))?;

        Ok((kind, len))
    }
}

impl TryFrom<&str> for ObjectKind {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            _ => Err(Error::corrupt(format!("unknown object kind: {value}"))),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
