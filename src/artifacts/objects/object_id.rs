//! Object fingerprint (content hash)
//!
//! Fingerprints are 40-character hexadecimal strings identifying every object
//! in the store (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects live at `objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// Content fingerprint of a stored object
///
/// A validated 40-character hexadecimal string. The same payload of the same
/// kind always yields the same fingerprint.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a fingerprint from a string
    pub fn try_parse(id: String) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidObjectId(id));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(id));
        }
        Ok(Self(id))
    }

    /// Write the fingerprint as raw bytes (20 bytes)
    ///
    /// Used when encoding tree entries, which carry child fingerprints in
    /// binary form.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| Error::InvalidObjectId(self.0.clone()))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read a fingerprint from raw bytes (20 bytes)
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        reader.read_exact(&mut raw)?;

        let mut hex = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in raw {
            hex.push_str(&format!("{byte:02x}"));
        }

        Self::try_parse(hex)
    }

    /// Convert to the on-disk object path `XX/YYYY...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form (first 7 characters), for display
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "2ef7bde608ce5404e97d5f042f95f89f1c232871";

    #[test]
    fn parses_valid_fingerprint() {
        let oid = ObjectId::try_parse(SAMPLE.to_string()).unwrap();
        assert_eq!(oid.as_ref(), SAMPLE);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ObjectId::try_parse("abc123".to_string()).is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        let bad = "zz".repeat(20);
        assert!(ObjectId::try_parse(bad).is_err());
    }

    #[test]
    fn maps_to_fanout_path() {
        let oid = ObjectId::try_parse(SAMPLE.to_string()).unwrap();
        assert_eq!(
            oid.to_path(),
            PathBuf::from("2e").join("f7bde608ce5404e97d5f042f95f89f1c232871")
        );
    }

    #[test]
    fn raw_round_trip() {
        let oid = ObjectId::try_parse(SAMPLE.to_string()).unwrap();
        let mut raw = Vec::new();
        oid.write_raw_to(&mut raw).unwrap();
        assert_eq!(raw.len(), OBJECT_ID_RAW_LENGTH);

        let back = ObjectId::read_raw_from(&mut raw.as_slice()).unwrap();
        assert_eq!(back, oid);
    }
}
