use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::errors::Result;
use bytes::Bytes;
use std::io::Write;

/// Raw view of one stored object, for debugging
#[derive(Debug, Clone)]
pub struct InspectView {
    pub kind: ObjectKind,
    pub size: usize,
    pub payload: Bytes,
}

impl Repository {
    /// Look up an object by fingerprint and return its kind, payload size,
    /// and raw payload.
    pub fn inspect(&self, fingerprint: &str) -> Result<InspectView> {
        let fingerprint = ObjectId::try_parse(fingerprint.to_string())?;
        let (kind, payload) = self.database().retrieve(&fingerprint)?;

        Ok(InspectView {
            kind,
            size: payload.len(),
            payload,
        })
    }

    /// Print the parsed rendering of an object.
    pub fn print_object(&self, fingerprint: &str) -> Result<()> {
        let fingerprint = ObjectId::try_parse(fingerprint.to_string())?;
        let object = self.database().parse_object(&fingerprint)?;

        write!(self.writer(), "{}", object.display())?;

        Ok(())
    }
}
