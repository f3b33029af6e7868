//! Object types and content addressing
//!
//! Every object is stored under a fingerprint computed over its canonical
//! encoding `"<kind> <byte-length>\0<payload>"`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_kind;
pub mod tree;

/// Length of a hex-encoded fingerprint (SHA-1)
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a raw fingerprint in bytes
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
