//! Staging index records
//!
//! The index file is a JSON array of fixed-shape entry records
//! `{ path, fingerprint, mode, staged_at }`, kept sorted by path.
//! Unknown or missing fields are rejected on load rather than defaulted,
//! so a corrupted file never masquerades as a valid index.

pub mod entry_mode;
pub mod index_entry;
