//! A minimal content-addressable version control storage engine.
//!
//! `keg` persists immutable objects (blobs, trees, commits) under
//! content-derived fingerprints, keeps a staging index of pending changes,
//! and maintains branch/HEAD pointers into the resulting commit graph.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
