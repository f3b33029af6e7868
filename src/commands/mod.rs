//! Engine operations, implemented as `impl Repository` blocks
//!
//! - `porcelain`: the operations an external command collaborator drives
//!   (init, add, commit, status, log, branch, checkout)
//! - `plumbing`: debug accessors over raw objects

pub mod plumbing;
pub mod porcelain;
