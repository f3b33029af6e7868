//! Stateful repository areas
//!
//! - `database`: object store for blobs, trees, and commits
//! - `index`: staging area tracking pending changes
//! - `refs`: branch pointers and HEAD
//! - `repository`: engine handle coordinating the areas
//! - `workspace`: working directory collaborator (file access for the CLI)

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
