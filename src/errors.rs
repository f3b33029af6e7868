//! All errors produced by the storage engine.
//!
//! Every failure is terminal for the operation that raised it: there is no
//! automatic retry and no silent recovery. The one sanctioned fallback is
//! resetting a corrupt staging index to empty, which is handled (and logged)
//! inside the index area, not here.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("object {0} not found")]
    NotFound(ObjectId),

    #[error("corrupt object: {0}")]
    Corrupt(String),

    #[error("object {0} is not a commit")]
    NotACommit(ObjectId),

    #[error("object {0} is not a tree")]
    NotATree(ObjectId),

    #[error("object {0} is not a blob")]
    NotABlob(ObjectId),

    #[error("path {0} is not staged")]
    NotStaged(String),

    #[error("nothing staged for commit")]
    NothingStaged,

    #[error("branch {0} already exists")]
    BranchExists(String),

    #[error("no such branch: {0}")]
    NoSuchBranch(String),

    #[error("cannot delete the current branch {0}")]
    CannotDeleteCurrent(String),

    #[error("file not found in working tree: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid ref pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt(reason.into())
    }
}
