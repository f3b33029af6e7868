//! Commit history traversal
//!
//! Walks the parent chain from a branch tip, most recent first. The commit
//! graph is acyclic by construction (a commit's parent is always the tip
//! that existed before it), so the walk terminates after at most
//! `min(limit, reachable commits)` steps.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

/// Lazy iterator over a branch's commit chain
pub struct History<'d> {
    database: &'d Database,
    next: Option<ObjectId>,
    remaining: usize,
}

impl<'d> History<'d> {
    pub fn new(database: &'d Database, tip: Option<ObjectId>, limit: usize) -> Self {
        History {
            database,
            next: tip,
            remaining: limit,
        }
    }
}

impl Iterator for History<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let oid = self.next.take()?;
        self.remaining -= 1;

        match self.database.parse_commit(&oid) {
            Ok(commit) => {
                self.next = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            // a broken chain ends the walk after surfacing the error
            Err(err) => Some(Err(err)),
        }
    }
}
