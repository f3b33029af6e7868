use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use std::io::Write;

impl Repository {
    /// Record the staged entries as a new commit on the current branch.
    ///
    /// The parent is the branch tip as it stands when the commit is built,
    /// `None` for the first commit on the branch. The staging index stays
    /// exclusively locked from load to persist and the branch pointer from
    /// the parent read to the tip update, so a commit or stage racing in
    /// another process cannot interleave. The index is cleared only after
    /// the branch pointer has advanced: any failure before that leaves the
    /// index intact so the commit can be retried without re-staging.
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        let mut index = self.index();
        index.rehydrate_for_update()?;

        if index.is_empty() {
            return Err(Error::NothingStaged);
        }

        let tree = Tree::build(index.entries());
        let tree_fingerprint = self.database().store(&tree)?;

        let branch = self.refs().current_branch()?;
        let mut branch_lock = self.refs().lock_branch(&branch)?;
        let parent = branch_lock.tip()?;
        let is_root = parent.is_none();

        let author = Author::load_from_env();
        let commit = Commit::new(parent, tree_fingerprint, author, message.trim().to_string());
        let commit_fingerprint = self.database().store(&commit)?;

        branch_lock.set_tip(&commit_fingerprint)?;
        drop(branch_lock);

        index.clear();
        index.write_updates()?;

        tracing::info!(%commit_fingerprint, branch = %branch, "created commit");

        write!(
            self.writer(),
            "[{}{}] {}",
            if is_root { "(root-commit) " } else { "" },
            commit_fingerprint.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_fingerprint)
    }
}
