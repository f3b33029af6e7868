use crate::areas::repository::Repository;
use crate::artifacts::log::History;
use crate::errors::{Error, Result};
use std::io::Write;

impl Repository {
    /// Walk the current branch's history, most recent commit first.
    ///
    /// Lazy: commits are read one at a time as the iterator advances, and at
    /// most `limit` of them are yielded.
    pub fn history(&self, limit: usize) -> Result<History<'_>> {
        let branch = self.refs().current_branch()?;
        let tip = match self.refs().branch_commit(&branch) {
            Ok(tip) => tip,
            Err(Error::NoSuchBranch(_)) => None,
            Err(err) => return Err(err),
        };

        Ok(History::new(self.database(), tip, limit))
    }

    /// Print the history in a medium format.
    pub fn log(&self, limit: usize) -> Result<()> {
        for item in self.history(limit)? {
            let (fingerprint, commit) = item?;

            writeln!(self.writer(), "commit {fingerprint}")?;
            writeln!(self.writer(), "Author: {}", commit.author().display())?;
            writeln!(self.writer())?;
            for line in commit.message().lines() {
                writeln!(self.writer(), "    {line}")?;
            }
            writeln!(self.writer())?;
        }

        Ok(())
    }
}
