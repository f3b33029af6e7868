use crate::areas::repository::Repository;
use crate::errors::Result;
use std::io::Write;

/// Snapshot of the repository state an external caller can render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub branch: String,
    pub staged: Vec<String>,
}

impl Repository {
    /// Current branch name plus the staged paths, in path order.
    pub fn status(&self) -> Result<StatusView> {
        let branch = self.refs().current_branch()?.to_string();

        let mut index = self.index();
        index.rehydrate()?;
        let staged = index.entries().map(|entry| entry.path.clone()).collect();

        Ok(StatusView { branch, staged })
    }

    /// Print the status in a short human-readable form.
    pub fn print_status(&self) -> Result<()> {
        let status = self.status()?;

        writeln!(self.writer(), "On branch {}", status.branch)?;

        if status.staged.is_empty() {
            writeln!(self.writer(), "nothing staged for commit")?;
        } else {
            writeln!(self.writer(), "Changes to be committed:")?;
            for path in &status.staged {
                writeln!(self.writer(), "\tnew file:   {path}")?;
            }
        }

        Ok(())
    }
}
