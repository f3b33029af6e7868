use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, Result};
use std::io::Write;

/// One row of `list_branches` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub is_current: bool,
}

impl Repository {
    /// Create a branch at the current branch's tip.
    ///
    /// The new branch always inherits the current tip — which may be absent
    /// in a repository with no commits yet, leaving the new branch unborn
    /// like the initial one.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        let name = BranchName::try_parse(name.to_string())?;

        let current = self.refs().current_branch()?;
        let tip = match self.refs().branch_commit(&current) {
            Ok(tip) => tip,
            Err(Error::NoSuchBranch(_)) => None,
            Err(err) => return Err(err),
        };

        self.refs().create_branch(&name, tip.as_ref())
    }

    /// All branches, flagged with whether they are the active one.
    pub fn list_branches(&self) -> Result<Vec<BranchInfo>> {
        let current = self.refs().current_branch()?;

        Ok(self
            .refs()
            .list_branches()?
            .into_iter()
            .map(|name| BranchInfo {
                is_current: name == current,
                name: name.to_string(),
            })
            .collect())
    }

    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let name = BranchName::try_parse(name.to_string())?;
        self.refs().delete_branch(&name)
    }

    /// Print the branch list, marking the active branch.
    pub fn print_branches(&self) -> Result<()> {
        for branch in self.list_branches()? {
            let marker = if branch.is_current { "*" } else { " " };
            writeln!(self.writer(), "{} {}", marker, branch.name)?;
        }

        Ok(())
    }
}
