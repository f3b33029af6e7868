use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, Result};
use std::io::Write;

impl Repository {
    /// Switch HEAD to another branch.
    ///
    /// Only the pointer moves; materializing the target commit's files into
    /// the working tree is an external collaborator's concern.
    pub fn checkout(&self, target: &str) -> Result<()> {
        let name = BranchName::try_parse(target.to_string())?;

        if !self.refs().list_branches()?.contains(&name) {
            return Err(Error::NoSuchBranch(name.to_string()));
        }

        self.refs().set_head(&name)?;

        write!(self.writer(), "Switched to branch '{name}'")?;

        Ok(())
    }
}
