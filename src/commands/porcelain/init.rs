use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, Result};
use std::fs;
use std::io::Write;

impl Repository {
    /// Initialize the repository state directory.
    ///
    /// Creates the object store, the refs hierarchy, a HEAD pointing at the
    /// default branch, the (empty, unborn) default branch pointer, and an
    /// empty staging index. Re-running on an initialized repository is
    /// harmless: an existing HEAD is left as it stands.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.database().objects_path())?;
        fs::create_dir_all(self.refs().heads_path())?;

        let default_branch = BranchName::try_parse(Refs::default_branch())?;
        if !self.refs().head_path().exists() {
            self.refs().set_head(&default_branch)?;
        }

        // the initial branch starts with no commit yet
        match self.refs().create_branch(&default_branch, None) {
            Ok(()) | Err(Error::BranchExists(_)) => {}
            Err(err) => return Err(err),
        }

        let mut index = self.index();
        if !index.path().exists() {
            index.rehydrate_for_update()?;
            index.write_updates()?;
        }

        write!(
            self.writer(),
            "Initialized empty keg repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
