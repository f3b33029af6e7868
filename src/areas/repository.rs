//! Repository engine handle
//!
//! An explicit handle over one repository root — no process-wide singleton.
//! Two handles over the same root agree through the on-disk state (and its
//! advisory locks), not through shared memory.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::Result;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository state directory under the working tree
pub const STATE_DIR: &str = ".keg";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let state_path = path.join(STATE_DIR);
        let index = Index::new(state_path.join("index").into_boxed_path());
        let database = Database::new(state_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path(), STATE_DIR);
        let refs = Refs::new(state_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
