//! Working directory collaborator
//!
//! The engine core never enumerates the filesystem itself; this thin area
//! hands the CLI file bytes and permission modes, and expands directory
//! arguments into the files beneath them. Repository state under the state
//! directory is never reported.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct Workspace {
    /// Working directory root
    path: Box<Path>,
    /// Name of the repository state directory to skip when listing
    state_dir: &'static str,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.path
    }

    /// Read the raw content of a working-tree file.
    pub fn read_file(&self, relative_path: &Path) -> Result<Bytes> {
        let absolute_path = self.path.join(relative_path);

        match std::fs::read(&absolute_path) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::FileNotFound(relative_path.to_path_buf()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Permission mode of a working-tree file.
    pub fn file_mode(&self, relative_path: &Path) -> EntryMode {
        let absolute_path = self.path.join(relative_path);
        EntryMode::from_executable(absolute_path.is_executable())
    }

    /// Expand a path into the workspace-relative files beneath it.
    ///
    /// A file path yields itself; a directory is walked recursively. The
    /// state directory is excluded.
    pub fn list_files(&self, relative_path: &Path) -> Result<Vec<PathBuf>> {
        let absolute_path = self.path.join(relative_path);

        if !absolute_path.exists() {
            return Err(Error::FileNotFound(relative_path.to_path_buf()));
        }

        if absolute_path.is_file() {
            return Ok(vec![relative_path.to_path_buf()]);
        }

        let mut files = WalkDir::new(&absolute_path)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != self.state_dir)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .map(|p| p.to_path_buf())
                    .ok()
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }
}
