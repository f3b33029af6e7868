use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use bytes::Bytes;
use std::path::Path;

impl Repository {
    /// Stage one path with caller-supplied content.
    ///
    /// Stores the content as a blob, then upserts the staging entry and
    /// persists the index. Durable once this returns.
    pub fn stage(&self, path: &str, content: Bytes, mode: EntryMode) -> Result<ObjectId> {
        let blob = Blob::new(content);
        let fingerprint = self.database().store(&blob)?;

        let mut index = self.index();
        index.rehydrate_for_update()?;
        index.add(IndexEntry::staged_now(
            path.to_string(),
            fingerprint.clone(),
            mode,
        ));
        index.write_updates()?;

        Ok(fingerprint)
    }

    /// Drop a path from the staging index.
    pub fn unstage(&self, path: &str) -> Result<()> {
        let mut index = self.index();
        index.rehydrate_for_update()?;
        index.remove(path)?;
        index.write_updates()?;

        Ok(())
    }

    /// Stage working-tree paths, expanding directories.
    ///
    /// Reads each file through the workspace collaborator; a path that does
    /// not resolve there surfaces as `FileNotFound`.
    pub fn add(&self, paths: &[String]) -> Result<()> {
        let mut index = self.index();
        index.rehydrate_for_update()?;

        let paths = paths
            .iter()
            .map(|path| self.workspace().list_files(Path::new(path)))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        for path in paths {
            let content = self.workspace().read_file(&path)?;
            let mode = self.workspace().file_mode(&path);

            let blob = Blob::new(content);
            let fingerprint = self.database().store(&blob)?;

            index.add(IndexEntry::staged_now(
                path.to_string_lossy().to_string(),
                fingerprint,
                mode,
            ));
        }

        index.write_updates()?;

        Ok(())
    }
}
