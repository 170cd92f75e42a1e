use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::errors::CoreError;
use crate::models::document::Document;

use super::format;
use super::SnapshotStore;

/// Snapshot slot backed by a single JSON file on disk.
///
/// Writes go to a temporary file in the same directory which is synced and
/// then renamed over the slot, so a crash mid-write leaves the previous
/// snapshot in place.
///
/// Loading never modifies the file. A slot that cannot be parsed reads as
/// empty and is copied to `<slot>.corrupt-<timestamp>` by the next `store`,
/// just before it is replaced.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Copy an unparseable slot to `<slot>.corrupt-<timestamp>` before it
    /// gets overwritten. Returns the copy's path, `None` if the slot is
    /// absent or parses fine.
    fn preserve_malformed(&self) -> Result<Option<PathBuf>, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::StorageUnavailable(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if format::decode(&bytes).is_ok() {
            return Ok(None);
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format::DEFAULT_SLOT.to_string());
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let target = self
            .parent_dir()
            .join(format!("{file_name}.corrupt-{stamp}"));
        std::fs::copy(&self.path, &target).map_err(|e| {
            CoreError::StorageUnavailable(format!(
                "Failed to preserve malformed snapshot {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(target))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Document, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => {
                return Err(CoreError::StorageUnavailable(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        match format::decode(&bytes) {
            Ok(document) => Ok(document),
            Err(CoreError::MalformedSnapshot(reason)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "malformed snapshot treated as empty: {reason}"
                );
                Ok(Document::new())
            }
            Err(e) => Err(e),
        }
    }

    fn store(&self, document: &Document) -> Result<(), CoreError> {
        let bytes = format::encode(document)?;
        let dir = self.parent_dir();
        let unavailable = |e: std::io::Error| {
            CoreError::StorageUnavailable(format!("Failed to write {}: {e}", self.path.display()))
        };

        std::fs::create_dir_all(&dir).map_err(unavailable)?;
        if let Some(kept) = self.preserve_malformed()? {
            tracing::warn!(
                path = %self.path.display(),
                preserved_as = %kept.display(),
                "malformed snapshot preserved before overwrite"
            );
        }
        let mut tmp = NamedTempFile::new_in(&dir).map_err(unavailable)?;
        tmp.write_all(&bytes).map_err(unavailable)?;
        tmp.as_file().sync_all().map_err(unavailable)?;
        tmp.persist(&self.path).map_err(|e| unavailable(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }
}
