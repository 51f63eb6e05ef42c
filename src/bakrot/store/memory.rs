use super::BackupStore;
use crate::error::{BakrotError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage for testing.
/// Does NOT persist data. Directories must be registered before files in them
/// can be listed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    locked: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.insert(dir.into());
    }

    /// Adds a file, registering its parent directory too.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.dirs.insert(parent.to_path_buf());
        }
        self.files.insert(path, content.into());
    }

    /// Makes `remove_file` fail with `PermissionDenied` for this path.
    pub fn lock(&mut self, path: impl Into<PathBuf>) {
        self.locked.insert(path.into());
    }

    /// Makes `list_files` on this directory fail with `PermissionDenied`.
    pub fn deny_listing(&mut self, dir: impl Into<PathBuf>) {
        self.unreadable.insert(dir.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl BackupStore for InMemoryStore {
    fn list_files(&self, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        if !self.dirs.contains(dir) {
            return Err(BakrotError::NotFound {
                path: dir.to_path_buf(),
            });
        }
        if self.unreadable.contains(dir) {
            return Err(BakrotError::PathIo {
                path: dir.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }

        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| {
                p.file_name()
                    .is_some_and(|n| n.as_encoded_bytes().starts_with(prefix.as_bytes()))
            })
            .cloned()
            .collect())
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        if self.locked.contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        let content = self
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| BakrotError::NotFound {
                path: from.to_path_buf(),
            })?;
        self.add_file(to, content);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        self.add_file(path, content);
        Ok(())
    }
}
