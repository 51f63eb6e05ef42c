use super::BackupStore;
use crate::error::{BakrotError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }
}

/// An entry that vanished or cannot be stat'ed is skipped, not fatal: only
/// directory-level failures abort a listing.
fn is_regular_file(path: &Path, file_type: io::Result<fs::FileType>) -> bool {
    match file_type {
        Ok(file_type) if file_type.is_file() => true,
        Ok(_) => {
            debug!(path = %path.display(), "skipping non-regular entry");
            false
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable entry");
            false
        }
    }
}

impl BackupStore for FileStore {
    fn list_files(&self, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        let meta = fs::metadata(dir).map_err(|e| BakrotError::at_path(dir, e))?;
        if !meta.is_dir() {
            return Err(BakrotError::NotFound {
                path: dir.to_path_buf(),
            });
        }

        let entries = fs::read_dir(dir).map_err(|e| BakrotError::at_path(dir, e))?;
        let mut found = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| BakrotError::PathIo {
                path: dir.to_path_buf(),
                source: e,
            })?;

            // Compared as raw bytes so a non UTF-8 name with the right prefix
            // still shows up, as an unparsed candidate.
            if !entry
                .file_name()
                .as_encoded_bytes()
                .starts_with(prefix.as_bytes())
            {
                continue;
            }

            // file_type() does not follow symlinks
            let path = entry.path();
            if is_regular_file(&path, entry.file_type()) {
                found.push(path);
            }
        }

        Ok(found)
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to).map_err(|e| BakrotError::at_path(from, e))?;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BakrotError::at_path(path, e)),
        }
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BakrotError::at_path(parent, e))?;
        }
        fs::write(path, content).map_err(|e| BakrotError::at_path(path, e))
    }
}
