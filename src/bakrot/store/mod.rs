//! # Storage Layer
//!
//! The [`BackupStore`] trait is the only place the core touches the disk. Commands
//! are generic over it so the planning and deletion logic can be exercised without
//! a real directory.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production, backed by `std::fs`
//! - [`memory::InMemoryStore`]: a map of paths to contents, for tests, with
//!   hooks to make listing or removal fail
//!
//! ## Layout on disk
//!
//! ```text
//! Cursor/User/globalStorage/
//! ├── storage.json                         # the watched file
//! ├── storage.json.backup_20240101_000000  # timestamped copies
//! └── storage.json.backup_20240601_120000
//! ```

use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

pub trait BackupStore {
    /// Regular files directly inside `dir` whose name starts with `prefix`.
    ///
    /// Fails with `NotFound` when `dir` is missing or is not a directory.
    /// Directories and symlinks never match.
    fn list_files(&self, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>>;

    /// Remove a single file. Errors are returned raw so callers can decide
    /// whether they are fatal.
    fn remove_file(&mut self, path: &Path) -> io::Result<()>;

    /// Copy `from` to `to`, replacing `to` if it exists.
    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()>;

    /// Read a file as UTF-8, `None` if it does not exist.
    fn read_file(&self, path: &Path) -> Result<Option<String>>;

    /// Write `content` to `path`, creating missing parent directories.
    fn write_file(&mut self, path: &Path, content: &str) -> Result<()>;
}
