//! Where things live: the editor's `storage.json` and bakrot's own config dir.
//!
//! Nothing here is cached in a global. The CLI resolves a [`BakrotPaths`] once
//! and hands it to the API, tests build one pointing at a temp dir.

use crate::error::{BakrotError, Result};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "Cursor";
const STORAGE_SUBPATH: [&str; 3] = ["User", "globalStorage", "storage.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

#[derive(Debug, Clone)]
pub struct BakrotPaths {
    /// The watched JSON file. Backups sit next to it.
    pub storage_file: PathBuf,
    /// Directory holding bakrot's `config.json`.
    pub config_dir: PathBuf,
}

impl BakrotPaths {
    pub fn new(storage_file: impl Into<PathBuf>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_file: storage_file.into(),
            config_dir: config_dir.into(),
        }
    }

    /// Platform defaults, with an optional override for the storage file.
    pub fn resolve(storage_override: Option<PathBuf>) -> Result<Self> {
        let storage_file = match storage_override {
            Some(path) => path,
            None => default_storage_path()?,
        };
        let proj_dirs = ProjectDirs::from("com", "bakrot", "bakrot").ok_or_else(|| {
            BakrotError::Config("Could not determine config dir".to_string())
        })?;
        Ok(Self::new(storage_file, proj_dirs.config_dir()))
    }

    /// Directory the backups are discovered in.
    pub fn backup_dir(&self) -> PathBuf {
        match self.storage_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// File name the backups are named after, e.g. `storage.json`.
    pub fn base_file_name(&self) -> Result<String> {
        self.storage_file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                BakrotError::Config(format!(
                    "{} has no usable file name",
                    self.storage_file.display()
                ))
            })
    }
}

pub fn default_storage_path() -> Result<PathBuf> {
    let base = BaseDirs::new()
        .ok_or_else(|| BakrotError::Config("Could not determine home directory".to_string()))?;
    Ok(storage_path_for(
        Platform::current(),
        base.home_dir(),
        base.config_dir(),
    ))
}

/// `app_data` is only consulted on Windows, where it is `%APPDATA%`.
pub fn storage_path_for(platform: Platform, home: &Path, app_data: &Path) -> PathBuf {
    let root = match platform {
        Platform::Windows => app_data.to_path_buf(),
        Platform::MacOs => home.join("Library").join("Application Support"),
        Platform::Linux => home.join(".config"),
    };
    STORAGE_SUBPATH
        .iter()
        .fold(root.join(APP_DIR), |acc, part| acc.join(part))
}
