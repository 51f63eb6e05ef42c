use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{BackupTimestamp, BACKUP_MARKER};
use crate::store::BackupStore;
use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

/// `<storage_file>.backup_<YYYYMMDD_HHMMSS>`, next to the original.
pub fn backup_path(storage_file: &Path, at: BackupTimestamp) -> PathBuf {
    let mut name = OsString::from(storage_file.as_os_str());
    name.push(BACKUP_MARKER);
    name.push(at.to_string());
    PathBuf::from(name)
}

/// Copies the storage file to a timestamped sibling. A backup taken in the same
/// second as an existing one replaces it.
pub fn run<S: BackupStore>(
    store: &mut S,
    storage_file: &Path,
    now: NaiveDateTime,
) -> Result<CmdResult> {
    let target = backup_path(storage_file, BackupTimestamp::new(now));
    store.copy_file(storage_file, &target)?;
    info!(from = %storage_file.display(), to = %target.display(), "created backup");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Backup created: {}",
        target.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::discover;
    use crate::error::BakrotError;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 5)
            .unwrap()
    }

    #[test]
    fn names_backup_after_the_storage_file() {
        let path = backup_path(Path::new("/gs/storage.json"), BackupTimestamp::new(noon()));
        assert_eq!(path, PathBuf::from("/gs/storage.json.backup_20240601_120005"));
    }

    #[test]
    fn created_backup_is_discoverable() {
        let mut store = InMemoryStore::new();
        store.add_file("/gs/storage.json", r#"{"a":1}"#);

        let result = run(&mut store, Path::new("/gs/storage.json"), noon()).unwrap();
        assert!(result.messages[0]
            .content
            .ends_with("storage.json.backup_20240601_120005"));

        let found = discover::run(&store, Path::new("/gs"), "storage.json").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].timestamp, Some(BackupTimestamp::new(noon())));
        assert_eq!(
            store.read_file(&found[0].path).unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn missing_storage_file_is_not_found() {
        let mut store = InMemoryStore::new();
        store.add_dir("/gs");
        let err = run(&mut store, Path::new("/gs/storage.json"), noon()).unwrap_err();
        assert!(matches!(err, BakrotError::NotFound { .. }));
    }
}
