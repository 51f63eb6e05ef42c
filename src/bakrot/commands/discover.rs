use crate::error::Result;
use crate::model::{BackupCandidate, BACKUP_MARKER};
use crate::store::BackupStore;
use std::path::Path;
use tracing::debug;

/// `storage.json` -> `storage.json.backup_`
pub fn backup_prefix(base_file_name: &str) -> String {
    format!("{base_file_name}{BACKUP_MARKER}")
}

/// Finds backups of `base_file_name` in `directory`.
///
/// A name that matches the prefix but carries a malformed timestamp still
/// yields a candidate, with `timestamp: None`. The result is in no particular
/// order.
pub fn run<S: BackupStore>(
    store: &S,
    directory: &Path,
    base_file_name: &str,
) -> Result<Vec<BackupCandidate>> {
    let prefix = backup_prefix(base_file_name);
    let files = store.list_files(directory, &prefix)?;

    let candidates: Vec<BackupCandidate> = files
        .into_iter()
        .map(|path| {
            let suffix = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(prefix.as_str()))
                .unwrap_or_default()
                .to_string();
            let candidate = BackupCandidate::from_suffix(path, &suffix);
            if candidate.timestamp.is_none() {
                debug!(path = %candidate.path.display(), "backup has unparsable timestamp");
            }
            candidate
        })
        .collect();

    debug!(
        dir = %directory.display(),
        count = candidates.len(),
        "discovered backups"
    );
    Ok(candidates)
}
