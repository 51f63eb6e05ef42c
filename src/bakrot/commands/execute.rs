use crate::commands::{CmdMessage, CmdResult};
use crate::model::DeletionOutcome;
use crate::store::BackupStore;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Removes each path in order. A failure is recorded and the next path is
/// still attempted; this never fails as a whole.
///
/// Only ever pass paths a user has confirmed from a plan. Nothing is
/// re-discovered here.
pub fn run<S: BackupStore>(store: &mut S, paths: &[PathBuf]) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();

    for path in paths {
        match store.remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "removed backup");
                outcome.record_removed(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not remove backup");
                outcome.record_failed(path, describe(path, &e));
            }
        }
    }

    outcome
}

fn describe(path: &Path, err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => format!("{} no longer exists", path.display()),
        io::ErrorKind::PermissionDenied => format!("permission denied for {}", path.display()),
        _ => format!("{}: {}", path.display(), err),
    }
}

/// Turns an outcome into user-facing lines: one per removal, one per failure,
/// and a summary.
pub fn report(outcome: &DeletionOutcome) -> CmdResult {
    let mut result = CmdResult::default();

    if outcome.removed.is_empty() && outcome.failed.is_empty() {
        result.add_message(CmdMessage::info("No backups to delete."));
        return result;
    }

    for path in &outcome.removed {
        result.add_message(CmdMessage::success(format!("Deleted: {}", path.display())));
    }
    for failure in &outcome.failed {
        result.add_message(CmdMessage::error(format!("Failed: {}", failure.reason)));
    }

    let summary = format!(
        "{} deleted, {} failed.",
        outcome.removed.len(),
        outcome.failed.len()
    );
    if outcome.is_complete() {
        result.add_message(CmdMessage::info(summary));
    } else {
        result.add_message(CmdMessage::warning(summary));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use std::fs;

    #[test]
    fn empty_list_touches_nothing() {
        let mut store = InMemoryStore::new();
        store.add_file("/gs/storage.json.backup_20240101_000000", "{}");

        let outcome = run(&mut store, &[]);

        assert_eq!(outcome, DeletionOutcome::default());
        assert_eq!(store.file_count(), 1);
    }

    #[test]
    fn missing_path_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("storage.json.backup_20240101_000000");
        let present = dir.path().join("storage.json.backup_20240102_000000");
        fs::write(&present, "{}").unwrap();

        let outcome = run(&mut FileStore::new(), &[gone.clone(), present.clone()]);

        assert_eq!(outcome.removed, vec![present.clone()]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].path, gone);
        assert!(outcome.failed[0].reason.contains("no longer exists"));
        assert!(!present.exists());
    }

    #[test]
    fn every_path_is_attempted_in_order() {
        let mut store = InMemoryStore::new();
        for name in ["a", "b", "c"] {
            store.add_file(format!("/gs/{name}"), "{}");
        }
        store.lock("/gs/a");

        let paths: Vec<PathBuf> = ["a", "b", "c"]
            .iter()
            .map(|n| PathBuf::from(format!("/gs/{n}")))
            .collect();
        let outcome = run(&mut store, &paths);

        assert_eq!(
            outcome.removed,
            vec![PathBuf::from("/gs/b"), PathBuf::from("/gs/c")]
        );
        assert_eq!(outcome.failed.len(), 1);
        assert!(outcome.failed[0].reason.starts_with("permission denied"));
        assert!(store.contains(Path::new("/gs/a")));
    }

    #[test]
    fn report_flags_partial_failure() {
        let mut outcome = DeletionOutcome::default();
        outcome.record_removed(Path::new("/gs/a"));
        outcome.record_failed(Path::new("/gs/b"), "nope");

        let result = report(&outcome);

        assert!(result.has_errors());
        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Warning);
        assert_eq!(last.content, "1 deleted, 1 failed.");
    }

    #[test]
    fn report_of_nothing_says_so() {
        let result = report(&DeletionOutcome::default());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].content, "No backups to delete.");
    }
}
