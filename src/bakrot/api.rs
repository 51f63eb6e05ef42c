//! # API Facade
//!
//! A **thin facade** over the command layer and the single entry point for any
//! UI. It resolves where things are (storage file, backup directory, config
//! dir) from the [`BakrotPaths`] it was built with, then dispatches.
//!
//! The API does no printing and never prompts. Confirming a destructive
//! action is the caller's job: get a plan, show it, and only then hand its
//! paths to [`BakrotApi::execute`].
//!
//! `BakrotApi<S: BackupStore>` is generic over the storage backend:
//! - Production: `BakrotApi<FileStore>`
//! - Testing: `BakrotApi<InMemoryStore>`

use crate::commands::{self, identifiers::Identifiers};
use crate::config::BakrotConfig;
use crate::error::Result;
use crate::model::{BackupCandidate, DeletionOutcome, RetentionPlan, RetentionPolicy};
use crate::paths::BakrotPaths;
use crate::store::BackupStore;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub struct BakrotApi<S: BackupStore> {
    store: S,
    paths: BakrotPaths,
}

impl<S: BackupStore> BakrotApi<S> {
    pub fn new(store: S, paths: BakrotPaths) -> Self {
        Self { store, paths }
    }

    pub fn paths(&self) -> &BakrotPaths {
        &self.paths
    }

    pub fn storage_file(&self) -> &Path {
        &self.paths.storage_file
    }

    pub fn current_identifiers(&self) -> Result<Option<Identifiers>> {
        commands::identifiers::current(&self.store, &self.paths.storage_file)
    }

    /// Writes fresh identifiers into the storage file, creating it if needed.
    pub fn regenerate_identifiers(&mut self) -> Result<Identifiers> {
        commands::identifiers::rewrite(&mut self.store, &self.paths.storage_file)
    }

    pub fn create_backup(&mut self, now: NaiveDateTime) -> Result<commands::CmdResult> {
        commands::backup::run(&mut self.store, &self.paths.storage_file, now)
    }

    /// All backups, oldest first, unparsed last.
    pub fn list_backups(&self) -> Result<Vec<BackupCandidate>> {
        let mut candidates = self.discover()?;
        commands::plan::sort_candidates(&mut candidates);
        Ok(candidates)
    }

    pub fn plan_cleanup(&self, retention_days: u32, now: NaiveDateTime) -> Result<RetentionPlan> {
        let policy = RetentionPolicy::new(retention_days)?;
        let candidates = self.discover()?;
        Ok(commands::plan::plan(candidates, policy, now))
    }

    /// Every backup path, the newest included.
    pub fn plan_delete_all(&self) -> Result<Vec<PathBuf>> {
        let mut candidates = self.discover()?;
        commands::plan::sort_candidates(&mut candidates);
        Ok(commands::plan::plan_all(&candidates))
    }

    pub fn execute(&mut self, paths: &[PathBuf]) -> DeletionOutcome {
        commands::execute::run(&mut self.store, paths)
    }

    pub fn load_config(&self) -> Result<BakrotConfig> {
        BakrotConfig::load(&self.paths.config_dir)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths.config_dir, action)
    }

    fn discover(&self) -> Result<Vec<BackupCandidate>> {
        let base = self.paths.base_file_name()?;
        commands::discover::run(&self.store, &self.paths.backup_dir(), &base)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::execute::report;
pub use crate::commands::identifiers::{IdentifierKey, IdentifierValue};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BakrotError;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn api_with(names: &[&str]) -> BakrotApi<InMemoryStore> {
        let mut store = InMemoryStore::new();
        store.add_file("/gs/storage.json", "{}");
        for name in names {
            store.add_file(format!("/gs/{name}"), "{}");
        }
        BakrotApi::new(store, BakrotPaths::new("/gs/storage.json", "/cfg"))
    }

    #[test]
    fn plan_then_execute_removes_only_planned() {
        let mut api = api_with(&[
            "storage.json.backup_20240101_000000",
            "storage.json.backup_20240110_000000",
            "storage.json.backup_20240601_000000",
            "storage.json.backup_broken",
        ]);

        let plan = api.plan_cleanup(30, at(2024, 6, 5)).unwrap();
        assert_eq!(plan.total_found, 4);
        assert_eq!(plan.to_delete.len(), 2);

        let outcome = api.execute(&plan.paths());
        assert!(outcome.is_complete());

        let left: Vec<String> = api
            .list_backups()
            .unwrap()
            .iter()
            .map(|c| c.file_name())
            .collect();
        assert_eq!(
            left,
            vec![
                "storage.json.backup_20240601_000000",
                "storage.json.backup_broken"
            ]
        );
    }

    #[test]
    fn delete_all_includes_newest_and_unparsed() {
        let mut api = api_with(&[
            "storage.json.backup_20240601_000000",
            "storage.json.backup_broken",
        ]);
        let paths = api.plan_delete_all().unwrap();
        assert_eq!(paths.len(), 2);

        api.execute(&paths);
        assert!(api.list_backups().unwrap().is_empty());
    }

    #[test]
    fn zero_retention_is_rejected() {
        let api = api_with(&[]);
        assert!(matches!(
            api.plan_cleanup(0, at(2024, 6, 5)),
            Err(BakrotError::InvalidRetention(0))
        ));
    }

    #[test]
    fn missing_backup_dir_is_not_found() {
        let api = BakrotApi::new(
            InMemoryStore::new(),
            BakrotPaths::new("/nowhere/storage.json", "/cfg"),
        );
        assert!(matches!(
            api.list_backups(),
            Err(BakrotError::NotFound { .. })
        ));
    }

    #[test]
    fn unlistable_backup_dir_fails_planning() {
        let mut store = InMemoryStore::new();
        store.add_file("/gs/storage.json.backup_20240101_000000", "{}");
        store.deny_listing("/gs");
        let api = BakrotApi::new(store, BakrotPaths::new("/gs/storage.json", "/cfg"));

        assert!(matches!(
            api.plan_cleanup(7, at(2024, 6, 5)),
            Err(BakrotError::PathIo { .. })
        ));
        assert!(matches!(
            api.plan_delete_all(),
            Err(BakrotError::PathIo { .. })
        ));
    }

    #[test]
    fn regenerate_then_show() {
        let mut api = api_with(&[]);
        let fresh = api.regenerate_identifiers().unwrap();
        assert_eq!(api.current_identifiers().unwrap(), Some(fresh));
    }

    #[test]
    fn backup_shows_up_in_listing() {
        let mut api = api_with(&[]);
        api.create_backup(at(2024, 6, 5)).unwrap();
        let listed = api.list_backups().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].file_name(), "storage.json.backup_20240605_000000");
    }
}
