//! # Bakrot Architecture
//!
//! Bakrot watches one JSON file, the editor's `storage.json`, and manages the
//! timestamped backups that pile up next to it. It is a library with a CLI
//! client, not the other way around.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, asks for confirmation, prints results  │
//! │  - The ONLY place that knows about stdout/stdin/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, resolves directories from BakrotPaths       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - discover, plan, plan_all, execute, backup, identifiers   │
//! │  - Planning is pure: candidates + policy + now -> plan      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BackupStore trait                                        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retention rules
//!
//! Backups are named `<file>.backup_<YYYYMMDD_HHMMSS>` in local time. A cleanup
//! deletes backups strictly older than `now - retention_days`, except:
//!
//! - the newest timestamped backup is always kept
//! - backups whose suffix does not parse are never deleted automatically
//!
//! Deleting is best-effort per file and only ever touches paths the caller got
//! from a plan.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never reads the
//! clock (callers pass `now`) and never exits the process. Diagnostics go
//! through `tracing`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Discovery, planning, deletion, backups, identifier read/rewrite
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Value types (`BackupCandidate`, `RetentionPlan`, ...)
//! - [`paths`]: Platform-specific location of `storage.json`
//! - [`config`]: Bakrot's own settings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod store;
