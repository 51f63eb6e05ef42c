//! # Bakrot CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/bakrot/cli/)                                │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring, confirmation prompts (commands.rs)       │
//! │  - Terminal rendering (print.rs)                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                 bakrot::api::BakrotApi<FileStore>
//! ```
//!
//! Destructive commands always show what they are about to delete and ask first.
//! `clean` asks for `Y`; `purge-all` removes the newest backup too, so it wants
//! the full phrase `delete all`. `--yes` skips either prompt.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
