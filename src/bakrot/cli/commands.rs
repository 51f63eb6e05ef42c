//! # CLI Layer
//!
//! One possible UI client for bakrot. This is the only place that:
//! - parses arguments
//! - reads the wall clock and passes `now` down
//! - prompts on stdin before anything is deleted
//! - prints to stdout
//!
//! Every destructive path follows the same shape: ask the API for a plan,
//! print it, confirm, then pass exactly the planned paths to `execute`.

use super::print::{
    print_backups, print_identifiers, print_messages, print_paths, print_plan,
};
use super::setup::{Cli, Commands};
use bakrot::api::{report, BakrotApi, CmdMessage, ConfigAction};
use bakrot::config::BakrotConfig;
use bakrot::error::Result;
use bakrot::paths::BakrotPaths;
use bakrot::store::fs::FileStore;
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{debug, Level};

const CLEAN_CONFIRMATION: &str = "Y";
const PURGE_ALL_CONFIRMATION: &str = "delete all";

struct AppContext {
    api: BakrotApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Path) => handle_path(&ctx),
        Some(Commands::Show) | None => handle_show(&ctx),
        Some(Commands::Regenerate { backup }) => handle_regenerate(&mut ctx, backup),
        Some(Commands::Backup) => handle_backup(&mut ctx),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Clean { days, dry_run, yes }) => handle_clean(&mut ctx, days, dry_run, yes),
        Some(Commands::PurgeAll { yes }) => handle_purge_all(&mut ctx, yes),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let paths = BakrotPaths::resolve(cli.file.clone())?;
    debug!(
        storage = %paths.storage_file.display(),
        config = %paths.config_dir.display(),
        "resolved paths"
    );
    Ok(AppContext {
        api: BakrotApi::new(FileStore::new(), paths),
    })
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.api.storage_file().display());
    Ok(())
}

fn handle_show(ctx: &AppContext) -> Result<()> {
    let identifiers = ctx.api.current_identifiers()?;
    print_identifiers(ctx.api.storage_file(), identifiers.as_ref());
    Ok(())
}

fn handle_regenerate(ctx: &mut AppContext, backup_first: bool) -> Result<()> {
    if backup_first && ctx.api.current_identifiers()?.is_some() {
        let result = ctx.api.create_backup(now())?;
        print_messages(&result.messages);
    }

    let fresh = ctx.api.regenerate_identifiers()?;
    print_messages(&[CmdMessage::success("Identifiers regenerated.")]);
    print_identifiers(ctx.api.storage_file(), Some(&fresh));
    Ok(())
}

fn handle_backup(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.create_backup(now())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let backups = ctx.api.list_backups()?;
    print_backups(&backups, now());
    Ok(())
}

fn handle_clean(
    ctx: &mut AppContext,
    days: Option<u32>,
    dry_run: bool,
    skip_confirm: bool,
) -> Result<()> {
    let days = match days {
        Some(days) => days,
        None => ctx.api.load_config()?.retention_days,
    };
    let now = now();
    let plan = ctx.api.plan_cleanup(days, now)?;
    print_plan(&plan, days, now);

    if plan.is_empty() {
        print_messages(&[CmdMessage::info("Nothing to clean.")]);
        return Ok(());
    }
    if dry_run {
        print_messages(&[CmdMessage::info("Dry run, nothing deleted.")]);
        return Ok(());
    }

    if !skip_confirm {
        let prompt = format!(
            "[{}] To delete {} backup(s): ",
            CLEAN_CONFIRMATION,
            plan.to_delete.len()
        );
        if !confirm(&mut io::stdin().lock(), &mut io::stdout(), &prompt, CLEAN_CONFIRMATION)? {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let outcome = ctx.api.execute(&plan.paths());
    print_messages(&report(&outcome).messages);
    Ok(())
}

fn handle_purge_all(ctx: &mut AppContext, skip_confirm: bool) -> Result<()> {
    let paths = ctx.api.plan_delete_all()?;
    if paths.is_empty() {
        print_messages(&[CmdMessage::info("No backups to delete.")]);
        return Ok(());
    }

    println!("This will permanently remove ALL {} backup(s):", paths.len());
    print_paths(&paths);
    println!(
        "{}",
        "The newest backup is included; nothing will be left to restore from.".red()
    );

    if !skip_confirm {
        let prompt = format!("Type \"{}\" to confirm: ", PURGE_ALL_CONFIRMATION);
        if !confirm(
            &mut io::stdin().lock(),
            &mut io::stdout(),
            &prompt,
            PURGE_ALL_CONFIRMATION,
        )? {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let outcome = ctx.api.execute(&paths);
    print_messages(&report(&outcome).messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let result = ctx.api.config(ConfigAction::from_args(key, value))?;
    if let Some(config) = &result.config {
        for key in BakrotConfig::keys() {
            if let Some(value) = config.get(key) {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Prints `prompt` and reads one line. Only an exact (trimmed) match confirms.
fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    expected: &str,
) -> io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim() == expected)
}
