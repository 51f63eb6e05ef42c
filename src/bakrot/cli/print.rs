use bakrot::api::{CmdMessage, IdentifierValue, MessageLevel};
use bakrot::commands::identifiers::Identifiers;
use bakrot::model::{BackupCandidate, BackupTimestamp, RetentionPlan};
use chrono::NaiveDateTime;
use colored::Colorize;
use std::path::Path;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: usize = 14;
const NEWEST_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_identifiers(storage_file: &Path, identifiers: Option<&Identifiers>) {
    println!("{} {}", "Storage file:".bold(), storage_file.display());

    let Some(identifiers) = identifiers else {
        println!("{}", "File does not exist yet.".yellow());
        return;
    };

    println!();
    for value in &identifiers.values {
        println!("{}", identifier_line(value));
    }
}

fn identifier_line(value: &IdentifierValue) -> String {
    let label = pad_to_width(value.key.label(), LABEL_WIDTH);
    match &value.value {
        None => format!("  {}{}", label, "(absent)".dimmed()),
        Some(v) if value.is_well_formed() => format!("  {}{}", label, v),
        Some(v) => format!("  {}{} {}", label, v, "(unexpected format)".yellow()),
    }
}

pub(super) fn print_backups(candidates: &[BackupCandidate], now: NaiveDateTime) {
    if candidates.is_empty() {
        println!("No backups found.");
        return;
    }

    let newest = candidates.iter().rposition(|c| c.timestamp.is_some());
    let name_width = candidates
        .iter()
        .map(|c| c.file_name().width())
        .max()
        .unwrap_or(0);

    for (i, candidate) in candidates.iter().enumerate() {
        let marker = if Some(i) == newest {
            format!("{} ", NEWEST_MARKER).yellow()
        } else {
            "  ".normal()
        };
        let name = pad_to_width(&candidate.file_name(), name_width + 2);
        let when = match candidate.timestamp {
            Some(ts) => format!("{}  {}", format_timestamp(ts), format_age(ts, now))
                .dimmed()
                .to_string(),
            None => "unparsed timestamp, never auto-deleted".red().to_string(),
        };
        println!("{}{}{}", marker, name, when);
    }
}

pub(super) fn print_plan(plan: &RetentionPlan, retention_days: u32, now: NaiveDateTime) {
    println!(
        "Found {} backup(s); retention window {} day(s).",
        plan.total_found, retention_days
    );

    if let Some(retained) = &plan.retained {
        let age = retained
            .timestamp
            .map(|ts| format_age(ts, now))
            .unwrap_or_default();
        println!(
            "{} {} {}",
            "Keeping newest:".green(),
            retained.file_name(),
            age.dimmed()
        );
    }
    if plan.unparsed_count > 0 {
        println!(
            "{}",
            format!(
                "Skipping {} backup(s) with unparsable timestamps.",
                plan.unparsed_count
            )
            .yellow()
        );
    }

    if plan.to_delete.is_empty() {
        return;
    }
    println!("This will permanently remove the following backups:");
    for candidate in &plan.to_delete {
        let age = candidate
            .timestamp
            .map(|ts| format_age(ts, now))
            .unwrap_or_default();
        println!("  {} {}", candidate.file_name(), age.dimmed());
    }
}

pub(super) fn print_paths(paths: &[std::path::PathBuf]) {
    for path in paths {
        println!("  {}", path.display());
    }
}

fn format_timestamp(ts: BackupTimestamp) -> String {
    ts.as_naive().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_age(ts: BackupTimestamp, now: NaiveDateTime) -> String {
    let duration = now.signed_duration_since(ts.as_naive());
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
