use crate::commands::{intent::CommandIntent, orchestrator::Orchestrator};
use crate::core::{
    colors::{get_aligned_state, get_colored_path},
    element::ElementRecord,
    error::Result,
    print_error, print_section_header,
};
use chrono::Local;
use colored::*;
use std::path::PathBuf;

/// Describe each target and print its state, or dump the records as JSON.
///
/// A path that cannot be described is reported and skipped; the command fails only when
/// none of the paths could be described.
pub fn execute_status(orchestrator: &mut Orchestrator, paths: &[PathBuf], json: bool) -> Result<()> {
    let targets = orchestrator.resolve_targets(paths);
    if targets.is_empty() {
        return Ok(());
    }

    let mut records = Vec::with_capacity(targets.len());
    let mut last_error = None;
    for path in &targets {
        match orchestrator.describe(path) {
            Ok(record) => records.push(record),
            Err(e) => {
                if !json {
                    print_error(&e.to_string());
                }
                last_error = Some(e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if !records.is_empty() {
        print_section_header("Element status");
        for record in &records {
            print_record(record);
        }
        println!();
    }

    match last_error {
        Some(e) if records.is_empty() => Err(e),
        _ => Ok(()),
    }
}

fn print_record(record: &ElementRecord) {
    let state = record.state();
    println!(
        "   ({}) {}  {}",
        get_aligned_state(state),
        get_colored_path(&record.path.to_string_lossy(), state),
        state.description().bright_black()
    );
    for line in record_details(record) {
        println!("        {}", line.bright_black());
    }
}

/// Detail lines shown under a path
pub fn record_details(record: &ElementRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if record.is_private {
        if record.is_directory {
            lines.push("directory".to_string());
        }
    } else {
        lines.push(format!("version:     {}", record.version_id));
        if !record.predecessor_version_id.is_empty() {
            lines.push(format!("predecessor: {}", record.predecessor_version_id));
        }
        if let Some(user) = &record.owning_user {
            lines.push(format!("checked out by: {user}"));
        }
        if !record.comment.is_empty() {
            lines.push(format!("comment:     {}", record.comment));
        }
    }
    if !record.is_in_managed_view {
        lines.push("outside the managed view".to_string());
    }
    let fetched = record.fetched_at.with_timezone(&Local);
    lines.push(format!("described at {}", fetched.format("%Y-%m-%d %H:%M:%S")));
    lines
}

/// Print whether `intent` is enabled and report it as the exit status
pub fn execute_enabled(orchestrator: &mut Orchestrator, intent: &str, paths: &[PathBuf]) -> Result<bool> {
    let intent: CommandIntent = intent.parse()?;
    let enabled = orchestrator.is_enabled(intent, paths);
    println!("{enabled}");
    Ok(enabled)
}
