//! Replay command implementation
//!
//! Prints the replay field mapping of a result record: the exact values the
//! front-end would pre-fill to reproduce or chain off a prior run.

use anyhow::{Context, Result};
use colored::Colorize;
use raaga_request::{to_replay_fields, ResultRecord, FIELD_ORDER};
use std::fs;
use std::process::ExitCode;

/// Run the replay command
///
/// # Arguments
/// * `record_path` - Path to the result-record JSON file
/// * `json_output` - Whether to print the field mapping as JSON
pub fn run(record_path: &str, json_output: bool) -> Result<ExitCode> {
    let text = fs::read_to_string(record_path)
        .with_context(|| format!("failed to read record file: {}", record_path))?;
    let record = ResultRecord::from_json(&text)
        .with_context(|| format!("failed to parse result record: {}", record_path))?;

    let fields = to_replay_fields(&record);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} ({} seed{})",
        "Replay of".cyan().bold(),
        record.mode(),
        record.actual_seeds.len(),
        if record.actual_seeds.len() == 1 { "" } else { "s" }
    );
    // Human view keeps the canonical engine-boundary ordering.
    let map = serde_json::to_value(&fields)?;
    for field in FIELD_ORDER {
        let value = &map[*field];
        let display = match value.as_str() {
            Some(s) if s.contains('\n') => format!("{:?}", s.lines().next().unwrap_or_default()),
            Some(s) => format!("{:?}", s),
            None => value.to_string(),
        };
        println!("  {:>24}  {}", field.dimmed(), display);
    }
    Ok(ExitCode::SUCCESS)
}
