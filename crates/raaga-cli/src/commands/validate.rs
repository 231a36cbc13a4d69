//! Validate command implementation
//!
//! Schema-validates a request JSON document without touching the engine.

use anyhow::{Context, Result};
use colored::Colorize;
use raaga_request::{validate_request, GenerationRequest};
use std::fs;
use std::process::ExitCode;

/// Run the validate command
///
/// # Arguments
/// * `request_path` - Path to the request JSON file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(request_path: &str, json_output: bool) -> Result<ExitCode> {
    let text = fs::read_to_string(request_path)
        .with_context(|| format!("failed to read request file: {}", request_path))?;
    let request = GenerationRequest::from_json(&text)
        .with_context(|| format!("failed to parse request JSON: {}", request_path))?;

    match validate_request(&request) {
        Ok(()) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::json!({ "ok": true, "mode": request.mode().as_str() })
                );
            } else {
                println!(
                    "{} {} ({})",
                    "OK".green().bold(),
                    request_path,
                    request.mode()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "field": err.field,
                        "message": err.message,
                    })
                );
            } else {
                eprintln!("{} {}", "invalid:".red().bold(), err);
            }
            Ok(ExitCode::from(1))
        }
    }
}
