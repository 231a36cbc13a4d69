//! Sample command implementation
//!
//! Prints the shipped sample request: the literal default style/lyric text
//! and numeric settings. A degenerate producer, no engine involved.

use anyhow::Result;
use colored::Colorize;
use raaga_request::GenerationRequest;
use std::process::ExitCode;

/// Run the sample command
///
/// # Arguments
/// * `json_output` - Whether to print the raw request JSON only
pub fn run(json_output: bool) -> Result<ExitCode> {
    let sample = GenerationRequest::sample();
    let json = sample.to_json_pretty()?;

    if json_output {
        println!("{}", json);
    } else {
        println!("{}", "Sample request (shipped defaults):".cyan().bold());
        println!("{}", json);
    }
    Ok(ExitCode::SUCCESS)
}
