//! RAAGA CLI - Command-line interface for the generation-request contract
//!
//! This binary composes, validates, and inspects the canonical generation
//! requests consumed by the RAAGA Synthesis Engine; the engine itself is an
//! external collaborator and is never invoked from here.

use clap::{Parser, Subcommand};
use raaga_request::{EditKind, Mode};
use std::process::ExitCode;

// Use modules from the library crate
use raaga_cli::commands;

/// RAAGA - Music Generation Request Orchestration
#[derive(Parser)]
#[command(name = "raaga")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the shipped sample request (default tags, lyrics, settings)
    Sample {
        /// Output the raw request JSON only
        #[arg(long)]
        json: bool,
    },

    /// Validate a request JSON document against the declared field bounds
    Validate {
        /// Path to the request JSON file
        #[arg(short, long)]
        request: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compose a generation request from form fields, a mode, and a source
    Compose {
        /// Operation mode (text2music, retake, repaint, edit, extend)
        #[arg(short, long)]
        mode: Mode,

        /// Form-fields JSON file (default: the shipped form values)
        #[arg(short, long)]
        fields: Option<String>,

        /// Prior result-record JSON file to chain from
        #[arg(short, long)]
        source: Option<String>,

        /// Uploaded audio file reference (repaint/edit/extend only)
        #[arg(long)]
        upload: Option<String>,

        /// Variance for retake/repaint (default: mode-specific)
        #[arg(long)]
        variance: Option<f64>,

        /// Seed override as comma-separated integers (blank = engine selects)
        #[arg(long, default_value = "")]
        seeds: String,

        /// Repaint window start in seconds
        #[arg(long)]
        start_sec: Option<f64>,

        /// Repaint window end in seconds
        #[arg(long)]
        end_sec: Option<f64>,

        /// Replacement style tags for edit
        #[arg(long, default_value = "")]
        edit_prompt: String,

        /// Replacement lyrics for edit
        #[arg(long, default_value = "")]
        edit_lyrics: String,

        /// Edit kind (only_lyrics, remix)
        #[arg(long, default_value = "only_lyrics")]
        edit_kind: EditKind,

        /// Fraction of the diffusion trajectory where the edit starts
        #[arg(long)]
        edit_range_min: Option<f64>,

        /// Fraction of the diffusion trajectory where the edit ends
        #[arg(long)]
        edit_range_max: Option<f64>,

        /// Seconds to extend before the source
        #[arg(long)]
        left_sec: Option<f64>,

        /// Seconds to extend after the source
        #[arg(long)]
        right_sec: Option<f64>,

        /// Output the raw request JSON only
        #[arg(long)]
        json: bool,
    },

    /// Print the replay field mapping of a result record
    Replay {
        /// Path to the result-record JSON file
        #[arg(short, long)]
        record: String,

        /// Output the field mapping as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sample { json } => commands::sample::run(json),
        Commands::Validate { request, json } => commands::validate::run(&request, json),
        Commands::Compose {
            mode,
            fields,
            source,
            upload,
            variance,
            seeds,
            start_sec,
            end_sec,
            edit_prompt,
            edit_lyrics,
            edit_kind,
            edit_range_min,
            edit_range_max,
            left_sec,
            right_sec,
            json,
        } => {
            let flags = commands::compose::ModeFlags {
                variance,
                seeds,
                start_sec,
                end_sec,
                edit_prompt,
                edit_lyrics,
                edit_kind,
                edit_range_min,
                edit_range_max,
                left_sec,
                right_sec,
            };
            commands::compose::run(
                mode,
                fields.as_deref(),
                source.as_deref(),
                upload.as_deref(),
                &flags,
                json,
            )
        }
        Commands::Replay { record, json } => commands::replay::run(&record, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
