//! Compose command implementation
//!
//! Builds a validated generation request from form fields (a JSON file or
//! the shipped defaults), a mode, mode flags, and optionally a prior result
//! record or an uploaded audio file as the source.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use raaga_request::mode::{
    EDIT_DEFAULT_RANGE_MAX, EDIT_DEFAULT_RANGE_MIN, EXTEND_DEFAULT_LEFT_SEC,
    EXTEND_DEFAULT_RIGHT_SEC, REPAINT_DEFAULT_END_SEC, REPAINT_DEFAULT_START_SEC,
    REPAINT_DEFAULT_VARIANCE, RETAKE_DEFAULT_VARIANCE,
};
use raaga_request::{
    compose, registry, ComposeError, EditKind, FormFields, Mode, ModeInput, ResultRecord,
    SourceInput,
};
use std::fs;
use std::process::ExitCode;

/// Mode-specific flag values, pre-defaulted by `main.rs`.
#[derive(Debug, Clone)]
pub struct ModeFlags {
    /// Retake/repaint variance.
    pub variance: Option<f64>,
    /// Raw seed text for the mode's seed override.
    pub seeds: String,
    /// Repaint window start.
    pub start_sec: Option<f64>,
    /// Repaint window end.
    pub end_sec: Option<f64>,
    /// Replacement style tags for edit.
    pub edit_prompt: String,
    /// Replacement lyrics for edit.
    pub edit_lyrics: String,
    /// Edit kind.
    pub edit_kind: EditKind,
    /// Edit re-walk start fraction.
    pub edit_range_min: Option<f64>,
    /// Edit re-walk end fraction.
    pub edit_range_max: Option<f64>,
    /// Seconds to extend on the left.
    pub left_sec: Option<f64>,
    /// Seconds to extend on the right.
    pub right_sec: Option<f64>,
}

/// Run the compose command
///
/// # Arguments
/// * `mode` - Operation mode to compose
/// * `fields_path` - Optional form-fields JSON file (defaults to the shipped form)
/// * `source_path` - Optional prior result-record JSON file
/// * `upload_path` - Optional uploaded audio file reference
/// * `flags` - Mode-specific flag values
/// * `json_output` - Whether to print the raw request JSON only
///
/// # Returns
/// Exit code: 0 on success, 1 on a composition error
pub fn run(
    mode: Mode,
    fields_path: Option<&str>,
    source_path: Option<&str>,
    upload_path: Option<&str>,
    flags: &ModeFlags,
    json_output: bool,
) -> Result<ExitCode> {
    let fields = match fields_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read fields file: {}", path))?;
            serde_json::from_str::<FormFields>(&text)
                .with_context(|| format!("failed to parse fields JSON: {}", path))?
        }
        None => FormFields::default(),
    };

    if (source_path.is_some() || upload_path.is_some()) && !registry::requires_source(mode) {
        bail!("{} starts from the form fields alone", mode);
    }
    if upload_path.is_some() && !registry::allows_upload(mode) {
        bail!("{} does not accept --upload", mode);
    }

    let record = match source_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read source record: {}", path))?;
            Some(
                ResultRecord::from_json(&text)
                    .with_context(|| format!("failed to parse source record: {}", path))?,
            )
        }
        None => None,
    };

    let source = match (&record, upload_path) {
        (Some(_), Some(_)) => bail!("--source and --upload are mutually exclusive"),
        (Some(record), None) => SourceInput::Record(record),
        (None, Some(path)) => SourceInput::Upload(path),
        (None, None) => SourceInput::None,
    };

    let input = match mode {
        Mode::Text2Music => ModeInput::Text2Music,
        Mode::Retake => ModeInput::Retake {
            variance: flags.variance.unwrap_or(RETAKE_DEFAULT_VARIANCE),
            seeds: &flags.seeds,
            source: record.as_ref(),
        },
        Mode::Repaint => ModeInput::Repaint {
            variance: flags.variance.unwrap_or(REPAINT_DEFAULT_VARIANCE),
            seeds: &flags.seeds,
            start_sec: flags.start_sec.unwrap_or(REPAINT_DEFAULT_START_SEC),
            end_sec: flags.end_sec.unwrap_or(REPAINT_DEFAULT_END_SEC),
            source,
        },
        Mode::Edit => ModeInput::Edit {
            edit_prompt: &flags.edit_prompt,
            edit_lyrics: &flags.edit_lyrics,
            seeds: &flags.seeds,
            edit_kind: flags.edit_kind,
            edit_range_min: flags.edit_range_min.unwrap_or(EDIT_DEFAULT_RANGE_MIN),
            edit_range_max: flags.edit_range_max.unwrap_or(EDIT_DEFAULT_RANGE_MAX),
            source,
        },
        Mode::Extend => ModeInput::Extend {
            seeds: &flags.seeds,
            left_extend_sec: flags.left_sec.unwrap_or(EXTEND_DEFAULT_LEFT_SEC),
            right_extend_sec: flags.right_sec.unwrap_or(EXTEND_DEFAULT_RIGHT_SEC),
            source,
        },
    };

    match compose(&fields, input) {
        Ok(request) => {
            let json = request.to_json_pretty()?;
            if json_output {
                println!("{}", json);
            } else {
                println!("{} {}", "Composed:".cyan().bold(), mode);
                println!("{}", json);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if json_output {
                let kind = match &err {
                    ComposeError::Validation(_) => "validation",
                    ComposeError::Parse(_) => "parse",
                    ComposeError::MissingSource(_) => "missing_source",
                };
                println!(
                    "{}",
                    serde_json::json!({ "ok": false, "error": kind, "message": err.to_string() })
                );
            } else {
                eprintln!("{} {}", "compose failed:".red().bold(), err);
            }
            Ok(ExitCode::from(1))
        }
    }
}
