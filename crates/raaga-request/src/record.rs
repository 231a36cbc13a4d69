//! Result capture and the Synthesis Engine boundary.
//!
//! A [`ResultRecord`] is the immutable record of what one engine invocation
//! actually used: the full request plus the seeds (and step schedule) the
//! engine resolved. It is the sole legal input for seeding a dependent
//! mode, and it is owned entirely by the caller; this layer persists
//! nothing.

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, EngineError, GenerateError};
use crate::mode::Mode;
use crate::parse::join_ints;
use crate::request::GenerationRequest;

/// What the Synthesis Engine hands back from one `generate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Path of the rendered audio file.
    pub audio_path: String,
    /// Seeds the engine actually used. For an auto-seeded request this must
    /// be non-empty; for manual seeds the engine replays them verbatim.
    pub actual_seeds: Vec<u64>,
    /// Concrete step schedule when the request left it to the engine;
    /// empty when the request carried its own.
    #[serde(default)]
    pub resolved_steps: Vec<u32>,
}

/// The external inference backend.
///
/// One invocation per user action, long-running and cancellable on the
/// engine's side; on failure or cancellation no record is produced and the
/// caller keeps the composed request for retry.
pub trait SynthesisEngine {
    /// Renders one request to audio.
    fn generate(&self, request: &GenerationRequest) -> Result<EngineOutput, EngineError>;
}

/// Immutable record of the parameters an engine invocation actually used.
///
/// Serializes as one flat JSON document: the request's wire fields plus
/// `actual_seeds`, matching the parameter blob the front-end displays and
/// chains from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The request exactly as composed, preserved verbatim.
    #[serde(flatten)]
    pub request: GenerationRequest,
    /// Concrete seeds; never empty, never the auto sentinel.
    pub actual_seeds: Vec<u64>,
    /// Concrete step schedule when one was auto-selected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved_steps: Vec<u32>,
}

impl ResultRecord {
    /// Returns the mode of the recorded request.
    pub fn mode(&self) -> Mode {
        self.request.mode()
    }

    /// Seeds in their lossless comma-joined display form.
    pub fn seeds_text(&self) -> String {
        join_ints(&self.actual_seeds)
    }

    /// Parses a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the record to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the record to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Packages an engine output into a [`ResultRecord`].
///
/// Every shared field of `request` is preserved verbatim. Seeds resolve to
/// the manual list when one was given (the engine replays it verbatim) and
/// to the engine's reported seeds otherwise; the auto sentinel never leaks
/// outward.
pub fn capture(
    request: &GenerationRequest,
    output: &EngineOutput,
) -> Result<ResultRecord, CaptureError> {
    let actual_seeds = match &request.manual_seeds {
        Some(seeds) => seeds.clone(),
        None => {
            if output.actual_seeds.is_empty() {
                return Err(CaptureError::MissingSeeds);
            }
            output.actual_seeds.clone()
        }
    };
    let resolved_steps = match &request.custom_step_schedule {
        Some(steps) => steps.clone(),
        None => output.resolved_steps.clone(),
    };
    Ok(ResultRecord {
        request: request.clone(),
        actual_seeds,
        resolved_steps,
    })
}

/// Drives one engine invocation and captures its result.
///
/// Exactly one invocation per call; an engine failure surfaces as-is and
/// produces no record, partial or otherwise.
pub fn run_generation<E: SynthesisEngine + ?Sized>(
    engine: &E,
    request: &GenerationRequest,
) -> Result<(String, ResultRecord), GenerateError> {
    let output = engine.generate(request)?;
    let record = capture(request, &output)?;
    Ok((output.audio_path, record))
}
