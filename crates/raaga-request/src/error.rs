//! Error types for request composition and result capture.
//!
//! Composition failures are local: none of these errors is ever produced
//! after the Synthesis Engine has been invoked, so an aborted composition
//! costs nothing but the user's click.

use thiserror::Error;

use crate::mode::Mode;

/// A request field outside its declared bounds.
///
/// Raised fail-fast by [`crate::validation::validate_request`] before a
/// request can reach the engine; out-of-range values are rejected, never
/// clamped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Canonical wire name of the field the check failed on.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Creates an out-of-range error with the declared bounds.
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::new(field, format!("{} is outside [{}, {}]", value, min, max))
    }
}

/// Malformed seed or step-schedule text.
///
/// Seed lists and step schedules travel as comma-separated decimal-integer
/// strings; any token that is not an integer, or a step schedule that is not
/// strictly ascending, fails here.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ParseError {
    /// Canonical wire name of the textual field.
    pub field: &'static str,
    /// Human-readable description of the bad input.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error for a non-integer token.
    pub fn bad_token(field: &'static str, token: &str) -> Self {
        Self {
            field,
            message: format!("{:?} is not a decimal integer", token),
        }
    }

    /// Creates a parse error for a step schedule that is not strictly
    /// ascending positive integers.
    pub fn not_ascending(field: &'static str) -> Self {
        Self {
            field,
            message: "step schedule must be strictly ascending positive integers".to_string(),
        }
    }
}

/// A dependent mode was composed without a usable source.
///
/// Every mode except text2music chains off either a prior [`ResultRecord`]
/// or an uploaded audio reference.
///
/// [`ResultRecord`]: crate::record::ResultRecord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{mode} requires a prior result record or an uploaded audio reference")]
pub struct MissingSourceError {
    /// The mode that was being composed.
    pub mode: Mode,
}

/// Top-level error type for request composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    /// A field was outside its declared bounds.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Seed or step-schedule text failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A dependent mode lacked a source record or upload.
    #[error(transparent)]
    MissingSource(#[from] MissingSourceError),
}

/// Capture failed because the engine output could not seed a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The request carried no manual seeds and the engine reported none
    /// back; a record with the auto sentinel is never valid.
    #[error("engine output reported no seeds for an auto-seeded request")]
    MissingSeeds,
}

/// Opaque Synthesis Engine failure.
///
/// Surfaced to the caller as-is; the composed request is retained by the
/// caller for retry, and no [`ResultRecord`] is produced.
///
/// [`ResultRecord`]: crate::record::ResultRecord
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("synthesis engine failure: {message}")]
pub struct EngineError {
    /// Engine-side failure description.
    pub message: String,
}

impl EngineError {
    /// Creates a new engine error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error type for a full generate-and-capture round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// The engine invocation itself failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine succeeded but its output could not be captured.
    #[error(transparent)]
    Capture(#[from] CaptureError),
}
