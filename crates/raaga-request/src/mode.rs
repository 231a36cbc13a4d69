//! Operation modes and their extension parameters.
//!
//! Every mode shares the canonical field set of
//! [`GenerationRequest`](crate::request::GenerationRequest); the extensions
//! a mode contributes on top of it live in the [`ModeParams`] tagged union,
//! one variant per mode, so the five operations cannot drift apart the way
//! duplicated per-tab wiring would.

use serde::{Deserialize, Serialize};

/// Default retake variation.
pub const RETAKE_DEFAULT_VARIANCE: f64 = 0.25;
/// Default repaint variance.
pub const REPAINT_DEFAULT_VARIANCE: f64 = 0.2;
/// Default repaint window start in seconds.
pub const REPAINT_DEFAULT_START_SEC: f64 = 0.0;
/// Default repaint window end in seconds.
pub const REPAINT_DEFAULT_END_SEC: f64 = 30.0;
/// Default fraction of the diffusion trajectory where an edit starts.
pub const EDIT_DEFAULT_RANGE_MIN: f64 = 0.6;
/// Default fraction of the diffusion trajectory where an edit ends.
pub const EDIT_DEFAULT_RANGE_MAX: f64 = 1.0;
/// Default left extension in seconds.
pub const EXTEND_DEFAULT_LEFT_SEC: f64 = 0.0;
/// Default right extension in seconds.
pub const EXTEND_DEFAULT_RIGHT_SEC: f64 = 30.0;

/// Operation modes supported by the orchestration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Initial generation from style tags and lyrics.
    #[serde(rename = "text2music")]
    Text2Music,
    /// Same song, different seeds/variance.
    Retake,
    /// Regenerate a time window of a prior output.
    Repaint,
    /// Rewrite lyrics (or remix) over a prior output.
    Edit,
    /// Extend a prior output to the left and/or right.
    Extend,
}

impl Mode {
    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Text2Music => "text2music",
            Mode::Retake => "retake",
            Mode::Repaint => "repaint",
            Mode::Edit => "edit",
            Mode::Extend => "extend",
        }
    }

    /// Returns all modes.
    pub fn all() -> &'static [Mode] {
        &[
            Mode::Text2Music,
            Mode::Retake,
            Mode::Repaint,
            Mode::Edit,
            Mode::Extend,
        ]
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text2music" => Ok(Mode::Text2Music),
            "retake" => Ok(Mode::Retake),
            "repaint" => Ok(Mode::Repaint),
            "edit" => Ok(Mode::Edit),
            "extend" => Ok(Mode::Extend),
            _ => Err(format!("unknown mode: {}", s)),
        }
    }
}

/// The audio a dependent mode operates on.
///
/// The non-upload discriminants implicitly reference the most recent
/// [`ResultRecord`](crate::record::ResultRecord) of the matching mode; only
/// `upload` carries an explicit reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioSource {
    /// The prior text2music output.
    #[serde(rename = "text2music")]
    Text2Music,
    /// The prior output of the same mode (last repaint, last edit, ...).
    LastOutput,
    /// A user-uploaded audio file.
    Upload {
        /// Path of the uploaded audio file.
        path: String,
    },
}

/// What an edit re-walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// Keep the arrangement, replace only the sung lyrics.
    OnlyLyrics,
    /// Re-walk style as well.
    Remix,
}

impl EditKind {
    /// Returns the edit kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::OnlyLyrics => "only_lyrics",
            EditKind::Remix => "remix",
        }
    }
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EditKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "only_lyrics" => Ok(EditKind::OnlyLyrics),
            "remix" => Ok(EditKind::Remix),
            _ => Err(format!("unknown edit kind: {}", s)),
        }
    }
}

/// Mode-specific extension parameters, tagged by `mode`.
///
/// Serialized inline into the request document (internally tagged), so a
/// request JSON reads as one flat record with a `mode` discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeParams {
    /// Initial generation carries no extensions.
    #[serde(rename = "text2music")]
    Text2Music,

    /// Retake: same song, new seeds and variance.
    Retake {
        /// How far the retake may wander from the source (0-1).
        variance: f64,
        /// Explicit seed override; absent means engine-selected.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeds: Option<Vec<u64>>,
    },

    /// Repaint: regenerate a time window of the source audio.
    Repaint {
        /// How far the repaint may wander from the source (0-1).
        variance: f64,
        /// Explicit seed override; absent means engine-selected.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeds: Option<Vec<u64>>,
        /// Window start in seconds.
        start_sec: f64,
        /// Window end in seconds.
        end_sec: f64,
        /// Audio being repainted.
        source: AudioSource,
    },

    /// Edit: new lyrics (and optionally style) over the source audio.
    Edit {
        /// Replacement style tags.
        edit_prompt: String,
        /// Replacement lyrics.
        edit_lyrics: String,
        /// Explicit seed override; absent means engine-selected.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeds: Option<Vec<u64>>,
        /// Lyrics-only or full remix.
        edit_kind: EditKind,
        /// Fraction of the diffusion trajectory where the re-walk starts (0-1).
        edit_range_min: f64,
        /// Fraction of the diffusion trajectory where the re-walk ends (0-1).
        edit_range_max: f64,
        /// Audio being edited.
        source: AudioSource,
    },

    /// Extend: lengthen the source audio on either side.
    Extend {
        /// Explicit seed override; absent means engine-selected.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeds: Option<Vec<u64>>,
        /// Seconds prepended before the source.
        left_extend_sec: f64,
        /// Seconds appended after the source.
        right_extend_sec: f64,
        /// Audio being extended.
        source: AudioSource,
    },
}

impl ModeParams {
    /// Returns the mode tag of these parameters.
    pub fn mode(&self) -> Mode {
        match self {
            ModeParams::Text2Music => Mode::Text2Music,
            ModeParams::Retake { .. } => Mode::Retake,
            ModeParams::Repaint { .. } => Mode::Repaint,
            ModeParams::Edit { .. } => Mode::Edit,
            ModeParams::Extend { .. } => Mode::Extend,
        }
    }

    /// Returns the mode's explicit seed override, if any.
    pub fn seeds(&self) -> Option<&[u64]> {
        match self {
            ModeParams::Text2Music => None,
            ModeParams::Retake { seeds, .. }
            | ModeParams::Repaint { seeds, .. }
            | ModeParams::Edit { seeds, .. }
            | ModeParams::Extend { seeds, .. } => seeds.as_deref(),
        }
    }

    /// Returns the audio source for modes that carry one.
    pub fn source(&self) -> Option<&AudioSource> {
        match self {
            ModeParams::Text2Music | ModeParams::Retake { .. } => None,
            ModeParams::Repaint { source, .. }
            | ModeParams::Edit { source, .. }
            | ModeParams::Extend { source, .. } => Some(source),
        }
    }
}
