//! Canonical generation-request type.
//!
//! One [`GenerationRequest`] is the complete, validated parameter set for a
//! single Synthesis Engine invocation, regardless of mode. The old
//! positional argument list between the front-end and the engine is a de
//! facto wire contract; it survives here as [`FIELD_ORDER`] while the data
//! itself travels as this explicit struct.

use serde::{Deserialize, Serialize};

use crate::mode::{Mode, ModeParams};

/// Sentinel duration meaning "engine picks a length within its auto range".
pub const AUTO_DURATION: f64 = -1.0;
/// Floor of the engine's auto-selected duration range, seconds.
pub const MIN_AUTO_DURATION: f64 = 30.0;
/// Longest generatable duration, seconds.
pub const MAX_DURATION: f64 = 240.0;

/// Shipped default style tags.
pub const TAG_DEFAULT: &str = "bollywood, hindi cinematic, emotional, romantic, 90s style, strings, flute, tabla, sitar, soft drums, lush orchestration, heartfelt, anthemic chorus, male vocalist, 92 BPM";

/// Shipped default section-tagged lyric block.
pub const LYRIC_DEFAULT: &str = "[intro]
Dhadkanen... sun rahi hain...
[verse]
Tere bin ye pal adhure se lagte hain
Raaton mein bas tere khwab jagte hain
[verse]
Dooriyon ne sikhaya hai jeena
Phir bhi dil tujhko hi chahe har dina
[chorus]
O sanam... tere bina jee na sakein hum
Tere sang hi saansein chalein ab toh
Dil ne yeh iraada kar liya hai
Tujhse hi toh poora har khwab hai
[bridge]
Hawaon mein teri khushboo hai
Aankhon mein bas tera nasha hai
[instrumental]
[chorus]
O sanam... tere bina jee na sakein hum
Tere sang hi saansein chalein ab toh";

/// Canonical field ordering of the engine call boundary.
///
/// The order the front-end's fields historically occupied in the positional
/// `generate(...)` signature. Display code and the replay mapping keep this
/// ordering so "what was actually used" reads the same everywhere.
pub const FIELD_ORDER: &[&str] = &[
    "audio_duration",
    "prompt",
    "lyrics",
    "infer_step",
    "guidance_scale",
    "scheduler_type",
    "cfg_type",
    "omega_scale",
    "manual_seeds",
    "guidance_interval",
    "guidance_interval_decay",
    "min_guidance_scale",
    "use_erg_tag",
    "use_erg_lyric",
    "use_erg_diffusion",
    "oss_steps",
    "guidance_scale_text",
    "guidance_scale_lyric",
];

/// Diffusion scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduler {
    /// First-order Euler scheduler.
    Euler,
    /// Second-order Heun scheduler.
    Heun,
}

impl Scheduler {
    /// Returns the scheduler as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheduler::Euler => "euler",
            Scheduler::Heun => "heun",
        }
    }
}

impl std::fmt::Display for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Scheduler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euler" => Ok(Scheduler::Euler),
            "heun" => Ok(Scheduler::Heun),
            _ => Err(format!("unknown scheduler: {}", s)),
        }
    }
}

/// Classifier-free-guidance variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CfgType {
    /// Plain classifier-free guidance.
    Cfg,
    /// Adaptive projected guidance.
    Apg,
    /// CFG* variant.
    CfgStar,
}

impl CfgType {
    /// Returns the CFG type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CfgType::Cfg => "cfg",
            CfgType::Apg => "apg",
            CfgType::CfgStar => "cfg_star",
        }
    }
}

impl std::fmt::Display for CfgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CfgType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cfg" => Ok(CfgType::Cfg),
            "apg" => Ok(CfgType::Apg),
            "cfg_star" => Ok(CfgType::CfgStar),
            _ => Err(format!("unknown cfg type: {}", s)),
        }
    }
}

/// A fully specified generation request.
///
/// The shared parameter contract every mode uses, plus the mode's own
/// extensions in [`params`](Self::params). Constructed fresh per user
/// action by the composer and never mutated afterwards. Serde names mirror
/// the engine's historical JSON keys so records round-trip against the
/// existing wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Length in seconds; [`AUTO_DURATION`] lets the engine pick within
    /// [[`MIN_AUTO_DURATION`], [`MAX_DURATION`]].
    #[serde(rename = "audio_duration")]
    pub duration: f64,

    /// Comma-separated style descriptors.
    #[serde(rename = "prompt")]
    pub style_prompt: String,

    /// Section-tagged lyric text; bracket markers are opaque to this layer.
    pub lyrics: String,

    /// Number of inference steps (1-60).
    #[serde(rename = "infer_step")]
    pub inference_steps: u32,

    /// Primary guidance scale (0-200).
    pub guidance_scale: f64,

    /// Diffusion scheduler.
    #[serde(rename = "scheduler_type")]
    pub scheduler: Scheduler,

    /// Classifier-free-guidance variant.
    pub cfg_type: CfgType,

    /// Omega/granularity scale (-100-100).
    #[serde(rename = "omega_scale")]
    pub granularity: f64,

    /// Explicit seeds; absent means the engine selects and reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_seeds: Option<Vec<u64>>,

    /// Fraction of the schedule over which guidance applies (0-1).
    pub guidance_interval: f64,

    /// Guidance decay over the interval (0-1).
    pub guidance_interval_decay: f64,

    /// Lower guidance bound (0-200).
    pub min_guidance_scale: f64,

    /// Extra-reference guidance on style tags.
    #[serde(rename = "use_erg_tag")]
    pub use_tag_guidance: bool,

    /// Extra-reference guidance on lyrics.
    #[serde(rename = "use_erg_lyric")]
    pub use_lyric_guidance: bool,

    /// Extra-reference guidance on diffusion.
    #[serde(rename = "use_erg_diffusion")]
    pub use_diffusion_guidance: bool,

    /// Override of the default step schedule; strictly ascending when set.
    #[serde(rename = "oss_steps", default, skip_serializing_if = "Option::is_none")]
    pub custom_step_schedule: Option<Vec<u32>>,

    /// Secondary guidance channel on text (0-10).
    pub guidance_scale_text: f64,

    /// Secondary guidance channel on lyrics (0-10).
    pub guidance_scale_lyric: f64,

    /// Mode tag plus the mode's extension fields, inlined.
    #[serde(flatten)]
    pub params: ModeParams,
}

impl GenerationRequest {
    /// Returns the shipped sample request: default style/lyric text and
    /// default numeric settings, text2music, no engine involvement.
    pub fn sample() -> Self {
        Self {
            duration: AUTO_DURATION,
            style_prompt: TAG_DEFAULT.to_string(),
            lyrics: LYRIC_DEFAULT.to_string(),
            inference_steps: 30,
            guidance_scale: 18.0,
            scheduler: Scheduler::Euler,
            cfg_type: CfgType::Apg,
            granularity: 12.0,
            manual_seeds: None,
            guidance_interval: 0.5,
            guidance_interval_decay: 0.0,
            min_guidance_scale: 3.0,
            use_tag_guidance: true,
            use_lyric_guidance: true,
            use_diffusion_guidance: true,
            custom_step_schedule: None,
            guidance_scale_text: 3.0,
            guidance_scale_lyric: 6.0,
            params: ModeParams::Text2Music,
        }
    }

    /// Returns the mode tag of this request.
    pub fn mode(&self) -> Mode {
        self.params.mode()
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the request to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the request to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
