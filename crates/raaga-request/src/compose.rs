//! Request Composer: the single choke point that turns raw front-end field
//! values, a mode, and (for dependent modes) a source into a validated
//! [`GenerationRequest`].
//!
//! Composition is pure: it never invokes the Synthesis Engine, and a
//! composition error means no engine call happens at all.

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, MissingSourceError};
use crate::mode::{AudioSource, EditKind, Mode, ModeParams};
use crate::parse::{join_ints, parse_seed_list, parse_step_schedule};
use crate::record::ResultRecord;
use crate::request::{CfgType, GenerationRequest, Scheduler, AUTO_DURATION};
use crate::validation::validate_request;

/// Raw field values as the Presentation Layer holds them.
///
/// Numbers come straight off the sliders; seeds and the step schedule are
/// still comma-separated text. Field names and declaration order follow the
/// canonical engine-boundary ordering
/// ([`FIELD_ORDER`](crate::request::FIELD_ORDER)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    /// Duration slider; -1 means auto.
    pub audio_duration: f64,
    /// Style & tags textbox.
    pub prompt: String,
    /// Lyrics textbox.
    pub lyrics: String,
    /// Inference-steps slider.
    pub infer_step: u32,
    /// Guidance-scale slider.
    pub guidance_scale: f64,
    /// Scheduler radio.
    pub scheduler_type: Scheduler,
    /// CFG-type radio.
    pub cfg_type: CfgType,
    /// Granularity slider.
    pub omega_scale: f64,
    /// Manual-seeds textbox (comma-separated, blank = auto).
    #[serde(default)]
    pub manual_seeds: String,
    /// Guidance-interval slider.
    pub guidance_interval: f64,
    /// Guidance-decay slider.
    pub guidance_interval_decay: f64,
    /// Min-guidance slider.
    pub min_guidance_scale: f64,
    /// ERG-for-tags checkbox.
    pub use_erg_tag: bool,
    /// ERG-for-lyrics checkbox.
    pub use_erg_lyric: bool,
    /// ERG-for-diffusion checkbox.
    pub use_erg_diffusion: bool,
    /// Step-schedule textbox (comma-separated, blank = default schedule).
    #[serde(default)]
    pub oss_steps: String,
    /// Text guidance slider.
    pub guidance_scale_text: f64,
    /// Lyric guidance slider.
    pub guidance_scale_lyric: f64,
}

impl Default for FormFields {
    /// The form exactly as it ships: sample tags/lyrics, default numerics,
    /// blank seed and step-schedule text.
    fn default() -> Self {
        let sample = GenerationRequest::sample();
        Self {
            audio_duration: AUTO_DURATION,
            prompt: sample.style_prompt,
            lyrics: sample.lyrics,
            infer_step: sample.inference_steps,
            guidance_scale: sample.guidance_scale,
            scheduler_type: sample.scheduler,
            cfg_type: sample.cfg_type,
            omega_scale: sample.granularity,
            manual_seeds: String::new(),
            guidance_interval: sample.guidance_interval,
            guidance_interval_decay: sample.guidance_interval_decay,
            min_guidance_scale: sample.min_guidance_scale,
            use_erg_tag: sample.use_tag_guidance,
            use_erg_lyric: sample.use_lyric_guidance,
            use_erg_diffusion: sample.use_diffusion_guidance,
            oss_steps: String::new(),
            guidance_scale_text: sample.guidance_scale_text,
            guidance_scale_lyric: sample.guidance_scale_lyric,
        }
    }
}

/// Where a dependent mode's shared configuration and audio come from.
#[derive(Debug, Clone, Copy)]
pub enum SourceInput<'a> {
    /// A prior result record; its entire shared configuration is replayed.
    Record(&'a ResultRecord),
    /// An uploaded audio file; the shared configuration comes from the
    /// current form fields instead.
    Upload(&'a str),
    /// Nothing available. Dependent modes fail with
    /// [`MissingSourceError`].
    None,
}

/// Per-mode inputs to one composition.
///
/// Seed text is raw, exactly as typed; blank means "engine selects".
#[derive(Debug, Clone)]
pub enum ModeInput<'a> {
    /// Initial generation from the form fields alone.
    Text2Music,
    /// Retake of a prior result.
    Retake {
        /// Variation amount (0-1).
        variance: f64,
        /// Raw retake-seed text.
        seeds: &'a str,
        /// The record being retaken; retake has no upload arm.
        source: Option<&'a ResultRecord>,
    },
    /// Repaint of a time window.
    Repaint {
        /// Variance amount (0-1).
        variance: f64,
        /// Raw repaint-seed text.
        seeds: &'a str,
        /// Window start, seconds.
        start_sec: f64,
        /// Window end, seconds.
        end_sec: f64,
        /// Record or upload being repainted.
        source: SourceInput<'a>,
    },
    /// Lyric/style edit.
    Edit {
        /// Replacement style tags.
        edit_prompt: &'a str,
        /// Replacement lyrics.
        edit_lyrics: &'a str,
        /// Raw edit-seed text.
        seeds: &'a str,
        /// Lyrics-only or remix.
        edit_kind: EditKind,
        /// Diffusion-trajectory re-walk start (0-1).
        edit_range_min: f64,
        /// Diffusion-trajectory re-walk end (0-1).
        edit_range_max: f64,
        /// Record or upload being edited.
        source: SourceInput<'a>,
    },
    /// Extension on either side.
    Extend {
        /// Raw extend-seed text.
        seeds: &'a str,
        /// Seconds prepended.
        left_extend_sec: f64,
        /// Seconds appended.
        right_extend_sec: f64,
        /// Record or upload being extended.
        source: SourceInput<'a>,
    },
}

impl ModeInput<'_> {
    /// Returns the mode being composed.
    pub fn mode(&self) -> Mode {
        match self {
            ModeInput::Text2Music => Mode::Text2Music,
            ModeInput::Retake { .. } => Mode::Retake,
            ModeInput::Repaint { .. } => Mode::Repaint,
            ModeInput::Edit { .. } => Mode::Edit,
            ModeInput::Extend { .. } => Mode::Extend,
        }
    }
}

/// Composes a validated [`GenerationRequest`] from raw field values.
///
/// Dependent modes replay the entire shared configuration from their source
/// record (or from `fields` when the source is an upload) and contribute
/// only their registered extension fields; see
/// [`registry`](crate::registry).
pub fn compose(fields: &FormFields, input: ModeInput<'_>) -> Result<GenerationRequest, ComposeError> {
    let request = match input {
        ModeInput::Text2Music => base_from_fields(fields)?,

        ModeInput::Retake {
            variance,
            seeds,
            source,
        } => {
            let record = source.ok_or(MissingSourceError { mode: Mode::Retake })?;
            let mut request = base_from_record(record);
            request.params = ModeParams::Retake {
                variance,
                seeds: parse_seed_list("seeds", seeds)?,
            };
            request
        }

        ModeInput::Repaint {
            variance,
            seeds,
            start_sec,
            end_sec,
            source,
        } => {
            let (mut request, source) = resolve_source(Mode::Repaint, fields, source)?;
            request.params = ModeParams::Repaint {
                variance,
                seeds: parse_seed_list("seeds", seeds)?,
                start_sec,
                end_sec,
                source,
            };
            request
        }

        ModeInput::Edit {
            edit_prompt,
            edit_lyrics,
            seeds,
            edit_kind,
            edit_range_min,
            edit_range_max,
            source,
        } => {
            let (mut request, source) = resolve_source(Mode::Edit, fields, source)?;
            request.params = ModeParams::Edit {
                edit_prompt: edit_prompt.to_string(),
                edit_lyrics: edit_lyrics.to_string(),
                seeds: parse_seed_list("seeds", seeds)?,
                edit_kind,
                edit_range_min,
                edit_range_max,
                source,
            };
            request
        }

        ModeInput::Extend {
            seeds,
            left_extend_sec,
            right_extend_sec,
            source,
        } => {
            let (mut request, source) = resolve_source(Mode::Extend, fields, source)?;
            request.params = ModeParams::Extend {
                seeds: parse_seed_list("seeds", seeds)?,
                left_extend_sec,
                right_extend_sec,
                source,
            };
            request
        }
    };

    validate_request(&request)?;
    Ok(request)
}

/// Shared configuration straight from the form.
fn base_from_fields(fields: &FormFields) -> Result<GenerationRequest, ComposeError> {
    Ok(GenerationRequest {
        duration: fields.audio_duration,
        style_prompt: fields.prompt.clone(),
        lyrics: fields.lyrics.clone(),
        inference_steps: fields.infer_step,
        guidance_scale: fields.guidance_scale,
        scheduler: fields.scheduler_type,
        cfg_type: fields.cfg_type,
        granularity: fields.omega_scale,
        manual_seeds: parse_seed_list("manual_seeds", &fields.manual_seeds)?,
        guidance_interval: fields.guidance_interval,
        guidance_interval_decay: fields.guidance_interval_decay,
        min_guidance_scale: fields.min_guidance_scale,
        use_tag_guidance: fields.use_erg_tag,
        use_lyric_guidance: fields.use_erg_lyric,
        use_diffusion_guidance: fields.use_erg_diffusion,
        custom_step_schedule: parse_step_schedule("oss_steps", &fields.oss_steps)?,
        guidance_scale_text: fields.guidance_scale_text,
        guidance_scale_lyric: fields.guidance_scale_lyric,
        params: ModeParams::Text2Music,
    })
}

/// Shared configuration replayed from a prior record.
///
/// The record's engine-resolved seeds and step schedule become the new
/// request's manual values, so the dependent run reproduces the source
/// exactly except where its own extension fields say otherwise.
fn base_from_record(record: &ResultRecord) -> GenerationRequest {
    let mut request = record.request.clone();
    request.manual_seeds = Some(record.actual_seeds.clone());
    if request.custom_step_schedule.is_none() && !record.resolved_steps.is_empty() {
        request.custom_step_schedule = Some(record.resolved_steps.clone());
    }
    request.params = ModeParams::Text2Music;
    request
}

fn resolve_source(
    mode: Mode,
    fields: &FormFields,
    source: SourceInput<'_>,
) -> Result<(GenerationRequest, AudioSource), ComposeError> {
    match source {
        SourceInput::Record(record) => {
            let audio = if record.mode() == Mode::Text2Music {
                AudioSource::Text2Music
            } else {
                AudioSource::LastOutput
            };
            Ok((base_from_record(record), audio))
        }
        SourceInput::Upload(path) if !path.trim().is_empty() => Ok((
            base_from_fields(fields)?,
            AudioSource::Upload {
                path: path.to_string(),
            },
        )),
        SourceInput::Upload(_) | SourceInput::None => {
            Err(MissingSourceError { mode }.into())
        }
    }
}

/// Replay mapping: the exact inverse of the composer's flattening.
///
/// Pre-fills a dependent mode's form (or the "what was actually used" view)
/// from a record. Engine-resolved seeds and steps come back in their
/// lossless comma-joined textual form, so composing from the returned
/// fields reproduces the recorded request.
pub fn to_replay_fields(record: &ResultRecord) -> FormFields {
    let request = &record.request;
    FormFields {
        audio_duration: request.duration,
        prompt: request.style_prompt.clone(),
        lyrics: request.lyrics.clone(),
        infer_step: request.inference_steps,
        guidance_scale: request.guidance_scale,
        scheduler_type: request.scheduler,
        cfg_type: request.cfg_type,
        omega_scale: request.granularity,
        manual_seeds: join_ints(&record.actual_seeds),
        guidance_interval: request.guidance_interval,
        guidance_interval_decay: request.guidance_interval_decay,
        min_guidance_scale: request.min_guidance_scale,
        use_erg_tag: request.use_tag_guidance,
        use_erg_lyric: request.use_lyric_guidance,
        use_erg_diffusion: request.use_diffusion_guidance,
        oss_steps: join_ints(&record.resolved_steps),
        guidance_scale_text: request.guidance_scale_text,
        guidance_scale_lyric: request.guidance_scale_lyric,
    }
}
