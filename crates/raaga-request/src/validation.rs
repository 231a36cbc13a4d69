//! Fail-fast bounds validation for composed requests.
//!
//! Every numeric field has declared slider bounds; a value outside them is
//! rejected with a [`ValidationError`] before the engine is ever invoked.
//! The one deliberate hole is the duration auto sentinel: `-1` passes
//! through untouched, and the 30-240 s auto floor is the engine's business.

use crate::error::ValidationError;
use crate::mode::{AudioSource, ModeParams};
use crate::parse::is_valid_step_schedule;
use crate::request::{GenerationRequest, AUTO_DURATION, MAX_DURATION};

/// Declared bounds of one numeric field.
struct Bound {
    field: &'static str,
    min: f64,
    max: f64,
    value: fn(&GenerationRequest) -> f64,
}

const SHARED_BOUNDS: &[Bound] = &[
    Bound {
        field: "guidance_scale",
        min: 0.0,
        max: 200.0,
        value: |r| r.guidance_scale,
    },
    Bound {
        field: "guidance_scale_text",
        min: 0.0,
        max: 10.0,
        value: |r| r.guidance_scale_text,
    },
    Bound {
        field: "guidance_scale_lyric",
        min: 0.0,
        max: 10.0,
        value: |r| r.guidance_scale_lyric,
    },
    Bound {
        field: "omega_scale",
        min: -100.0,
        max: 100.0,
        value: |r| r.granularity,
    },
    Bound {
        field: "guidance_interval",
        min: 0.0,
        max: 1.0,
        value: |r| r.guidance_interval,
    },
    Bound {
        field: "guidance_interval_decay",
        min: 0.0,
        max: 1.0,
        value: |r| r.guidance_interval_decay,
    },
    Bound {
        field: "min_guidance_scale",
        min: 0.0,
        max: 200.0,
        value: |r| r.min_guidance_scale,
    },
];

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, value, min, max))
    }
}

/// Validates a request against the declared field bounds.
///
/// Covers the shared field set and the mode extensions of
/// [`params`](GenerationRequest::params). Returns the first violation found.
pub fn validate_request(request: &GenerationRequest) -> Result<(), ValidationError> {
    // Exactly -1 or within [0, 240]; the auto floor is enforced engine-side.
    if request.duration != AUTO_DURATION {
        check_range("audio_duration", request.duration, 0.0, MAX_DURATION)?;
    }

    if !(1..=60).contains(&request.inference_steps) {
        return Err(ValidationError::out_of_range(
            "infer_step",
            f64::from(request.inference_steps),
            1.0,
            60.0,
        ));
    }

    for bound in SHARED_BOUNDS {
        check_range(bound.field, (bound.value)(request), bound.min, bound.max)?;
    }

    if let Some(seeds) = &request.manual_seeds {
        if seeds.is_empty() {
            return Err(ValidationError::new(
                "manual_seeds",
                "present but empty; omit the field to let the engine select seeds",
            ));
        }
    }

    if let Some(steps) = &request.custom_step_schedule {
        if !is_valid_step_schedule(steps) {
            return Err(ValidationError::new(
                "oss_steps",
                "step schedule must be strictly ascending positive integers",
            ));
        }
    }

    validate_mode_params(&request.params)
}

fn validate_mode_params(params: &ModeParams) -> Result<(), ValidationError> {
    match params {
        ModeParams::Text2Music => Ok(()),
        ModeParams::Retake { variance, .. } => check_range("variance", *variance, 0.0, 1.0),
        ModeParams::Repaint {
            variance,
            start_sec,
            end_sec,
            source,
            ..
        } => {
            check_range("variance", *variance, 0.0, 1.0)?;
            check_range("start_sec", *start_sec, 0.0, MAX_DURATION)?;
            check_range("end_sec", *end_sec, 0.0, MAX_DURATION)?;
            if end_sec < start_sec {
                return Err(ValidationError::new(
                    "end_sec",
                    "repaint window ends before it starts",
                ));
            }
            validate_source(source)
        }
        ModeParams::Edit {
            edit_range_min,
            edit_range_max,
            source,
            ..
        } => {
            check_range("edit_range_min", *edit_range_min, 0.0, 1.0)?;
            check_range("edit_range_max", *edit_range_max, 0.0, 1.0)?;
            if edit_range_max < edit_range_min {
                return Err(ValidationError::new(
                    "edit_range_max",
                    "edit range ends before it starts",
                ));
            }
            validate_source(source)
        }
        ModeParams::Extend {
            left_extend_sec,
            right_extend_sec,
            source,
            ..
        } => {
            check_range("left_extend_sec", *left_extend_sec, 0.0, MAX_DURATION)?;
            check_range("right_extend_sec", *right_extend_sec, 0.0, MAX_DURATION)?;
            validate_source(source)
        }
    }
}

fn validate_source(source: &AudioSource) -> Result<(), ValidationError> {
    match source {
        AudioSource::Text2Music | AudioSource::LastOutput => Ok(()),
        AudioSource::Upload { path } => {
            if path.trim().is_empty() {
                Err(ValidationError::new(
                    "source",
                    "upload source carries no audio reference",
                ))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{EditKind, Mode};
    use crate::request::GenerationRequest;

    fn sample() -> GenerationRequest {
        GenerationRequest::sample()
    }

    #[test]
    fn test_sample_request_is_valid() {
        assert!(validate_request(&sample()).is_ok());
    }

    #[test]
    fn test_auto_duration_passes_through() {
        let mut req = sample();
        req.duration = AUTO_DURATION;
        assert!(validate_request(&req).is_ok());

        // Below the auto floor is still legal here; the engine owns that rule.
        req.duration = 12.5;
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_duration_bounds() {
        let mut req = sample();
        req.duration = 241.0;
        assert_eq!(
            validate_request(&req).unwrap_err().field,
            "audio_duration"
        );
        req.duration = -2.0;
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_numeric_bounds_rejected_not_clamped() {
        let mut req = sample();
        req.guidance_scale = 200.5;
        let err = validate_request(&req).unwrap_err();
        assert_eq!(err.field, "guidance_scale");

        let mut req = sample();
        req.inference_steps = 0;
        assert_eq!(validate_request(&req).unwrap_err().field, "infer_step");

        let mut req = sample();
        req.inference_steps = 61;
        assert!(validate_request(&req).is_err());

        let mut req = sample();
        req.granularity = -100.5;
        assert_eq!(validate_request(&req).unwrap_err().field, "omega_scale");

        let mut req = sample();
        req.guidance_interval = 1.01;
        assert!(validate_request(&req).is_err());

        let mut req = sample();
        req.guidance_scale_lyric = f64::NAN;
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_empty_manual_seed_list_rejected() {
        let mut req = sample();
        req.manual_seeds = Some(Vec::new());
        assert_eq!(validate_request(&req).unwrap_err().field, "manual_seeds");
    }

    #[test]
    fn test_structured_step_schedule_must_ascend() {
        let mut req = sample();
        req.custom_step_schedule = Some(vec![96, 64]);
        assert_eq!(validate_request(&req).unwrap_err().field, "oss_steps");

        req.custom_step_schedule = Some(vec![16, 32, 64, 96]);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_mode_extension_bounds() {
        let mut req = sample();
        req.params = ModeParams::Retake {
            variance: 1.5,
            seeds: None,
        };
        assert_eq!(validate_request(&req).unwrap_err().field, "variance");

        req.params = ModeParams::Repaint {
            variance: 0.2,
            seeds: None,
            start_sec: 30.0,
            end_sec: 10.0,
            source: AudioSource::Text2Music,
        };
        assert_eq!(validate_request(&req).unwrap_err().field, "end_sec");

        req.params = ModeParams::Edit {
            edit_prompt: String::new(),
            edit_lyrics: String::new(),
            seeds: None,
            edit_kind: EditKind::OnlyLyrics,
            edit_range_min: 0.8,
            edit_range_max: 0.6,
            source: AudioSource::LastOutput,
        };
        assert_eq!(
            validate_request(&req).unwrap_err().field,
            "edit_range_max"
        );
        assert_eq!(req.mode(), Mode::Edit);
    }

    #[test]
    fn test_blank_upload_reference_rejected() {
        let mut req = sample();
        req.params = ModeParams::Extend {
            seeds: None,
            left_extend_sec: 0.0,
            right_extend_sec: 30.0,
            source: AudioSource::Upload {
                path: "  ".to_string(),
            },
        };
        assert_eq!(validate_request(&req).unwrap_err().field, "source");
    }
}
