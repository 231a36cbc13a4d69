//! Mode extension registry.
//!
//! Declares, per mode, which fields extend the shared contract and where a
//! dependent mode's shared configuration may come from. The merge rule
//! itself is enforced by [`compose`](crate::compose::compose): dependent
//! modes replay the *entire* shared style/lyric/guidance configuration from
//! their source and may override only the fields listed here. That policy is
//! what makes "retake" mean "same song, different seeds" instead of "please
//! re-enter everything".

use crate::mode::Mode;

/// Extension fields a mode contributes on top of the shared contract.
///
/// Names match the serialized form of
/// [`ModeParams`](crate::mode::ModeParams).
pub fn extension_fields(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Text2Music => &[],
        Mode::Retake => &["variance", "seeds"],
        Mode::Repaint => &["variance", "seeds", "start_sec", "end_sec", "source"],
        Mode::Edit => &[
            "edit_prompt",
            "edit_lyrics",
            "seeds",
            "edit_kind",
            "edit_range_min",
            "edit_range_max",
            "source",
        ],
        Mode::Extend => &["seeds", "left_extend_sec", "right_extend_sec", "source"],
    }
}

/// Whether a mode chains off prior output (everything except text2music).
pub fn requires_source(mode: Mode) -> bool {
    mode != Mode::Text2Music
}

/// Whether a mode's source may be an uploaded file instead of a prior
/// result record. Retake re-seeds a prior request, so it has no upload arm.
pub fn allows_upload(mode: Mode) -> bool {
    matches!(mode, Mode::Repaint | Mode::Edit | Mode::Extend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FIELD_ORDER;

    #[test]
    fn test_text2music_contributes_nothing() {
        assert!(extension_fields(Mode::Text2Music).is_empty());
        assert!(!requires_source(Mode::Text2Music));
        assert!(!allows_upload(Mode::Text2Music));
    }

    #[test]
    fn test_dependent_modes_require_a_source() {
        for mode in [Mode::Retake, Mode::Repaint, Mode::Edit, Mode::Extend] {
            assert!(requires_source(mode), "{} should require a source", mode);
        }
        assert!(!allows_upload(Mode::Retake));
        assert!(allows_upload(Mode::Repaint));
        assert!(allows_upload(Mode::Edit));
        assert!(allows_upload(Mode::Extend));
    }

    #[test]
    fn test_extension_fields_never_shadow_shared_fields() {
        for mode in Mode::all() {
            for field in extension_fields(*mode) {
                assert!(
                    !FIELD_ORDER.contains(field),
                    "{} extension {} collides with the shared contract",
                    mode,
                    field
                );
            }
        }
    }
}
