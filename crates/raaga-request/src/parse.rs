//! Textual seed-list and step-schedule handling.
//!
//! Seeds and step schedules cross the Presentation Layer boundary as
//! comma-separated decimal-integer strings; an empty string means "unset".
//! Parsing and joining are exact inverses so engine-assigned seeds can be
//! replayed verbatim into a dependent mode.

use crate::error::ParseError;

/// Parses comma-separated seed text.
///
/// Blank text yields `None` (the engine auto-selects); otherwise every token
/// must be a decimal integer.
pub fn parse_seed_list(field: &'static str, text: &str) -> Result<Option<Vec<u64>>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let mut seeds = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        let seed = token
            .parse::<u64>()
            .map_err(|_| ParseError::bad_token(field, token))?;
        seeds.push(seed);
    }
    Ok(Some(seeds))
}

/// Parses comma-separated step-schedule text.
///
/// Same token rules as seeds, plus the schedule must be strictly ascending
/// positive integers. Blank text yields `None` (default schedule derived
/// from the step count).
pub fn parse_step_schedule(
    field: &'static str,
    text: &str,
) -> Result<Option<Vec<u32>>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let mut steps = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        let step = token
            .parse::<u32>()
            .map_err(|_| ParseError::bad_token(field, token))?;
        steps.push(step);
    }
    if !is_valid_step_schedule(&steps) {
        return Err(ParseError::not_ascending(field));
    }
    Ok(Some(steps))
}

/// Checks that a step schedule is non-empty, positive, strictly ascending.
pub fn is_valid_step_schedule(steps: &[u32]) -> bool {
    match steps.first() {
        None => false,
        Some(&first) => first >= 1 && steps.windows(2).all(|w| w[0] < w[1]),
    }
}

/// Joins integers into the canonical comma-separated display form.
///
/// The lossless inverse of [`parse_seed_list`]/[`parse_step_schedule`]; an
/// empty slice joins to the empty (= unset) string.
pub fn join_ints<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_seed_list() {
        assert_eq!(
            parse_seed_list("manual_seeds", "42, 786").unwrap(),
            Some(vec![42, 786])
        );
        assert_eq!(parse_seed_list("manual_seeds", "").unwrap(), None);
        assert_eq!(parse_seed_list("manual_seeds", "   ").unwrap(), None);
        assert_eq!(
            parse_seed_list("manual_seeds", "7").unwrap(),
            Some(vec![7])
        );
    }

    #[test]
    fn test_parse_seed_list_rejects_bad_tokens() {
        let err = parse_seed_list("manual_seeds", "42, abc").unwrap_err();
        assert_eq!(err.field, "manual_seeds");
        assert!(err.message.contains("abc"));

        assert!(parse_seed_list("seeds", "42,,7").is_err());
        assert!(parse_seed_list("seeds", "-1").is_err());
        assert!(parse_seed_list("seeds", "4.2").is_err());
    }

    #[test]
    fn test_parse_step_schedule() {
        assert_eq!(
            parse_step_schedule("oss_steps", "16, 32, 64, 96").unwrap(),
            Some(vec![16, 32, 64, 96])
        );
        assert_eq!(parse_step_schedule("oss_steps", "").unwrap(), None);
    }

    #[test]
    fn test_parse_step_schedule_rejects_descending() {
        let err = parse_step_schedule("oss_steps", "96, 64").unwrap_err();
        assert!(err.message.contains("ascending"));
        // Repeated values are not strictly ascending either.
        assert!(parse_step_schedule("oss_steps", "16, 16").is_err());
        assert!(parse_step_schedule("oss_steps", "0, 8").is_err());
        assert!(parse_step_schedule("oss_steps", "16, x").is_err());
    }

    #[test]
    fn test_join_is_inverse_of_parse() {
        let text = "42, 786";
        let seeds = parse_seed_list("manual_seeds", text).unwrap().unwrap();
        assert_eq!(join_ints(&seeds), text);

        let empty: Vec<u64> = Vec::new();
        assert_eq!(join_ints(&empty), "");
    }
}
