//! ISO-8601 duration handling for `totalTime` style fields.
//!
//! Recipe sites emit durations like `PT1H30M`, but a known class of
//! malformed values carries an impossible year-to-day span (`P0Y0DT...`);
//! those are collapsed down to the day component before parsing.

use std::sync::LazyLock;

use log::error;
use regex::Regex;

/// Collapses the malformed `Y...D` span some sites emit.
static YEAR_TO_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Y.*D").expect("YEAR_TO_DAY regex"));

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("DURATION regex")
});

/// Parse an ISO-8601 duration into `(hours, minutes)`, with hours wrapped
/// at 24 and minutes at 60. Never fails: malformed input is logged and
/// reported as `(0, 0)`.
pub fn parse_duration(s: &str) -> (u32, u32) {
    match try_parse(s) {
        Some(pair) => pair,
        None => {
            error!("Failed to parse duration: {s}");
            (0, 0)
        }
    }
}

fn try_parse(s: &str) -> Option<(u32, u32)> {
    let cleaned = YEAR_TO_DAY.replace(s.trim(), "D");
    let captures = DURATION.captures(&cleaned)?;

    let component = |i: usize| -> Option<u64> {
        captures
            .get(i)
            .map(|m| m.as_str().parse::<u64>())
            .transpose()
            .ok()
            .flatten()
    };

    // A bare "P" or "PT" is not a duration
    if (1..=4).all(|i| captures.get(i).is_none()) {
        return None;
    }

    let days = component(1).unwrap_or(0);
    let hours = component(2).unwrap_or(0);
    let minutes = component(3).unwrap_or(0);
    let seconds = component(4).unwrap_or(0);

    let total_seconds = days * 86_400 + hours * 3_600 + minutes * 60 + seconds;
    let total_hours = (total_seconds / 3_600) % 24;
    let rem_minutes = (total_seconds / 60) % 60;

    Some((total_hours as u32, rem_minutes as u32))
}

/// Whether a string parses as a duration at all. Used to decide between
/// keeping a site's `totalTime` verbatim and falling back to `PT0M`.
pub fn is_valid_duration(s: &str) -> bool {
    try_parse(s).is_some()
}

/// `"1 h 30 min"` style rendering for display layers.
pub fn format_human(hours: u32, minutes: u32) -> String {
    format!("{hours} h {minutes} min")
}

/// Build an ISO-8601 duration expressed purely in minutes.
pub fn build_duration(hours: u32, minutes: u32) -> String {
    let total_minutes = hours * 60 + minutes;
    format!("PT{total_minutes}M")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours_and_minutes() {
        assert_eq!(parse_duration("PT1H30M"), (1, 30));
    }

    #[test]
    fn test_parse_minutes_only() {
        assert_eq!(parse_duration("PT20M"), (0, 20));
    }

    #[test]
    fn test_parse_with_days() {
        // 1 day 2 hours: hours wrap at 24
        assert_eq!(parse_duration("P1DT2H"), (2, 0));
    }

    #[test]
    fn test_parse_malformed_year_day_span() {
        // The "P0Y0DT1H" shape seen on some sites
        assert_eq!(parse_duration("P0Y0DT1H15M"), (1, 15));
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_duration("not-a-duration"), (0, 0));
        assert_eq!(parse_duration(""), (0, 0));
        assert_eq!(parse_duration("P"), (0, 0));
    }

    #[test]
    fn test_format_human() {
        assert_eq!(format_human(1, 30), "1 h 30 min");
        assert_eq!(format_human(0, 0), "0 h 0 min");
    }

    #[test]
    fn test_build_duration() {
        assert_eq!(build_duration(1, 30), "PT90M");
        assert_eq!(build_duration(0, 20), "PT20M");
    }
}
