//! Compact time notation codec
//!
//! Segment configs write times as `H:MM:SS`, `MM:SS` or `SS`. A lone field is
//! raw seconds, so `"90"` is ninety seconds rather than `1:30`. Fields are not
//! range-checked: `"1:75"` is 135 seconds. Rendering always normalises.

use std::time::Duration;

use crate::domain::errors::PlanError;
use crate::domain::model::TimeValue;

/// Upper bound for the length of a single clip
pub const MAX_TIME_DIFFERENCE: Duration = Duration::from_secs(24 * 3600);

const MAX_FIELDS: usize = 3;

/// Parse `H:MM:SS`, `MM:SS` or `SS` into a time value
pub fn parse_compact_time(text: &str) -> Result<TimeValue, PlanError> {
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() > MAX_FIELDS {
        return Err(malformed(
            text,
            format!("expected at most {} fields, found {}", MAX_FIELDS, fields.len()),
        ));
    }

    let mut seconds: u64 = 0;
    for field in fields {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(text, format!("'{}' is not a whole number", field)));
        }
        let value: u64 = field
            .parse()
            .map_err(|e| malformed(text, format!("'{}': {}", field, e)))?;
        seconds = seconds
            .checked_mul(60)
            .and_then(|s| s.checked_add(value))
            .ok_or_else(|| malformed(text, "value is too large".to_string()))?;
    }

    Ok(TimeValue::from_secs(seconds))
}

/// Absolute elapsed time between two points, capped at 24 hours
pub fn time_difference(a: &TimeValue, b: &TimeValue) -> Result<TimeValue, PlanError> {
    let difference = a.abs_diff(b);
    if difference.as_duration() > MAX_TIME_DIFFERENCE {
        return Err(PlanError::TimeRangeOverflow {
            start: to_command_argument(a),
            end: to_command_argument(b),
        });
    }
    Ok(difference)
}

/// Render as `HH:MM:SS[.ffffff]` for ffmpeg's `-ss`/`-to` flags
pub fn to_command_argument(time: &TimeValue) -> String {
    let total = time.whole_seconds();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    match time.subsec_micros() {
        0 => format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
        micros => format!("{:02}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros),
    }
}

/// Render as plain seconds for `trim`/`atrim` filter options
pub fn to_filter_seconds(time: &TimeValue) -> String {
    match time.subsec_micros() {
        0 => time.whole_seconds().to_string(),
        micros => {
            let rendered = format!("{}.{:06}", time.whole_seconds(), micros);
            rendered.trim_end_matches('0').to_string()
        }
    }
}

fn malformed(token: &str, reason: String) -> PlanError {
    PlanError::MalformedTime {
        token: token.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(text: &str) -> u64 {
        parse_compact_time(text).unwrap().whole_seconds()
    }

    #[test]
    fn test_parse_single_field_is_raw_seconds() {
        assert_eq!(secs("10"), 10);
        assert_eq!(secs("90"), 90);
        assert_eq!(secs("7200"), 7200);
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(secs("3:12"), 192);
        assert_eq!(secs("1:30"), 90);
        assert_eq!(secs("01:05"), 65);
    }

    #[test]
    fn test_parse_hours_minutes_seconds() {
        assert_eq!(secs("2:12:05"), 7925);
        assert_eq!(secs("0:00:00"), 0);
    }

    #[test]
    fn test_parse_fields_are_not_range_checked() {
        assert_eq!(secs("1:75"), 135);
        assert_eq!(secs("0:90:00"), 5400);
    }

    #[test]
    fn test_parse_rejects_too_many_fields() {
        let err = parse_compact_time("1:2:3:4").unwrap_err();
        assert!(matches!(err, PlanError::MalformedTime { ref token, .. } if token == "1:2:3:4"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "abc", "1:", ":30", "-5", "+5", "1.5", "1: 30", "1:3a"] {
            assert!(
                matches!(parse_compact_time(text), Err(PlanError::MalformedTime { .. })),
                "'{}' should not parse",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_compact_time("99999999999999999999").is_err());
        assert!(parse_compact_time("999999999999999999:0:0").is_err());
    }

    #[test]
    fn test_to_command_argument() {
        assert_eq!(to_command_argument(&TimeValue::from_secs(0)), "00:00:00");
        assert_eq!(to_command_argument(&TimeValue::from_secs(90)), "00:01:30");
        assert_eq!(to_command_argument(&TimeValue::from_secs(7925)), "02:12:05");
        assert_eq!(
            to_command_argument(&TimeValue::from_duration(Duration::from_millis(1500))),
            "00:00:01.500000"
        );
    }

    #[test]
    fn test_round_trip_through_command_argument() {
        for text in ["0", "59", "90", "1:30", "59:59", "1:00:00", "23:59:59", "2:12:05", "0:75"] {
            let parsed = parse_compact_time(text).unwrap();
            let rendered = to_command_argument(&parsed);
            assert_eq!(parse_compact_time(&rendered).unwrap(), parsed, "{}", text);
        }
    }

    #[test]
    fn test_time_difference_is_absolute() {
        let a = TimeValue::from_secs(10);
        let b = TimeValue::from_secs(5);
        assert_eq!(time_difference(&a, &b).unwrap(), TimeValue::from_secs(5));
        assert_eq!(time_difference(&b, &a).unwrap(), TimeValue::from_secs(5));
    }

    #[test]
    fn test_time_difference_allows_exactly_one_day() {
        let a = TimeValue::from_secs(0);
        let b = TimeValue::from_hms(24, 0, 0);
        assert_eq!(time_difference(&a, &b).unwrap(), b);
    }

    #[test]
    fn test_time_difference_rejects_more_than_one_day() {
        let a = TimeValue::from_secs(0);
        let b = TimeValue::from_hms(24, 0, 1);
        assert!(matches!(
            time_difference(&a, &b),
            Err(PlanError::TimeRangeOverflow { .. })
        ));
    }

    #[test]
    fn test_to_filter_seconds() {
        assert_eq!(to_filter_seconds(&TimeValue::from_secs(90)), "90");
        assert_eq!(
            to_filter_seconds(&TimeValue::from_duration(Duration::from_millis(1500))),
            "1.5"
        );
    }
}
