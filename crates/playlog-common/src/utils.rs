//! Shared utility functions: unit conversion and chart labels.

const MS_PER_MINUTE: f64 = 1000.0 * 60.0;
const MS_PER_HOUR: f64 = MS_PER_MINUTE * 60.0;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Converts milliseconds to minutes.
#[allow(clippy::cast_precision_loss)]
pub fn ms_to_minutes(ms: u64) -> f64 {
    ms as f64 / MS_PER_MINUTE
}

/// Converts milliseconds to hours.
#[allow(clippy::cast_precision_loss)]
pub fn ms_to_hours(ms: u64) -> f64 {
    ms as f64 / MS_PER_HOUR
}

/// Converts a fractional millisecond amount (such as a mean) to hours.
pub fn ms_f64_to_hours(ms: f64) -> f64 {
    ms / MS_PER_HOUR
}

/// Full English month name for a 1-based month number.
///
/// Out-of-range input yields an empty string.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Three-letter month abbreviation (`Jan`, `Feb`, ...).
pub fn month_abbreviation(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

/// Three-letter weekday abbreviation for a Monday-based index (0 = `Mon`).
///
/// Out-of-range input yields an empty string.
pub fn weekday_abbreviation(index: u8) -> &'static str {
    WEEKDAY_ABBREVIATIONS
        .get(usize::from(index))
        .copied()
        .unwrap_or("")
}

/// Truncates a label to at most `max_chars` characters.
///
/// Counts characters rather than bytes so multi-byte artist names are never
/// split mid-character.
pub fn truncate_label(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => input[..byte_index].to_string(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((ms_to_minutes(90_000) - 1.5).abs() < f64::EPSILON);
        assert!((ms_to_hours(5_400_000) - 1.5).abs() < f64::EPSILON);
        assert!((ms_f64_to_hours(1_800_000.0) - 0.5).abs() < f64::EPSILON);
        assert!(ms_to_minutes(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
        assert_eq!(month_abbreviation(9), "Sep");
        assert_eq!(month_abbreviation(0), "");
    }

    #[test]
    fn test_weekday_abbreviation() {
        assert_eq!(weekday_abbreviation(0), "Mon");
        assert_eq!(weekday_abbreviation(6), "Sun");
        assert_eq!(weekday_abbreviation(7), "");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 20), "Short");
        assert_eq!(
            truncate_label("A very long track title indeed", 20),
            "A very long track ti"
        );
        assert_eq!(truncate_label("Sigur Rós – Hoppípolla", 11), "Sigur Rós –");
        assert_eq!(truncate_label("", 5), "");
    }
}
