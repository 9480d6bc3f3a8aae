//! Lenient parsing of user supplied time fields

use tracing::debug;

/// Parse a single hours/minutes/seconds text field.
///
/// Anything that is not a non-negative integer (empty text, letters,
/// negative numbers, overflow) falls back to zero.
pub fn parse_time_field(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    match trimmed.parse::<u64>() {
        Ok(value) => value,
        Err(e) => {
            debug!("Treating time field {:?} as 0: {}", raw, e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert_eq!(parse_time_field("0"), 0);
        assert_eq!(parse_time_field("42"), 42);
        assert_eq!(parse_time_field(" 7 "), 7);
        assert_eq!(parse_time_field("120"), 120);
    }

    #[test]
    fn test_malformed_input_defaults_to_zero() {
        assert_eq!(parse_time_field(""), 0);
        assert_eq!(parse_time_field("   "), 0);
        assert_eq!(parse_time_field("abc"), 0);
        assert_eq!(parse_time_field("1.5"), 0);
        assert_eq!(parse_time_field("-3"), 0);
        assert_eq!(parse_time_field("99999999999999999999999"), 0);
    }
}
