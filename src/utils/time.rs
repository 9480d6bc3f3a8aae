//! Conversions between whole durations and hours/minutes/seconds triples

use crate::state::TimeModel;

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
const SECONDS_PER_HOUR: u64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;
pub const MILLIS_PER_SECOND: u64 = 1000;

/// Convert an hours/minutes/seconds triple to milliseconds.
///
/// Minutes and seconds are not required to be below 60, they simply carry
/// into the next unit. Saturates at `u64::MAX` for absurdly large input.
pub fn time_to_millis(hours: u64, minutes: u64, seconds: u64) -> u64 {
    hours
        .saturating_mul(MINUTES_PER_HOUR)
        .saturating_add(minutes)
        .saturating_mul(SECONDS_PER_MINUTE)
        .saturating_add(seconds)
        .saturating_mul(MILLIS_PER_SECOND)
}

/// Split a whole number of seconds into hours, minutes and seconds
pub fn seconds_to_time(total_seconds: u64) -> TimeModel {
    TimeModel {
        hours: total_seconds / SECONDS_PER_HOUR,
        minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        seconds: total_seconds % SECONDS_PER_MINUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_millis_known_values() {
        assert_eq!(time_to_millis(0, 0, 0), 0);
        assert_eq!(time_to_millis(1, 0, 0), 3_600_000);
        assert_eq!(time_to_millis(0, 1, 30), 90_000);
        assert_eq!(time_to_millis(0, 0, 1), 1_000);
    }

    #[test]
    fn test_time_to_millis_carries_out_of_range_fields() {
        assert_eq!(time_to_millis(0, 90, 0), time_to_millis(1, 30, 0));
        assert_eq!(time_to_millis(0, 0, 75), time_to_millis(0, 1, 15));
    }

    #[test]
    fn test_time_to_millis_saturates() {
        assert_eq!(time_to_millis(u64::MAX, 0, 0), u64::MAX);
        assert_eq!(time_to_millis(0, 0, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_seconds_to_time() {
        assert_eq!(seconds_to_time(3661), TimeModel::new(1, 1, 1));
        assert_eq!(seconds_to_time(0), TimeModel::zero());
        assert_eq!(seconds_to_time(59), TimeModel::new(0, 0, 59));
        assert_eq!(seconds_to_time(60), TimeModel::new(0, 1, 0));
        assert_eq!(seconds_to_time(3599), TimeModel::new(0, 59, 59));
        assert_eq!(seconds_to_time(3600), TimeModel::new(1, 0, 0));
        assert_eq!(seconds_to_time(359_999), TimeModel::new(99, 59, 59));
    }

    #[test]
    fn test_hours_are_unbounded() {
        assert_eq!(seconds_to_time(100 * 3600 + 5), TimeModel::new(100, 0, 5));
    }

    #[test]
    fn test_round_trip_through_triple() {
        for total in 0..=359_999u64 {
            let time = seconds_to_time(total);
            assert!(time.minutes < 60 && time.seconds < 60);
            assert_eq!(
                time_to_millis(time.hours, time.minutes, time.seconds) / MILLIS_PER_SECOND,
                total
            );
        }
    }
}
