//! Countdown text for the overlay.

/// Format a remaining duration as `MM:SS`.
///
/// Minutes are not wrapped into hours (90 minutes renders as `90:00`)
/// and both fields are zero-padded. Negative input clamps to `00:00` so
/// an already-expired end time never shows a negative countdown.
pub fn format_remaining(remaining_ms: i64) -> String {
    let total_secs = remaining_ms.max(0) / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Milliseconds remaining until `ends_at_ms`, clamped to zero.
pub fn remaining_ms(ends_at_ms: u64, now_ms: u64) -> i64 {
    ends_at_ms.saturating_sub(now_ms) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(65_000), "01:05");
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59_999), "00:59");
        assert_eq!(format_remaining(60_000), "01:00");
    }

    #[test]
    fn negative_input_clamps_to_zero() {
        assert_eq!(format_remaining(-500), "00:00");
        assert_eq!(format_remaining(i64::MIN), "00:00");
    }

    #[test]
    fn minutes_exceed_fifty_nine_without_hour_wrap() {
        assert_eq!(format_remaining(90 * 60 * 1000), "90:00");
        assert_eq!(format_remaining(125 * 60 * 1000 + 7_000), "125:07");
    }

    #[test]
    fn remaining_clamps_when_expired() {
        assert_eq!(remaining_ms(1_000, 2_000), 0);
        assert_eq!(remaining_ms(2_000, 1_000), 1_000);
    }

    proptest! {
        #[test]
        fn output_always_parses_back(ms in 0i64..=(10_000 * 60_000)) {
            let text = format_remaining(ms);
            let (mm, ss) = text.split_once(':').unwrap();
            let minutes: i64 = mm.parse().unwrap();
            let seconds: i64 = ss.parse().unwrap();
            prop_assert!(seconds < 60);
            prop_assert_eq!(minutes * 60 + seconds, ms / 1000);
        }

        #[test]
        fn both_fields_at_least_two_digits(ms in i64::MIN..i64::MAX) {
            let text = format_remaining(ms);
            let (mm, ss) = text.split_once(':').unwrap();
            prop_assert!(mm.len() >= 2);
            prop_assert_eq!(ss.len(), 2);
        }
    }
}
