//! Recurring daily time-of-day window.
//!
//! The window is inclusive of its start and exclusive of its end. If
//! start > end it wraps past midnight: 22:00-06:00 covers 22:00-23:59
//! and 00:00-05:59 the next day. start == end is a zero-width window
//! that never matches, on either branch.
//!
//! Malformed "HH:MM" strings fail closed: the window parses to an
//! inactive state and never blocks. Producers own validation; the
//! engine just refuses to lock anyone out over a typo.

use chrono::{NaiveTime, Timelike};

use super::Clock;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// A `[start, end)` daily window parsed from two "HH:MM" strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    bounds: Option<(NaiveTime, NaiveTime)>,
}

impl ScheduleWindow {
    /// Parse from the stored strings. Never fails; unparseable input
    /// yields an inactive window.
    pub fn parse(start: &str, end: &str) -> Self {
        let bounds = match (parse_hhmm(start), parse_hhmm(end)) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => {
                log::warn!("unparseable schedule window '{start}'..'{end}', schedule disabled");
                None
            }
        };
        Self { bounds }
    }

    /// An inactive window that never matches.
    pub fn inactive() -> Self {
        Self { bounds: None }
    }

    /// Whether the window parsed successfully.
    pub fn is_valid(&self) -> bool {
        self.bounds.is_some()
    }

    /// Whether the given time-of-day falls inside the window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let Some((start, end)) = self.bounds else {
            return false;
        };
        if start == end {
            // Zero-width window.
            return false;
        }
        if start < end {
            time >= start && time < end
        } else {
            time >= start || time < end
        }
    }

    /// If the clock is currently inside the window, the absolute epoch
    /// instant (ms) at which the window next ends: today's end, plus a
    /// day when that instant is not after now.
    pub fn current_window_end(&self, clock: &Clock) -> Option<u64> {
        if !self.contains(clock.time_of_day) {
            return None;
        }
        let (_, end) = self.bounds?;
        let now_ms_of_day = u64::from(clock.time_of_day.num_seconds_from_midnight()) * 1000;
        let end_ms_of_day = u64::from(end.num_seconds_from_midnight()) * 1000;
        let until_end = if end_ms_of_day > now_ms_of_day {
            end_ms_of_day - now_ms_of_day
        } else {
            DAY_MS - (now_ms_of_day - end_ms_of_day)
        };
        Some(clock.epoch_ms + until_end)
    }
}

fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    let (hh, mm) = text.split_once(':')?;
    let hour: u32 = hh.parse().ok()?;
    let minute: u32 = mm.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn clock(h: u32, m: u32) -> Clock {
        Clock {
            epoch_ms: 1_700_000_000_000,
            time_of_day: t(h, m),
        }
    }

    #[test]
    fn daytime_window_boundaries() {
        let w = ScheduleWindow::parse("09:00", "17:00");
        assert!(!w.contains(t(8, 59)));
        assert!(w.contains(t(9, 0)));
        assert!(w.contains(t(16, 59)));
        assert!(!w.contains(t(17, 0)));
    }

    #[test]
    fn wraparound_window_boundaries() {
        let w = ScheduleWindow::parse("22:00", "06:00");
        assert!(w.contains(t(23, 30)));
        assert!(w.contains(t(5, 59)));
        assert!(!w.contains(t(6, 0)));
        assert!(!w.contains(t(12, 0)));
        assert!(w.contains(t(22, 0)));
        assert!(!w.contains(t(21, 59)));
    }

    #[test]
    fn equal_start_and_end_never_matches() {
        let w = ScheduleWindow::parse("10:00", "10:00");
        assert!(!w.contains(t(10, 0)));
        assert!(!w.contains(t(9, 59)));
        assert!(!w.contains(t(22, 0)));
    }

    #[test]
    fn malformed_input_fails_closed() {
        for (start, end) in [
            ("9am", "17:00"),
            ("09:00", "25:00"),
            ("09:60", "17:00"),
            ("", ""),
            ("0900", "1700"),
        ] {
            let w = ScheduleWindow::parse(start, end);
            assert!(!w.is_valid(), "{start}..{end} should be inactive");
            assert!(!w.contains(t(12, 0)));
            assert!(w.current_window_end(&clock(12, 0)).is_none());
        }
    }

    #[test]
    fn window_end_is_later_today() {
        let w = ScheduleWindow::parse("09:00", "17:00");
        let c = clock(16, 0);
        // 16:00 -> 17:00 is one hour away.
        assert_eq!(w.current_window_end(&c), Some(c.epoch_ms + 3_600_000));
    }

    #[test]
    fn wraparound_window_end_crosses_midnight() {
        let w = ScheduleWindow::parse("22:00", "06:00");
        let c = clock(23, 0);
        // 23:00 -> 06:00 next day is seven hours away.
        assert_eq!(w.current_window_end(&c), Some(c.epoch_ms + 7 * 3_600_000));

        let c = clock(5, 0);
        // Already past midnight: one hour left.
        assert_eq!(w.current_window_end(&c), Some(c.epoch_ms + 3_600_000));
    }

    #[test]
    fn window_end_outside_window_is_none() {
        let w = ScheduleWindow::parse("09:00", "17:00");
        assert!(w.current_window_end(&clock(8, 0)).is_none());
    }
}
