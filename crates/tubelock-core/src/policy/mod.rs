//! The rule evaluator.
//!
//! A pure function of a settings snapshot plus the wall clock. It is
//! re-run from scratch on every tick rather than incrementally, and it
//! never writes anything back: an expired temporary block is detected
//! by comparison alone.
//!
//! Precedence, checked in order:
//!
//! 1. Master switch off -> unblocked, regardless of everything else.
//! 2. Temporary block still in the future -> temporarily blocked.
//! 3. Schedule enabled and time-of-day inside the window -> schedule
//!    blocked.
//! 4. Otherwise unblocked.
//!
//! Comparisons use wall-clock local time. A device clock change moves
//! the schedule window with it; correcting for that is out of scope.

mod countdown;
mod window;

pub use countdown::{format_remaining, remaining_ms};
pub use window::ScheduleWindow;

use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Wall-clock snapshot for one evaluation pass.
///
/// Carrying both forms avoids re-deriving the local time-of-day from
/// the epoch on every comparison, and lets tests pin each one exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// Epoch milliseconds.
    pub epoch_ms: u64,
    /// Local time-of-day.
    pub time_of_day: NaiveTime,
}

impl Clock {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            epoch_ms: now.timestamp_millis().max(0) as u64,
            time_of_day: now.time(),
        }
    }

    /// Same instant shifted by a number of milliseconds. Test helper
    /// for "what does the evaluator say N ms later".
    pub fn plus_ms(&self, ms: u64) -> Self {
        Self {
            epoch_ms: self.epoch_ms + ms,
            ..*self
        }
    }
}

/// Read-only snapshot of the keys the evaluator consumes, with the
/// schedule window already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyInputs {
    pub extension_enabled: bool,
    pub temp_block_until_ms: u64,
    pub schedule_enabled: bool,
    pub window: ScheduleWindow,
}

impl From<&Settings> for PolicyInputs {
    fn from(settings: &Settings) -> Self {
        Self {
            extension_enabled: settings.extension_enabled,
            temp_block_until_ms: settings.temp_block_until,
            schedule_enabled: settings.schedule_block_enabled,
            window: ScheduleWindow::parse(
                &settings.schedule_block_start,
                &settings.schedule_block_end,
            ),
        }
    }
}

/// Why access is currently blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockReason {
    Temporary,
    Scheduled,
}

impl BlockReason {
    /// Overlay headline for this reason.
    pub fn title(self) -> &'static str {
        match self {
            BlockReason::Temporary => "YouTube is blocked",
            BlockReason::Scheduled => "YouTube is blocked by your schedule",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BlockReason::Temporary => "You started a focus timer. Hang in there.",
            BlockReason::Scheduled => "This is inside your daily blocked hours.",
        }
    }
}

/// Derived blocking decision. Recomputed every tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BlockState {
    Unblocked,
    TemporarilyBlocked { until_ms: u64 },
    ScheduledBlocked { window_end_ms: u64 },
}

impl BlockState {
    pub fn is_blocked(&self) -> bool {
        !matches!(self, BlockState::Unblocked)
    }

    /// The absolute instant the current block ends, if blocked.
    pub fn ends_at_ms(&self) -> Option<u64> {
        match self {
            BlockState::Unblocked => None,
            BlockState::TemporarilyBlocked { until_ms } => Some(*until_ms),
            BlockState::ScheduledBlocked { window_end_ms } => Some(*window_end_ms),
        }
    }

    pub fn reason(&self) -> Option<BlockReason> {
        match self {
            BlockState::Unblocked => None,
            BlockState::TemporarilyBlocked { .. } => Some(BlockReason::Temporary),
            BlockState::ScheduledBlocked { .. } => Some(BlockReason::Scheduled),
        }
    }
}

/// Produce exactly one [`BlockState`] for the given inputs and clock.
pub fn evaluate(inputs: &PolicyInputs, clock: &Clock) -> BlockState {
    if !inputs.extension_enabled {
        return BlockState::Unblocked;
    }

    if inputs.temp_block_until_ms > 0 && clock.epoch_ms < inputs.temp_block_until_ms {
        return BlockState::TemporarilyBlocked {
            until_ms: inputs.temp_block_until_ms,
        };
    }

    if inputs.schedule_enabled {
        if let Some(window_end_ms) = inputs.window.current_window_end(clock) {
            return BlockState::ScheduledBlocked { window_end_ms };
        }
    }

    BlockState::Unblocked
}
