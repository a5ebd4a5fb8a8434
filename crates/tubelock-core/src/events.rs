use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::{BlockReason, BlockState};

/// Every observable state change produces an Event.
/// The CLI prints them; a GUI shell would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A block became active (or its reason changed).
    BlockStarted {
        reason: BlockReason,
        ends_at_ms: u64,
        at: DateTime<Utc>,
    },
    /// The active block ended and the overlay was removed.
    BlockEnded {
        at: DateTime<Utc>,
    },
    /// The host removed or buried the overlay; the watchdog restored it.
    OverlayReasserted {
        at: DateTime<Utc>,
    },
    /// Full state snapshot for display.
    StateSnapshot {
        state: BlockState,
        remaining_ms: u64,
        countdown: String,
        at: DateTime<Utc>,
    },
}
