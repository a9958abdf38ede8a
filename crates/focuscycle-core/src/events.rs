//! Session event stream.
//!
//! Every observable state change produces an [`Event`]. The controller
//! pushes them into an optional channel; hosts and tests subscribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::PhaseKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        cycle_count: u32,
        at: DateTime<Utc>,
    },
    PhaseStarted {
        cycle_index: u32,
        kind: PhaseKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    ProgressTicked {
        cycle_index: u32,
        kind: PhaseKind,
        remaining_minutes: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        cycle_index: u32,
        kind: PhaseKind,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        cycle_count: u32,
        at: DateTime<Utc>,
    },
}
