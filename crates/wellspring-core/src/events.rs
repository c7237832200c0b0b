use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::RunState;

/// Every state change in the sequencer produces an Event.
/// The presentation layer polls for events; controllers observe them to
/// apply counting policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Started {
        phase_id: String,
        /// None for an open-ended (elapsed mode) phase.
        duration_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    /// One display update. `remaining_secs` is None in elapsed mode, where
    /// `elapsed_secs` carries the readout value.
    Tick {
        phase_id: String,
        remaining_secs: Option<u64>,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// A countdown phase ran out and the sequencer moved on.
    PhaseCompleted {
        phase_id: String,
        phase_index: usize,
        at: DateTime<Utc>,
    },
    /// A finite plan ran out of phases, or a completion callback terminated
    /// the run.
    PlanCompleted {
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    Stopped {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
    /// Full state snapshot, used by the CLI `status` commands.
    Snapshot {
        state: RunState,
        phase_index: usize,
        phase_id: Option<String>,
        remaining_secs: Option<u64>,
        elapsed_secs: u64,
        /// 0.0 .. 1.0 progress within the current phase.
        progress: f64,
        at: DateTime<Utc>,
    },
}
