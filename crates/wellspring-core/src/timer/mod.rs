mod plan;
mod sequencer;

pub use plan::{Phase, PhaseDuration, Plan, PlanKind};
pub use sequencer::{NextAction, PhaseSequencer, RunState};

pub(crate) use sequencer::now_ms;
