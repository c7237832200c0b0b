use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// How long a phase runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseDuration {
    /// Fixed countdown, in whole seconds.
    Secs(u64),
    /// Open-ended elapsed mode. The phase never completes on its own.
    Unbounded,
}

impl PhaseDuration {
    pub fn as_secs(&self) -> Option<u64> {
        match self {
            PhaseDuration::Secs(secs) => Some(*secs),
            PhaseDuration::Unbounded => None,
        }
    }

    /// Duration in milliseconds, saturating on overflow.
    pub(crate) fn as_ms(&self) -> Option<u64> {
        self.as_secs().map(|secs| secs.saturating_mul(1000))
    }
}

/// One timed segment of a session ("inhale", "work", "Jumping Jacks", ...).
///
/// Immutable once a plan is built around it. The id is opaque to the
/// sequencer; controllers map it to user-facing labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub duration: PhaseDuration,
}

impl Phase {
    pub fn new(id: impl Into<String>, secs: u64) -> Self {
        Self {
            id: id.into(),
            duration: PhaseDuration::Secs(secs),
        }
    }

    pub fn open_ended(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration: PhaseDuration::Unbounded,
        }
    }
}

/// What happens after the last phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Runs through the phases once, then the plan is complete.
    Finite,
    /// Wraps back to the first phase indefinitely.
    Cyclic,
}

/// Ordered sequence of phases.
///
/// An empty plan is valid -- starting a sequencer on it is a silent no-op.
/// A countdown phase of zero seconds is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    phases: Vec<Phase>,
    kind: PlanKind,
}

impl Plan {
    fn validated(phases: Vec<Phase>, kind: PlanKind) -> Result<Self, PlanError> {
        for phase in &phases {
            if phase.duration == PhaseDuration::Secs(0) {
                return Err(PlanError::InvalidDuration {
                    id: phase.id.clone(),
                });
            }
        }
        Ok(Self { phases, kind })
    }

    /// A plan that runs once and terminates.
    pub fn finite(phases: Vec<Phase>) -> Result<Self, PlanError> {
        Self::validated(phases, PlanKind::Finite)
    }

    /// A plan that repeats from the top indefinitely.
    pub fn cyclic(phases: Vec<Phase>) -> Result<Self, PlanError> {
        Self::validated(phases, PlanKind::Cyclic)
    }

    /// A single unbounded phase: a free-running elapsed counter.
    pub fn open_ended(id: impl Into<String>) -> Self {
        Self {
            phases: vec![Phase::open_ended(id)],
            kind: PlanKind::Cyclic,
        }
    }

    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Sum of all phase durations; None when any phase is open-ended.
    pub fn total_secs(&self) -> Option<u64> {
        self.phases
            .iter()
            .map(|p| p.duration.as_secs())
            .try_fold(0u64, |acc, secs| secs.map(|s| acc.saturating_add(s)))
    }
}

impl Default for Plan {
    /// The empty plan. Starting a sequencer on it is a no-op.
    fn default() -> Self {
        Self {
            phases: Vec::new(),
            kind: PlanKind::Finite,
        }
    }
}
