//! Phase sequencer implementation.
//!
//! The sequencer is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` about
//! once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut seq = PhaseSequencer::new(plan);
//! seq.start();
//! // In a loop:
//! seq.tick(|phase| NextAction::Advance); // Returns Some(Event) on change
//! ```
//!
//! Every time-sensitive operation also exists in an `_at(now_ms)` form that
//! takes the current epoch milliseconds explicitly; tests drive those
//! deterministically.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::plan::{Phase, Plan, PlanKind};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
    /// A finite plan ran out of phases, or a callback terminated the run.
    Completed,
}

/// Decision returned by the completion callback when a countdown phase
/// reaches zero. The sequencer applies the transition; the caller supplies
/// the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Move to the next phase: wrapping for cyclic plans, completing the
    /// plan when a finite plan runs past its last phase.
    Advance,
    /// Restart the current phase from its full duration.
    Repeat,
    /// Stop ticking and mark the plan complete.
    Terminate,
}

/// Core phase sequencer.
///
/// Operates on wall-clock deltas -- no internal thread. Pausing drops the
/// tick anchor and resuming re-establishes it, so paused intervals are
/// excluded from both the countdown and the elapsed counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSequencer {
    plan: Plan,
    state: RunState,
    phase_index: usize,
    /// Remaining time in milliseconds for the current phase.
    /// None for an open-ended phase (elapsed mode).
    remaining_ms: Option<u64>,
    /// Non-paused milliseconds accumulated since start, across phases.
    elapsed_ms: u64,
    /// Timestamp (ms since epoch) of the last flush while running.
    /// None whenever the sequencer is not running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl PhaseSequencer {
    /// Create a new sequencer over the given plan.
    ///
    /// Starts in the `Idle` state with the first phase ready.
    pub fn new(plan: Plan) -> Self {
        let remaining_ms = plan.phase(0).and_then(|p| p.duration.as_ms());
        Self {
            plan,
            state: RunState::Idle,
            phase_index: 0,
            remaining_ms,
            elapsed_ms: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.plan.phase(self.phase_index)
    }

    /// Seconds left in the current phase, rounded up so the display never
    /// shows 0 while time remains. None in elapsed mode.
    pub fn remaining_secs(&self) -> Option<u64> {
        self.remaining_ms.map(|ms| (ms + 999) / 1000)
    }

    /// Whole non-paused seconds since the run started.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// 0.0 .. 1.0 progress within the current phase; 0.0 in elapsed mode.
    /// The presentation layer turns this into an arc length.
    pub fn phase_progress(&self) -> f64 {
        let total = self.current_phase().and_then(|p| p.duration.as_ms());
        match (self.remaining_ms, total) {
            (Some(remaining), Some(total)) if total > 0 => {
                1.0 - (remaining as f64 / total as f64)
            }
            _ => 0.0,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::Snapshot {
            state: self.state,
            phase_index: self.phase_index,
            phase_id: self.current_phase().map(|p| p.id.clone()),
            remaining_secs: self.remaining_secs(),
            elapsed_secs: self.elapsed_secs(),
            progress: self.phase_progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Begin a fresh run from the first phase. No-op on an empty plan and
    /// while already running or paused (use `resume` for the latter).
    pub fn start_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.plan.is_empty() {
            return None;
        }
        match self.state {
            RunState::Idle | RunState::Completed => {
                self.phase_index = 0;
                self.remaining_ms = self.plan.phase(0).and_then(|p| p.duration.as_ms());
                self.elapsed_ms = 0;
                self.state = RunState::Running;
                self.last_tick_epoch_ms = Some(now_epoch_ms);
                let phase = self.current_phase()?;
                Some(Event::Started {
                    phase_id: phase.id.clone(),
                    duration_secs: phase.duration.as_secs(),
                    at: Utc::now(),
                })
            }
            RunState::Running | RunState::Paused => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// Freeze the countdown. Flushes the wall-clock delta first, then drops
    /// the tick anchor so paused time is never counted.
    pub fn pause_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.state != RunState::Running {
            return None;
        }
        self.flush_elapsed(now_epoch_ms);
        self.state = RunState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::Paused {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    /// Continue a paused run. Re-anchors the clock at `now`, which rebases
    /// the start reference by the paused interval.
    pub fn resume_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.state != RunState::Paused {
            return None;
        }
        self.state = RunState::Running;
        self.last_tick_epoch_ms = Some(now_epoch_ms);
        Some(Event::Resumed {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.stop_at(now_ms())
    }

    /// End the run without resetting. `phase_index`, `remaining_secs` and
    /// `elapsed_secs` stay inspectable -- the meditation threshold check
    /// reads elapsed time after stopping.
    pub fn stop_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        match self.state {
            RunState::Running => self.flush_elapsed(now_epoch_ms),
            RunState::Paused => {}
            RunState::Idle | RunState::Completed => return None,
        }
        self.state = RunState::Idle;
        self.last_tick_epoch_ms = None;
        Some(Event::Stopped {
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        })
    }

    /// Back to the state immediately after construction.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = RunState::Idle;
        self.phase_index = 0;
        self.remaining_ms = self.plan.phase(0).and_then(|p| p.duration.as_ms());
        self.elapsed_ms = 0;
        self.last_tick_epoch_ms = None;
        Some(Event::Reset { at: Utc::now() })
    }

    /// Swap the plan and reset.
    pub fn set_plan(&mut self, plan: Plan) -> Option<Event> {
        self.plan = plan;
        self.reset()
    }

    pub fn tick<F>(&mut self, on_complete: F) -> Option<Event>
    where
        F: FnOnce(&Phase) -> NextAction,
    {
        self.tick_at(now_ms(), on_complete)
    }

    /// Call periodically (about once per second). Flushes wall-clock time;
    /// when the current countdown reaches zero, `on_complete` decides the
    /// transition. At most one phase completion is applied per tick.
    ///
    /// Ticking while idle, paused or completed observes the clock but
    /// changes nothing -- the display freezes.
    pub fn tick_at<F>(&mut self, now_epoch_ms: u64, on_complete: F) -> Option<Event>
    where
        F: FnOnce(&Phase) -> NextAction,
    {
        if self.state != RunState::Running {
            return None;
        }
        self.flush_elapsed(now_epoch_ms);
        if self.remaining_ms == Some(0) {
            let completed = self.current_phase()?.clone();
            let completed_index = self.phase_index;
            return match on_complete(&completed) {
                NextAction::Advance => {
                    match self.plan.kind() {
                        PlanKind::Cyclic => {
                            self.enter_phase((self.phase_index + 1) % self.plan.len());
                        }
                        PlanKind::Finite => {
                            if self.phase_index + 1 < self.plan.len() {
                                self.enter_phase(self.phase_index + 1);
                            } else {
                                self.complete();
                                return Some(Event::PlanCompleted { at: Utc::now() });
                            }
                        }
                    }
                    Some(Event::PhaseCompleted {
                        phase_id: completed.id,
                        phase_index: completed_index,
                        at: Utc::now(),
                    })
                }
                NextAction::Repeat => {
                    self.remaining_ms = completed.duration.as_ms();
                    Some(Event::PhaseCompleted {
                        phase_id: completed.id,
                        phase_index: completed_index,
                        at: Utc::now(),
                    })
                }
                NextAction::Terminate => {
                    self.complete();
                    Some(Event::PlanCompleted { at: Utc::now() })
                }
            };
        }
        let phase = self.current_phase()?;
        Some(Event::Tick {
            phase_id: phase.id.clone(),
            remaining_secs: self.remaining_secs(),
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now_epoch_ms: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let delta = now_epoch_ms.saturating_sub(last);
            if let Some(remaining) = self.remaining_ms {
                self.remaining_ms = Some(remaining.saturating_sub(delta));
            }
            self.elapsed_ms = self.elapsed_ms.saturating_add(delta);
            self.last_tick_epoch_ms = Some(now_epoch_ms);
        }
    }

    fn enter_phase(&mut self, index: usize) {
        self.phase_index = index;
        self.remaining_ms = self.plan.phase(index).and_then(|p| p.duration.as_ms());
    }

    fn complete(&mut self) {
        self.state = RunState::Completed;
        self.last_tick_epoch_ms = None;
    }
}

/// Current wall-clock time as epoch milliseconds, shared by the convenience
/// wrappers here and in the session controllers.
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::plan::Phase;

    fn countdown(durations: &[(&str, u64)], kind: PlanKind) -> Plan {
        let phases = durations
            .iter()
            .map(|(id, secs)| Phase::new(*id, *secs))
            .collect();
        match kind {
            PlanKind::Finite => Plan::finite(phases).unwrap(),
            PlanKind::Cyclic => Plan::cyclic(phases).unwrap(),
        }
    }

    /// Drive one-second ticks from `from` to `to` (exclusive start,
    /// inclusive end), collecting completion counts.
    fn run_ticks(seq: &mut PhaseSequencer, from_sec: u64, to_sec: u64) -> (usize, usize) {
        let mut phase_completions = 0;
        let mut plan_completions = 0;
        for t in (from_sec + 1)..=to_sec {
            match seq.tick_at(t * 1000, |_| NextAction::Advance) {
                Some(Event::PhaseCompleted { .. }) => phase_completions += 1,
                Some(Event::PlanCompleted { .. }) => plan_completions += 1,
                _ => {}
            }
        }
        (phase_completions, plan_completions)
    }

    #[test]
    fn start_pause_resume() {
        let mut seq = PhaseSequencer::new(countdown(&[("work", 25)], PlanKind::Finite));
        assert_eq!(seq.state(), RunState::Idle);

        assert!(seq.start_at(0).is_some());
        assert_eq!(seq.state(), RunState::Running);

        assert!(seq.pause_at(1_000).is_some());
        assert_eq!(seq.state(), RunState::Paused);

        assert!(seq.resume_at(2_000).is_some());
        assert_eq!(seq.state(), RunState::Running);
    }

    #[test]
    fn empty_plan_start_is_a_noop() {
        let mut seq = PhaseSequencer::new(Plan::default());
        assert!(seq.start_at(0).is_none());
        assert_eq!(seq.state(), RunState::Idle);
    }

    #[test]
    fn finite_plan_completes_after_total_duration() {
        let mut seq = PhaseSequencer::new(countdown(&[("a", 3), ("b", 2)], PlanKind::Finite));
        seq.start_at(0);
        let (phases, plans) = run_ticks(&mut seq, 0, 5);
        assert_eq!(phases, 1);
        assert_eq!(plans, 1);
        assert_eq!(seq.state(), RunState::Completed);
    }

    #[test]
    fn cyclic_plan_wraps_around() {
        let mut seq = PhaseSequencer::new(countdown(&[("in", 2), ("out", 2)], PlanKind::Cyclic));
        seq.start_at(0);
        let (phases, plans) = run_ticks(&mut seq, 0, 9);
        assert_eq!(phases, 4);
        assert_eq!(plans, 0);
        assert_eq!(seq.state(), RunState::Running);
        assert_eq!(seq.current_phase().unwrap().id, "in");
    }

    #[test]
    fn pause_is_time_neutral() {
        let mut seq = PhaseSequencer::new(countdown(&[("work", 10)], PlanKind::Finite));
        seq.start_at(0);
        seq.tick_at(4_000, |_| NextAction::Advance);
        assert_eq!(seq.remaining_secs(), Some(6));

        seq.pause_at(4_000);
        // Ticks while paused change nothing.
        assert!(seq.tick_at(60_000, |_| NextAction::Advance).is_none());
        assert_eq!(seq.remaining_secs(), Some(6));

        seq.resume_at(100_000);
        seq.tick_at(101_000, |_| NextAction::Advance);
        assert_eq!(seq.remaining_secs(), Some(5));
        assert_eq!(seq.elapsed_secs(), 5);
    }

    #[test]
    fn stop_leaves_state_inspectable() {
        let mut seq = PhaseSequencer::new(countdown(&[("a", 5), ("b", 5)], PlanKind::Finite));
        seq.start_at(0);
        let (_, _) = run_ticks(&mut seq, 0, 6);
        assert_eq!(seq.phase_index(), 1);

        let stopped = seq.stop_at(7_000);
        assert!(matches!(stopped, Some(Event::Stopped { elapsed_secs: 7, .. })));
        assert_eq!(seq.state(), RunState::Idle);
        assert_eq!(seq.phase_index(), 1);
        assert_eq!(seq.elapsed_secs(), 7);
    }

    #[test]
    fn restart_after_stop_begins_from_phase_zero() {
        let mut seq = PhaseSequencer::new(countdown(&[("a", 5), ("b", 5)], PlanKind::Finite));
        seq.start_at(0);
        run_ticks(&mut seq, 0, 6);
        seq.stop_at(7_000);

        seq.start_at(10_000);
        assert_eq!(seq.phase_index(), 0);
        assert_eq!(seq.remaining_secs(), Some(5));
        assert_eq!(seq.elapsed_secs(), 0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut seq = PhaseSequencer::new(countdown(&[("a", 5), ("b", 5)], PlanKind::Finite));
        seq.start_at(0);
        run_ticks(&mut seq, 0, 7);
        seq.reset();

        assert_eq!(seq.state(), RunState::Idle);
        assert_eq!(seq.phase_index(), 0);
        assert_eq!(seq.remaining_secs(), Some(5));
        assert_eq!(seq.elapsed_secs(), 0);
    }

    #[test]
    fn repeat_restarts_the_current_phase() {
        let mut seq = PhaseSequencer::new(countdown(&[("work", 3)], PlanKind::Finite));
        seq.start_at(0);
        for t in 1..=3 {
            seq.tick_at(t * 1000, |_| NextAction::Repeat);
        }
        assert_eq!(seq.state(), RunState::Running);
        assert_eq!(seq.phase_index(), 0);
        assert_eq!(seq.remaining_secs(), Some(3));
    }

    #[test]
    fn terminate_completes_the_plan() {
        let mut seq = PhaseSequencer::new(countdown(&[("in", 2), ("out", 2)], PlanKind::Cyclic));
        seq.start_at(0);
        seq.tick_at(1_000, |_| NextAction::Terminate);
        assert_eq!(seq.state(), RunState::Running);

        let ev = seq.tick_at(2_000, |_| NextAction::Terminate);
        assert!(matches!(ev, Some(Event::PlanCompleted { .. })));
        assert_eq!(seq.state(), RunState::Completed);
    }

    #[test]
    fn open_ended_phase_reports_elapsed_and_never_completes() {
        let mut seq = PhaseSequencer::new(Plan::open_ended("meditation"));
        seq.start_at(0);
        for t in 1..=120 {
            let ev = seq.tick_at(t * 1000, |_| NextAction::Terminate);
            match ev {
                Some(Event::Tick {
                    remaining_secs,
                    elapsed_secs,
                    ..
                }) => {
                    assert_eq!(remaining_secs, None);
                    assert_eq!(elapsed_secs, t);
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert_eq!(seq.state(), RunState::Running);
    }

    #[test]
    fn wall_clock_jump_is_absorbed_in_one_tick() {
        let mut seq = PhaseSequencer::new(countdown(&[("work", 10)], PlanKind::Finite));
        seq.start_at(0);
        // A 7-second scheduler stall shows up as a single large delta.
        seq.tick_at(7_000, |_| NextAction::Advance);
        assert_eq!(seq.remaining_secs(), Some(3));
        assert_eq!(seq.elapsed_secs(), 7);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut seq = PhaseSequencer::new(countdown(&[("work", 10)], PlanKind::Finite));
        seq.start_at(0);
        assert_eq!(seq.phase_progress(), 0.0);
        seq.tick_at(5_000, |_| NextAction::Advance);
        assert!((seq.phase_progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_reflects_initial_state() {
        let seq = PhaseSequencer::new(countdown(&[("work", 25)], PlanKind::Finite));
        match seq.snapshot() {
            Event::Snapshot {
                state,
                phase_index,
                remaining_secs,
                ..
            } => {
                assert_eq!(state, RunState::Idle);
                assert_eq!(phase_index, 0);
                assert_eq!(remaining_secs, Some(25));
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }
}
