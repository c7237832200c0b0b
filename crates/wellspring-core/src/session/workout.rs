//! Workout runner controller.
//!
//! Drives a finite plan of exercises with rests generated between them:
//! `Running(0) -> Resting(0) -> Running(1) -> ... -> Complete`. `Complete`
//! is terminal until a new plan is loaded. Stopping preserves the
//! sequencer's position for inspection, but restarting always begins from
//! the first exercise.

use crate::audio::AudioSink;
use crate::events::Event;
use crate::session::CounterStore;
use crate::timer::{now_ms, NextAction, PhaseSequencer, Plan, RunState};
use crate::workout::{Exercise, WorkoutPlan, REST_PHASE_ID};

const WORKOUTS_KEY: &str = "workouts_completed";

const CUE_BEEP: &str = "beep";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutState {
    Idle,
    Running { exercise: usize },
    Resting { after: usize },
    Paused,
    Complete,
}

/// Workout runner.
pub struct WorkoutSession<S: CounterStore, A: AudioSink> {
    sequencer: PhaseSequencer,
    /// The generated exercises, without the interleaved rests, kept for
    /// display.
    exercises: Vec<Exercise>,
    sound_enabled: bool,
    store: S,
    audio: A,
}

impl<S: CounterStore, A: AudioSink> WorkoutSession<S, A> {
    /// A session with no plan yet; `start` is a no-op until one is loaded.
    pub fn new(sound_enabled: bool, store: S, audio: A) -> Self {
        Self::from_parts(PhaseSequencer::new(Plan::default()), Vec::new(), sound_enabled, store, audio)
    }

    /// Rebuild a controller around state restored from storage.
    pub fn from_parts(
        sequencer: PhaseSequencer,
        exercises: Vec<Exercise>,
        sound_enabled: bool,
        store: S,
        audio: A,
    ) -> Self {
        Self {
            sequencer,
            exercises,
            sound_enabled,
            store,
            audio,
        }
    }

    /// Install a freshly generated plan, clearing any previous run.
    pub fn load_plan(&mut self, plan: &WorkoutPlan, rest_secs: u64) {
        self.exercises = plan.exercises().to_vec();
        self.sequencer.set_plan(plan.to_plan(rest_secs));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn remaining_secs(&self) -> Option<u64> {
        self.sequencer.remaining_secs()
    }

    pub fn workouts_completed(&self) -> u64 {
        self.store.counter(WORKOUTS_KEY)
    }

    pub fn state(&self) -> WorkoutState {
        match self.sequencer.state() {
            RunState::Idle => WorkoutState::Idle,
            RunState::Paused => WorkoutState::Paused,
            RunState::Completed => WorkoutState::Complete,
            RunState::Running => {
                let (exercise, resting) = self.exercise_cursor();
                if resting {
                    WorkoutState::Resting { after: exercise }
                } else {
                    WorkoutState::Running { exercise }
                }
            }
        }
    }

    /// Name shown above the countdown; a neutral placeholder outside a run.
    pub fn display_name(&self) -> String {
        match self.sequencer.state() {
            RunState::Running | RunState::Paused => {
                let (exercise, resting) = self.exercise_cursor();
                if resting {
                    "Rest".to_string()
                } else {
                    self.exercises
                        .get(exercise)
                        .map(|e| e.name.clone())
                        .unwrap_or_default()
                }
            }
            RunState::Completed => "Workout Complete!".to_string(),
            RunState::Idle => {
                if self.exercises.is_empty() {
                    "--".to_string()
                } else if self.sequencer.elapsed_secs() > 0 {
                    "Stopped".to_string()
                } else {
                    "Ready to start!".to_string()
                }
            }
        }
    }

    /// Exercise position for the current phase: (index, in-rest). For a
    /// rest phase the index is the exercise the rest follows.
    fn exercise_cursor(&self) -> (usize, bool) {
        let index = self.sequencer.phase_index();
        let phases = self.sequencer.plan().phases();
        let resting = phases
            .get(index)
            .map(|p| p.id == REST_PHASE_ID)
            .unwrap_or(false);
        let before = phases[..index.min(phases.len())]
            .iter()
            .filter(|p| p.id != REST_PHASE_ID)
            .count();
        if resting {
            (before.saturating_sub(1), true)
        } else {
            (before, false)
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Begin from the first exercise. No-op with no plan loaded, and after
    /// completion -- a finished workout stays finished until a new plan is
    /// generated.
    pub fn start_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.sequencer.state() == RunState::Completed {
            return None;
        }
        self.sequencer.start_at(now_epoch_ms)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.sequencer.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        self.sequencer.pause_at(now_epoch_ms)
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.sequencer.resume_at(now_ms())
    }

    pub fn resume_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        self.sequencer.resume_at(now_epoch_ms)
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.stop_at(now_ms())
    }

    pub fn stop_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        self.sequencer.stop_at(now_epoch_ms)
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        let sound_enabled = self.sound_enabled;
        let audio = &mut self.audio;
        let event = self.sequencer.tick_at(now_epoch_ms, |_phase| {
            if sound_enabled {
                audio.play_cue(CUE_BEEP);
            }
            NextAction::Advance
        })?;
        if matches!(event, Event::PlanCompleted { .. }) {
            let n = self.store.counter(WORKOUTS_KEY);
            self.store.set_counter(WORKOUTS_KEY, n + 1);
        }
        Some(event)
    }
}
