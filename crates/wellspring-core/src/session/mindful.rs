//! Meditation / Pomodoro session controller.
//!
//! One controller instance owns one sequencer. Meditation runs the guided
//! breathing cycle (or a free-running elapsed counter when guidance is off)
//! and counts a session only when it lasted at least the configured minimum.
//! Pomodoro alternates work and break phases and counts a session per
//! completed work phase.

use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;
use crate::events::Event;
use crate::session::CounterStore;
use crate::storage::Config;
use crate::timer::{now_ms, NextAction, Phase, PhaseSequencer, Plan, RunState};

/// Counter key shared by meditation and Pomodoro, matching the single
/// "sessions completed" readout on the mindfulness page.
const SESSIONS_KEY: &str = "sessions_completed";

const CUE_PHASE_DONE: &str = "chime";

const PHASE_INHALE: &str = "inhale";
const PHASE_HOLD: &str = "hold";
const PHASE_EXHALE: &str = "exhale";
const PHASE_REST: &str = "rest";
const PHASE_WORK: &str = "work";
const PHASE_BREAK: &str = "break";
const PHASE_MEDITATION: &str = "meditation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MindfulMode {
    Meditation,
    Pomodoro,
}

impl MindfulMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "meditation" => Some(MindfulMode::Meditation),
            "pomodoro" => Some(MindfulMode::Pomodoro),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MindfulMode::Meditation => "meditation",
            MindfulMode::Pomodoro => "pomodoro",
        }
    }
}

/// Observable controller state. Both plans are cyclic, so a mindful session
/// never reaches a "completed" state -- it runs until stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MindfulState {
    Idle,
    RunningMeditation,
    RunningPomodoroWork,
    RunningPomodoroBreak,
    Paused,
}

/// Meditation / Pomodoro controller.
pub struct MindfulSession<S: CounterStore, A: AudioSink> {
    mode: MindfulMode,
    sequencer: PhaseSequencer,
    /// Minimum meditation runtime, in seconds, for the session to count.
    min_session_secs: u64,
    sound_enabled: bool,
    ambient: Option<String>,
    store: S,
    audio: A,
}

impl<S: CounterStore, A: AudioSink> MindfulSession<S, A> {
    pub fn new(mode: MindfulMode, config: &Config, store: S, audio: A) -> Self {
        let sequencer = PhaseSequencer::new(Self::plan_for(mode, config));
        Self::from_parts(mode, sequencer, config, store, audio)
    }

    /// Rebuild a controller around a sequencer restored from storage.
    pub fn from_parts(
        mode: MindfulMode,
        sequencer: PhaseSequencer,
        config: &Config,
        store: S,
        audio: A,
    ) -> Self {
        Self {
            mode,
            sequencer,
            min_session_secs: config.timer.min_session_secs,
            sound_enabled: config.sound.enabled,
            ambient: config.sound.ambient.clone(),
            store,
            audio,
        }
    }

    fn plan_for(mode: MindfulMode, config: &Config) -> Plan {
        match mode {
            MindfulMode::Meditation => {
                if config.breathing.guided {
                    let b = &config.breathing;
                    Plan::cyclic(vec![
                        Phase::new(PHASE_INHALE, b.inhale_secs),
                        Phase::new(PHASE_HOLD, b.hold_secs),
                        Phase::new(PHASE_EXHALE, b.exhale_secs),
                        Phase::new(PHASE_REST, b.rest_secs),
                    ])
                    .unwrap_or_else(|_| Plan::open_ended(PHASE_MEDITATION))
                } else {
                    Plan::open_ended(PHASE_MEDITATION)
                }
            }
            MindfulMode::Pomodoro => Plan::cyclic(vec![
                Phase::new(PHASE_WORK, config.timer.work_minutes.saturating_mul(60)),
                Phase::new(PHASE_BREAK, config.timer.break_minutes.saturating_mul(60)),
            ])
            .unwrap_or_else(|_| Plan::open_ended(PHASE_WORK)),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> MindfulMode {
        self.mode
    }

    pub fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    pub fn state(&self) -> MindfulState {
        match self.sequencer.state() {
            RunState::Idle | RunState::Completed => MindfulState::Idle,
            RunState::Paused => MindfulState::Paused,
            RunState::Running => match self.mode {
                MindfulMode::Meditation => MindfulState::RunningMeditation,
                MindfulMode::Pomodoro => {
                    let in_break = self
                        .sequencer
                        .current_phase()
                        .map(|p| p.id == PHASE_BREAK)
                        .unwrap_or(false);
                    if in_break {
                        MindfulState::RunningPomodoroBreak
                    } else {
                        MindfulState::RunningPomodoroWork
                    }
                }
            },
        }
    }

    /// Instruction text for the current phase.
    pub fn instruction(&self) -> &'static str {
        if self.state() == MindfulState::Idle {
            return "Click Start";
        }
        match self.sequencer.current_phase().map(|p| p.id.as_str()) {
            Some(PHASE_INHALE) => "Breathe In",
            Some(PHASE_HOLD) => "Hold",
            Some(PHASE_EXHALE) => "Breathe Out",
            Some(PHASE_REST) => "Rest",
            Some(PHASE_WORK) => "Focus!",
            Some(PHASE_BREAK) => "Break",
            Some(PHASE_MEDITATION) => "Meditate",
            _ => "Click Start",
        }
    }

    /// Seconds shown on the main readout: elapsed for meditation, remaining
    /// for Pomodoro.
    pub fn display_secs(&self) -> u64 {
        match self.mode {
            MindfulMode::Meditation => self.sequencer.elapsed_secs(),
            MindfulMode::Pomodoro => self.sequencer.remaining_secs().unwrap_or(0),
        }
    }

    pub fn sessions_completed(&self) -> u64 {
        self.store.counter(SESSIONS_KEY)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        let event = self.sequencer.start_at(now_epoch_ms)?;
        if self.sound_enabled {
            if let Some(track) = self.ambient.clone() {
                self.audio.play_loop(&track);
            }
        }
        Some(event)
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

    /// End the session. A meditation run increments the counter iff it
    /// lasted at least the configured minimum.
    pub fn stop_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        let event = self.sequencer.stop_at(now_epoch_ms)?;
        self.audio.stop();
        if self.mode == MindfulMode::Meditation
            && self.sequencer.elapsed_secs() >= self.min_session_secs
        {
            self.bump_counter();
        }
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.audio.stop();
        self.sequencer.reset()
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        let mode = self.mode;
        let sound_enabled = self.sound_enabled;
        let store = &mut self.store;
        let audio = &mut self.audio;
        self.sequencer.tick_at(now_epoch_ms, |phase| {
            if mode == MindfulMode::Pomodoro {
                if phase.id == PHASE_WORK {
                    let n = store.counter(SESSIONS_KEY);
                    store.set_counter(SESSIONS_KEY, n + 1);
                }
                if sound_enabled {
                    audio.play_cue(CUE_PHASE_DONE);
                }
            }
            NextAction::Advance
        })
    }

    /// Switching modes is only allowed while idle; it rebuilds the plan and
    /// fully resets the sequencer.
    pub fn switch_mode(&mut self, mode: MindfulMode, config: &Config) -> Option<Event> {
        if matches!(
            self.sequencer.state(),
            RunState::Running | RunState::Paused
        ) {
            return None;
        }
        if self.mode == mode {
            return None;
        }
        self.mode = mode;
        self.sequencer.set_plan(Self::plan_for(mode, config))
    }

    // ── Sound controls ───────────────────────────────────────────────

    /// Global ambient on/off switch.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        match (enabled, self.ambient.clone()) {
            (true, Some(track)) => self.audio.play_loop(&track),
            _ => self.audio.stop(),
        }
    }

    /// Select the ambient track; starts it immediately when sound is on.
    pub fn select_ambient(&mut self, track: Option<String>) {
        self.ambient = track;
        match (self.sound_enabled, self.ambient.clone()) {
            (true, Some(track)) => self.audio.play_loop(&track),
            _ => self.audio.stop(),
        }
    }

    fn bump_counter(&mut self) {
        let n = self.store.counter(SESSIONS_KEY);
        self.store.set_counter(SESSIONS_KEY, n + 1);
    }
}
