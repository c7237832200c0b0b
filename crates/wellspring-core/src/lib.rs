//! # Wellspring Core Library
//!
//! This library provides the core business logic for Wellspring, a small
//! wellness companion: a meditation/Pomodoro timer and a workout-plan
//! runner. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI is a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Phase Sequencer**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for progress updates. It knows
//!   nothing about rendering, storage, or audio.
//! - **Session Controllers**: Map phases to user-facing instructions and
//!   apply counting policy at completion boundaries.
//! - **Storage**: SQLite-based session storage and TOML-based configuration.
//!
//! ## Key Components
//!
//! - [`PhaseSequencer`]: Core timer state machine
//! - [`MindfulSession`] / [`WorkoutSession`]: Feature controllers
//! - [`Database`]: Session and counter persistence
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;
pub mod workout;

pub use audio::{AudioSink, NullAudio};
pub use error::{ConfigError, CoreError, PlanError, StorageError};
pub use events::Event;
pub use session::{
    format_clock, CounterStore, MemoryCounters, MindfulMode, MindfulSession, MindfulState,
    WorkoutSession, WorkoutState,
};
pub use storage::{Config, Database};
pub use timer::{NextAction, Phase, PhaseDuration, PhaseSequencer, Plan, PlanKind, RunState};
pub use workout::{generate_plan, BodyPart, Equipment, Exercise, WorkoutPlan};
