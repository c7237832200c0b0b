use chrono::Utc;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use wellspring_core::error::{CoreError, StorageError};
use wellspring_core::session::{format_clock, MindfulMode, MindfulSession};
use wellspring_core::storage::{Config, Database};
use wellspring_core::timer::PhaseSequencer;
use wellspring_core::{Event, NullAudio};

use super::{open_db, print_json};

const STATE_KEY: &str = "mindful_state";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a session, optionally switching mode first
    Start {
        /// "meditation" or "pomodoro"
        #[arg(long)]
        mode: Option<String>,
    },
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop the session (a long-enough meditation counts)
    Stop,
    /// Reset to idle state
    Reset,
    /// Switch mode while idle
    Mode {
        /// "meditation" or "pomodoro"
        mode: String,
    },
    /// Tick the timer and print its current state
    Status,
}

#[derive(Serialize, Deserialize)]
struct PersistedMindful {
    mode: MindfulMode,
    sequencer: PhaseSequencer,
}

type Session<'a> = MindfulSession<&'a Database, NullAudio>;

fn load_session<'a>(db: &'a Database, config: &Config) -> Session<'a> {
    if let Ok(Some(json)) = db.kv_get(STATE_KEY) {
        if let Ok(saved) = serde_json::from_str::<PersistedMindful>(&json) {
            return MindfulSession::from_parts(saved.mode, saved.sequencer, config, db, NullAudio);
        }
    }
    MindfulSession::new(MindfulMode::Meditation, config, db, NullAudio)
}

fn save_session(db: &Database, session: &Session<'_>) -> Result<(), CoreError> {
    let state = PersistedMindful {
        mode: session.mode(),
        sequencer: session.sequencer().clone(),
    };
    let json = serde_json::to_string(&state)?;
    db.kv_set(STATE_KEY, &json).map_err(StorageError::from)?;
    Ok(())
}

fn parse_mode(name: &str) -> Result<MindfulMode, CoreError> {
    MindfulMode::from_name(name).ok_or_else(|| {
        CoreError::Custom(format!(
            "unknown mode '{name}' (expected meditation|pomodoro)"
        ))
    })
}

pub fn run(action: TimerAction) -> Result<(), CoreError> {
    let config = Config::load_or_default();
    let db = open_db()?;
    let mut session = load_session(&db, &config);

    match action {
        TimerAction::Start { mode } => {
            if let Some(name) = mode {
                let target = parse_mode(&name)?;
                if target != session.mode() && session.switch_mode(target, &config).is_none() {
                    return Err(CoreError::Custom(
                        "stop the current session before switching modes".into(),
                    ));
                }
            }
            match session.start() {
                Some(event) => print_json(&event)?,
                None => print_json(&session.sequencer().snapshot())?,
            }
        }
        TimerAction::Pause => match session.pause() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        TimerAction::Resume => match session.resume() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        TimerAction::Stop => match session.stop() {
            Some(event) => {
                if let Event::Stopped { elapsed_secs, .. } = &event {
                    // Session log write failures never surface to the user.
                    let _ = db.record_session(
                        session.mode().name(),
                        session.mode().name(),
                        *elapsed_secs,
                        Utc::now(),
                    );
                }
                print_json(&event)?;
            }
            None => print_json(&session.sequencer().snapshot())?,
        },
        TimerAction::Reset => match session.reset() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        TimerAction::Mode { mode } => {
            let target = parse_mode(&mode)?;
            if target != session.mode() && session.switch_mode(target, &config).is_none() {
                return Err(CoreError::Custom(
                    "stop the current session before switching modes".into(),
                ));
            }
            print_json(&session.sequencer().snapshot())?;
        }
        TimerAction::Status => {
            let event = session.tick();
            println!(
                "{} {} (sessions: {})",
                session.instruction(),
                format_clock(session.display_secs()),
                session.sessions_completed()
            );
            print_json(&session.sequencer().snapshot())?;
            match event {
                Some(Event::Tick { .. }) | None => {}
                Some(other) => print_json(&other)?,
            }
        }
    }

    save_session(&db, &session)?;
    Ok(())
}
