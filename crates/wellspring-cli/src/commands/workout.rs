use chrono::Utc;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use wellspring_core::error::{CoreError, StorageError};
use wellspring_core::session::{format_clock, WorkoutSession};
use wellspring_core::storage::{Config, Database};
use wellspring_core::timer::PhaseSequencer;
use wellspring_core::workout::{generate_plan, BodyPart, Equipment, Exercise};
use wellspring_core::{Event, NullAudio};

use super::{open_db, print_json};

const STATE_KEY: &str = "workout_state";

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Generate a new plan for the given body part and equipment
    Generate {
        /// full|arms|legs|core|back|chest|shoulders
        #[arg(long)]
        body_part: String,
        /// none|dumbbells|resistance|kettlebell|barbell
        #[arg(long)]
        equipment: String,
    },
    /// Start the current plan from the first exercise
    Start,
    /// Pause the running workout
    Pause,
    /// Resume a paused workout
    Resume,
    /// Stop the workout, keeping the plan
    Stop,
    /// Tick the timer and print its current state
    Status,
}

#[derive(Serialize, Deserialize)]
struct PersistedWorkout {
    label: String,
    exercises: Vec<Exercise>,
    sequencer: PhaseSequencer,
}

type Session<'a> = WorkoutSession<&'a Database, NullAudio>;

fn load_session<'a>(db: &'a Database, config: &Config) -> (Session<'a>, String) {
    if let Ok(Some(json)) = db.kv_get(STATE_KEY) {
        if let Ok(saved) = serde_json::from_str::<PersistedWorkout>(&json) {
            let session = WorkoutSession::from_parts(
                saved.sequencer,
                saved.exercises,
                config.sound.enabled,
                db,
                NullAudio,
            );
            return (session, saved.label);
        }
    }
    (
        WorkoutSession::new(config.sound.enabled, db, NullAudio),
        String::new(),
    )
}

fn save_session(db: &Database, session: &Session<'_>, label: String) -> Result<(), CoreError> {
    let state = PersistedWorkout {
        label,
        exercises: session.exercises().to_vec(),
        sequencer: session.sequencer().clone(),
    };
    let json = serde_json::to_string(&state)?;
    db.kv_set(STATE_KEY, &json).map_err(StorageError::from)?;
    Ok(())
}

pub fn run(action: WorkoutAction) -> Result<(), CoreError> {
    let config = Config::load_or_default();
    let db = open_db()?;
    let (mut session, mut label) = load_session(&db, &config);

    match action {
        WorkoutAction::Generate {
            body_part,
            equipment,
        } => {
            let part = BodyPart::from_name(&body_part).ok_or_else(|| {
                CoreError::Custom(format!(
                    "unknown body part '{body_part}' (expected full|arms|legs|core|back|chest|shoulders)"
                ))
            })?;
            let gear = Equipment::from_name(&equipment).ok_or_else(|| {
                CoreError::Custom(format!(
                    "unknown equipment '{equipment}' (expected none|dumbbells|resistance|kettlebell|barbell)"
                ))
            })?;

            let plan = generate_plan(part, gear, &config.workout, &mut rand::thread_rng());
            if plan.is_empty() {
                println!("No exercises available for {body_part} with {equipment}.");
            } else {
                for (i, exercise) in plan.exercises().iter().enumerate() {
                    println!("{}. {} - {}s", i + 1, exercise.name, exercise.secs);
                }
            }
            session.load_plan(&plan, config.workout.rest_secs);
            label = format!("{body_part}/{equipment}");
        }
        WorkoutAction::Start => match session.start() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        WorkoutAction::Pause => match session.pause() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        WorkoutAction::Resume => match session.resume() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        WorkoutAction::Stop => match session.stop() {
            Some(event) => print_json(&event)?,
            None => print_json(&session.sequencer().snapshot())?,
        },
        WorkoutAction::Status => {
            let event = session.tick();
            println!(
                "{} {}",
                session.display_name(),
                session
                    .remaining_secs()
                    .map(format_clock)
                    .unwrap_or_else(|| "--".to_string())
            );
            print_json(&session.sequencer().snapshot())?;
            if let Some(Event::PlanCompleted { .. }) = &event {
                // Session log write failures never surface to the user.
                let _ = db.record_session(
                    "workout",
                    &label,
                    session.sequencer().elapsed_secs(),
                    Utc::now(),
                );
            }
            match event {
                Some(Event::Tick { .. }) | None => {}
                Some(other) => print_json(&other)?,
            }
        }
    }

    save_session(&db, &session, label)?;
    Ok(())
}
