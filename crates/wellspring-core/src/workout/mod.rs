//! Workout plan generation.
//!
//! A plan is a uniform random sample (without replacement) from the static
//! exercise library, scaled by the configured time multiplier with a floor
//! on each duration. Rests are generated between exercises when the plan is
//! turned into sequencer phases; they are never stored in the plan itself.

mod library;

pub use library::{exercises_for, ExerciseDef};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::storage::WorkoutConfig;
use crate::timer::{Phase, Plan};

/// Phase id of the generated rests between exercises.
pub const REST_PHASE_ID: &str = "rest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Full,
    Arms,
    Legs,
    Core,
    Back,
    Chest,
    Shoulders,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Full,
        BodyPart::Arms,
        BodyPart::Legs,
        BodyPart::Core,
        BodyPart::Back,
        BodyPart::Chest,
        BodyPart::Shoulders,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Full => "full",
            BodyPart::Arms => "arms",
            BodyPart::Legs => "legs",
            BodyPart::Core => "core",
            BodyPart::Back => "back",
            BodyPart::Chest => "chest",
            BodyPart::Shoulders => "shoulders",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    /// Bodyweight only; serialized as "none" to match the library keys.
    #[serde(rename = "none")]
    Bodyweight,
    Dumbbells,
    Resistance,
    Kettlebell,
    Barbell,
}

impl Equipment {
    pub const ALL: [Equipment; 5] = [
        Equipment::Bodyweight,
        Equipment::Dumbbells,
        Equipment::Resistance,
        Equipment::Kettlebell,
        Equipment::Barbell,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Equipment::Bodyweight => "none",
            Equipment::Dumbbells => "dumbbells",
            Equipment::Resistance => "resistance",
            Equipment::Kettlebell => "kettlebell",
            Equipment::Barbell => "barbell",
        }
    }
}

/// One generated exercise with its scaled duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub secs: u64,
}

/// An ordered list of exercises for one workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPlan {
    exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Finite sequencer plan with a rest inserted between consecutive
    /// exercises.
    pub fn to_plan(&self, rest_secs: u64) -> Plan {
        let mut phases = Vec::with_capacity(self.exercises.len() * 2);
        for (i, exercise) in self.exercises.iter().enumerate() {
            if i > 0 && rest_secs > 0 {
                phases.push(Phase::new(REST_PHASE_ID, rest_secs));
            }
            phases.push(Phase::new(exercise.name.clone(), exercise.secs));
        }
        Plan::finite(phases).unwrap_or_default()
    }
}

/// Scale a base duration by the configured multiplier, flooring at the
/// configured minimum.
fn scaled_secs(base_secs: u64, config: &WorkoutConfig) -> u64 {
    let scaled = (base_secs as f64 * config.time_multiplier).round() as u64;
    scaled.max(config.min_exercise_secs)
}

/// Pick `min(exercises_per_plan, available)` unique exercises for the given
/// body part and equipment. An unknown combination yields an empty plan.
pub fn generate_plan<R: Rng + ?Sized>(
    body_part: BodyPart,
    equipment: Equipment,
    config: &WorkoutConfig,
    rng: &mut R,
) -> WorkoutPlan {
    let candidates = exercises_for(body_part, equipment);
    let count = config.exercises_per_plan.min(candidates.len());
    let exercises = candidates
        .choose_multiple(rng, count)
        .map(|def| Exercise {
            name: def.name.to_string(),
            secs: scaled_secs(def.secs, config),
        })
        .collect();
    WorkoutPlan { exercises }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::collections::HashSet;

    fn config() -> WorkoutConfig {
        WorkoutConfig::default()
    }

    #[test]
    fn name_round_trips() {
        for part in BodyPart::ALL {
            assert_eq!(BodyPart::from_name(part.name()), Some(part));
        }
        for equipment in Equipment::ALL {
            assert_eq!(Equipment::from_name(equipment.name()), Some(equipment));
        }
        assert_eq!(BodyPart::from_name("cardio"), None);
    }

    #[test]
    fn sample_is_capped_by_available_exercises() {
        // Only three kettlebell moves exist for the full-body group.
        let mut rng = Pcg64::seed_from_u64(7);
        let plan = generate_plan(BodyPart::Full, Equipment::Kettlebell, &config(), &mut rng);
        assert_eq!(plan.len(), 3);

        let names: HashSet<_> = plan.exercises().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), 3, "duplicates in generated plan");
    }

    #[test]
    fn durations_are_scaled_with_a_floor() {
        let mut rng = Pcg64::seed_from_u64(42);
        let plan = generate_plan(BodyPart::Shoulders, Equipment::Bodyweight, &config(), &mut rng);
        for exercise in plan.exercises() {
            let base = exercises_for(BodyPart::Shoulders, Equipment::Bodyweight)
                .iter()
                .find(|d| d.name == exercise.name)
                .unwrap()
                .secs;
            assert_eq!(exercise.secs, ((base as f64 * 2.0).round() as u64).max(45));
        }
        // Arm Circles: 20s base doubles to 40, floored to 45.
        if let Some(circles) = plan.exercises().iter().find(|e| e.name == "Arm Circles") {
            assert_eq!(circles.secs, 45);
        }
    }

    #[test]
    fn missing_combination_yields_empty_plan() {
        let mut rng = Pcg64::seed_from_u64(1);
        let plan = generate_plan(BodyPart::Back, Equipment::Kettlebell, &config(), &mut rng);
        assert!(plan.is_empty());
        assert!(plan.to_plan(20).is_empty());
    }

    #[test]
    fn to_plan_interleaves_rests() {
        let plan = WorkoutPlan::from_exercises(vec![
            Exercise {
                name: "Squats".into(),
                secs: 80,
            },
            Exercise {
                name: "Lunges".into(),
                secs: 80,
            },
            Exercise {
                name: "Glute Bridges".into(),
                secs: 70,
            },
        ]);
        let phases = plan.to_plan(20);
        let ids: Vec<_> = phases.phases().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["Squats", "rest", "Lunges", "rest", "Glute Bridges"]
        );
        assert_eq!(phases.total_secs(), Some(80 + 20 + 80 + 20 + 70));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_plan(
            BodyPart::Legs,
            Equipment::Dumbbells,
            &config(),
            &mut Pcg64::seed_from_u64(99),
        );
        let b = generate_plan(
            BodyPart::Legs,
            Equipment::Dumbbells,
            &config(),
            &mut Pcg64::seed_from_u64(99),
        );
        assert_eq!(a.exercises(), b.exercises());
    }
}
