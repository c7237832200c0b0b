//! Static exercise library, keyed by body part and equipment.
//!
//! Base durations are in seconds, before the generator applies the time
//! multiplier and minimum. Combinations without suitable exercises return
//! an empty slice.

use super::{BodyPart, Equipment};

/// One library entry with its base duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseDef {
    pub name: &'static str,
    pub secs: u64,
}

const fn ex(name: &'static str, secs: u64) -> ExerciseDef {
    ExerciseDef { name, secs }
}

static FULL_BODYWEIGHT: [ExerciseDef; 4] = [
    ex("Jumping Jacks", 20),
    ex("Burpees", 30),
    ex("Mountain Climbers", 25),
    ex("Push-ups", 40),
];
static FULL_DUMBBELLS: [ExerciseDef; 4] = [
    ex("Dumbbell Squats", 40),
    ex("Shoulder Press", 30),
    ex("Bent-over Rows", 35),
    ex("Lunges", 45),
];
static FULL_RESISTANCE: [ExerciseDef; 4] = [
    ex("Band Squats", 40),
    ex("Band Pull-aparts", 25),
    ex("Band Rows", 35),
    ex("Band Deadlifts", 40),
];
static FULL_KETTLEBELL: [ExerciseDef; 3] = [
    ex("Kettlebell Swings", 30),
    ex("Goblet Squats", 40),
    ex("Kettlebell Deadlifts", 35),
];
static FULL_BARBELL: [ExerciseDef; 3] = [
    ex("Barbell Squats", 45),
    ex("Bench Press", 40),
    ex("Barbell Rows", 35),
];

static ARMS_BODYWEIGHT: [ExerciseDef; 3] = [
    ex("Push-ups", 30),
    ex("Tricep Dips", 25),
    ex("Plank Shoulder Taps", 30),
];
static ARMS_DUMBBELLS: [ExerciseDef; 3] = [
    ex("Bicep Curls", 25),
    ex("Overhead Tricep Extensions", 30),
    ex("Lateral Raises", 20),
];
static ARMS_RESISTANCE: [ExerciseDef; 3] = [
    ex("Band Bicep Curls", 25),
    ex("Band Tricep Kickbacks", 25),
    ex("Band Face Pulls", 30),
];
static ARMS_KETTLEBELL: [ExerciseDef; 3] = [
    ex("Kettlebell Hammer Curls", 25),
    ex("Kettlebell Overhead Press", 30),
    ex("Kettlebell Upright Rows", 25),
];
static ARMS_BARBELL: [ExerciseDef; 3] = [
    ex("Barbell Bicep Curls", 25),
    ex("Close-grip Bench Press", 30),
    ex("Barbell Shrugs", 25),
];

static LEGS_BODYWEIGHT: [ExerciseDef; 4] = [
    ex("Squats", 40),
    ex("Lunges", 40),
    ex("Glute Bridges", 35),
    ex("Calf Raises", 25),
];
static LEGS_DUMBBELLS: [ExerciseDef; 3] = [
    ex("Goblet Squats", 40),
    ex("Step-ups", 35),
    ex("Deadlifts", 45),
];
static LEGS_RESISTANCE: [ExerciseDef; 3] = [
    ex("Band Squats", 40),
    ex("Monster Walks", 30),
    ex("Leg Abductions", 30),
];
static LEGS_KETTLEBELL: [ExerciseDef; 3] = [
    ex("Kettlebell Lunges", 35),
    ex("Kettlebell Sumo Deadlifts", 40),
    ex("Kettlebell Goblet Squats", 35),
];
static LEGS_BARBELL: [ExerciseDef; 3] = [
    ex("Barbell Squats", 45),
    ex("Barbell Deadlifts", 45),
    ex("Barbell Hip Thrusts", 40),
];

static CORE_BODYWEIGHT: [ExerciseDef; 4] = [
    ex("Sit-ups", 30),
    ex("Russian Twists", 25),
    ex("Plank", 45),
    ex("Bicycle Crunches", 30),
];
static CORE_DUMBBELLS: [ExerciseDef; 2] = [
    ex("Weighted Sit-ups", 30),
    ex("Dumbbell Side Bend", 25),
];
static CORE_RESISTANCE: [ExerciseDef; 3] = [
    ex("Band Rotations", 30),
    ex("Band Deadbug", 25),
    ex("Band Crunches", 30),
];
static CORE_KETTLEBELL: [ExerciseDef; 3] = [
    ex("Kettlebell Side Bends", 25),
    ex("Kettlebell Russian Twists", 30),
    ex("Kettlebell Plank Rows", 30),
];
static CORE_BARBELL: [ExerciseDef; 3] = [
    ex("Barbell Rollouts", 30),
    ex("Landmine Twists", 30),
    ex("Hanging Leg Raises", 25),
];

static BACK_BODYWEIGHT: [ExerciseDef; 3] = [
    ex("Superman Hold", 30),
    ex("Reverse Snow Angels", 25),
    ex("Bird Dogs", 30),
];
static BACK_DUMBBELLS: [ExerciseDef; 3] = [
    ex("Dumbbell Deadlifts", 40),
    ex("Dumbbell Rows", 35),
    ex("Reverse Flys", 25),
];
static BACK_BARBELL: [ExerciseDef; 3] = [
    ex("Barbell Deadlifts", 45),
    ex("Barbell Rows", 35),
    ex("Good Mornings", 30),
];

static CHEST_BODYWEIGHT: [ExerciseDef; 3] = [
    ex("Push-ups", 30),
    ex("Wide-arm Push-ups", 25),
    ex("Incline Push-ups", 30),
];
static CHEST_DUMBBELLS: [ExerciseDef; 3] = [
    ex("Dumbbell Bench Press", 40),
    ex("Dumbbell Flys", 30),
    ex("Incline Dumbbell Press", 35),
];
static CHEST_BARBELL: [ExerciseDef; 3] = [
    ex("Bench Press", 40),
    ex("Incline Bench Press", 35),
    ex("Barbell Pullover", 30),
];

static SHOULDERS_BODYWEIGHT: [ExerciseDef; 3] = [
    ex("Arm Circles", 20),
    ex("Pike Push-ups", 30),
    ex("Plank to Downward Dog", 25),
];
static SHOULDERS_DUMBBELLS: [ExerciseDef; 3] = [
    ex("Overhead Press", 30),
    ex("Front Raises", 25),
    ex("Arnold Press", 30),
];
static SHOULDERS_KETTLEBELL: [ExerciseDef; 3] = [
    ex("Kettlebell Press", 30),
    ex("Kettlebell High Pulls", 25),
    ex("Kettlebell Push Press", 30),
];

/// Candidate exercises for the given selection.
pub fn exercises_for(body_part: BodyPart, equipment: Equipment) -> &'static [ExerciseDef] {
    match (body_part, equipment) {
        (BodyPart::Full, Equipment::Bodyweight) => &FULL_BODYWEIGHT,
        (BodyPart::Full, Equipment::Dumbbells) => &FULL_DUMBBELLS,
        (BodyPart::Full, Equipment::Resistance) => &FULL_RESISTANCE,
        (BodyPart::Full, Equipment::Kettlebell) => &FULL_KETTLEBELL,
        (BodyPart::Full, Equipment::Barbell) => &FULL_BARBELL,

        (BodyPart::Arms, Equipment::Bodyweight) => &ARMS_BODYWEIGHT,
        (BodyPart::Arms, Equipment::Dumbbells) => &ARMS_DUMBBELLS,
        (BodyPart::Arms, Equipment::Resistance) => &ARMS_RESISTANCE,
        (BodyPart::Arms, Equipment::Kettlebell) => &ARMS_KETTLEBELL,
        (BodyPart::Arms, Equipment::Barbell) => &ARMS_BARBELL,

        (BodyPart::Legs, Equipment::Bodyweight) => &LEGS_BODYWEIGHT,
        (BodyPart::Legs, Equipment::Dumbbells) => &LEGS_DUMBBELLS,
        (BodyPart::Legs, Equipment::Resistance) => &LEGS_RESISTANCE,
        (BodyPart::Legs, Equipment::Kettlebell) => &LEGS_KETTLEBELL,
        (BodyPart::Legs, Equipment::Barbell) => &LEGS_BARBELL,

        (BodyPart::Core, Equipment::Bodyweight) => &CORE_BODYWEIGHT,
        (BodyPart::Core, Equipment::Dumbbells) => &CORE_DUMBBELLS,
        (BodyPart::Core, Equipment::Resistance) => &CORE_RESISTANCE,
        (BodyPart::Core, Equipment::Kettlebell) => &CORE_KETTLEBELL,
        (BodyPart::Core, Equipment::Barbell) => &CORE_BARBELL,

        (BodyPart::Back, Equipment::Bodyweight) => &BACK_BODYWEIGHT,
        (BodyPart::Back, Equipment::Dumbbells) => &BACK_DUMBBELLS,
        (BodyPart::Back, Equipment::Barbell) => &BACK_BARBELL,

        (BodyPart::Chest, Equipment::Bodyweight) => &CHEST_BODYWEIGHT,
        (BodyPart::Chest, Equipment::Dumbbells) => &CHEST_DUMBBELLS,
        (BodyPart::Chest, Equipment::Barbell) => &CHEST_BARBELL,

        (BodyPart::Shoulders, Equipment::Bodyweight) => &SHOULDERS_BODYWEIGHT,
        (BodyPart::Shoulders, Equipment::Dumbbells) => &SHOULDERS_DUMBBELLS,
        (BodyPart::Shoulders, Equipment::Kettlebell) => &SHOULDERS_KETTLEBELL,

        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_a_positive_base_duration() {
        for part in BodyPart::ALL {
            for equipment in Equipment::ALL {
                for def in exercises_for(part, equipment) {
                    assert!(def.secs > 0, "{} has zero duration", def.name);
                }
            }
        }
    }

    #[test]
    fn back_has_no_kettlebell_or_resistance_entries() {
        assert!(exercises_for(BodyPart::Back, Equipment::Kettlebell).is_empty());
        assert!(exercises_for(BodyPart::Back, Equipment::Resistance).is_empty());
    }
}
