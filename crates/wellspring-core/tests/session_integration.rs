//! End-to-end controller scenarios driven with deterministic timestamps.

use wellspring_core::session::{MindfulMode, MindfulSession, MindfulState, WorkoutSession, WorkoutState};
use wellspring_core::storage::Config;
use wellspring_core::workout::{generate_plan, BodyPart, Equipment};
use wellspring_core::{MemoryCounters, NullAudio};

use rand::SeedableRng;
use rand_pcg::Pcg64;

fn mindful(mode: MindfulMode) -> MindfulSession<MemoryCounters, NullAudio> {
    MindfulSession::new(mode, &Config::default(), MemoryCounters::new(), NullAudio)
}

#[test]
fn pomodoro_full_cycle_counts_once() {
    let mut session = mindful(MindfulMode::Pomodoro);
    session.start_at(0);

    // Work phase runs down and flips to break, counting one session.
    for t in 1..=1500 {
        session.tick_at(t * 1000);
    }
    assert_eq!(session.sessions_completed(), 1);
    assert_eq!(session.state(), MindfulState::RunningPomodoroBreak);
    assert_eq!(session.display_secs(), 5 * 60);

    // Break flips back to work without counting.
    for t in 1501..=1800 {
        session.tick_at(t * 1000);
    }
    assert_eq!(session.sessions_completed(), 1);
    assert_eq!(session.state(), MindfulState::RunningPomodoroWork);

    // A second full work phase counts again.
    for t in 1801..=3300 {
        session.tick_at(t * 1000);
    }
    assert_eq!(session.sessions_completed(), 2);
}

#[test]
fn meditation_threshold_is_exact() {
    let mut short = mindful(MindfulMode::Meditation);
    short.start_at(0);
    for t in 1..=59 {
        short.tick_at(t * 1000);
    }
    short.stop_at(59_000);
    assert_eq!(short.sessions_completed(), 0);

    let mut exact = mindful(MindfulMode::Meditation);
    exact.start_at(0);
    for t in 1..=60 {
        exact.tick_at(t * 1000);
    }
    exact.stop_at(60_000);
    assert_eq!(exact.sessions_completed(), 1);
}

#[test]
fn paused_time_never_counts_toward_a_session() {
    let mut session = mindful(MindfulMode::Meditation);
    session.start_at(0);
    for t in 1..=30 {
        session.tick_at(t * 1000);
    }
    session.pause_at(30_000);
    // Ten minutes away from the cushion.
    session.resume_at(630_000);
    for t in 631..=659 {
        session.tick_at(t * 1000);
    }
    session.stop_at(659_000);
    // 30s + 29s of actual practice: not a session.
    assert_eq!(session.sessions_completed(), 0);
}

#[test]
fn generated_workout_runs_to_completion() {
    let config = Config::default();
    let mut rng = Pcg64::seed_from_u64(5);
    let plan = generate_plan(BodyPart::Core, Equipment::Bodyweight, &config.workout, &mut rng);
    assert_eq!(plan.len(), 4);

    let mut session = WorkoutSession::new(false, MemoryCounters::new(), NullAudio);
    session.load_plan(&plan, config.workout.rest_secs);
    session.start_at(0);
    assert!(matches!(session.state(), WorkoutState::Running { exercise: 0 }));

    let total: u64 = plan.exercises().iter().map(|e| e.secs).sum::<u64>()
        + config.workout.rest_secs * (plan.len() as u64 - 1);
    for t in 1..=total {
        session.tick_at(t * 1000);
    }
    assert_eq!(session.state(), WorkoutState::Complete);
    assert_eq!(session.workouts_completed(), 1);

    // Finished workouts stay finished until a new plan is generated.
    assert!(session.start_at((total + 10) * 1000).is_none());
}

#[test]
fn workout_sampling_respects_small_pools() {
    let config = Config::default();
    let mut rng = Pcg64::seed_from_u64(11);
    // Five requested, three available.
    let plan = generate_plan(BodyPart::Full, Equipment::Barbell, &config.workout, &mut rng);
    assert_eq!(plan.len(), 3);
    for exercise in plan.exercises() {
        assert!(exercise.secs >= config.workout.min_exercise_secs);
    }
}

#[test]
fn controllers_share_nothing() {
    // The two features own independent sequencers; driving one does not
    // disturb the other.
    let mut mindful = mindful(MindfulMode::Pomodoro);
    let mut workout = WorkoutSession::new(false, MemoryCounters::new(), NullAudio);
    let plan = generate_plan(
        BodyPart::Legs,
        Equipment::Bodyweight,
        &Config::default().workout,
        &mut Pcg64::seed_from_u64(3),
    );
    workout.load_plan(&plan, 20);

    mindful.start_at(0);
    workout.start_at(0);
    for t in 1..=100 {
        mindful.tick_at(t * 1000);
    }
    assert!(matches!(workout.state(), WorkoutState::Running { exercise: 0 }));
    assert_eq!(workout.sequencer().elapsed_secs(), 0);
}
