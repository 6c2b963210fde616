//! Countdown task tests under paused tokio time.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use rep_counter::{
    services::RecordingCueSink,
    state::{AppState, Cue, ExerciseDefinition, Phase},
    store::{ExerciseStore, MemoryStorage, Storage, EXERCISES_KEY},
    tasks::countdown_task,
};

fn spawn_state(exercise: ExerciseDefinition, muted: bool) -> (Arc<AppState>, RecordingCueSink) {
    let storage = MemoryStorage::new();
    storage
        .set(EXERCISES_KEY, &serde_json::to_string(&[exercise]).unwrap())
        .unwrap();

    let sink = RecordingCueSink::new();
    let state = Arc::new(AppState::new(
        ExerciseStore::load(Box::new(storage)),
        Arc::new(sink.clone()),
        muted,
        0,
        "127.0.0.1".to_string(),
    ));
    tokio::spawn(countdown_task(Arc::clone(&state)));
    (state, sink)
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_second_and_pauses_on_stop() {
    let (state, sink) = spawn_state(ExerciseDefinition::new("Test", 3, 5, 2, 10), false);
    tokio::task::yield_now().await;

    state.start_timer().unwrap();
    sleep(Duration::from_millis(4_500)).await;
    let timer = state.timer_snapshot().unwrap();
    assert_eq!(timer.sequencer.current_rep, 1);
    assert_eq!(timer.sequencer.seconds_remaining_in_rep, 1);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(state.timer_snapshot().unwrap().sequencer.current_rep, 2);

    state.stop_timer().unwrap();
    let paused = state.timer_snapshot().unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(state.timer_snapshot().unwrap().sequencer, paused.sequencer);

    state.start_timer().unwrap();
    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(state.timer_snapshot().unwrap().sequencer.current_rep, 3);

    assert_eq!(sink.cues(), vec![Cue::Long, Cue::Short, Cue::Long, Cue::Short]);
}

#[tokio::test(start_paused = true)]
async fn muted_full_cycle_completes_silently() {
    let (state, sink) = spawn_state(ExerciseDefinition::new("Test", 3, 5, 2, 10), true);
    tokio::task::yield_now().await;

    state.start_timer().unwrap();

    sleep(Duration::from_millis(15_500)).await;
    assert_eq!(state.timer_snapshot().unwrap().phase, Phase::OnBreak);

    sleep(Duration::from_secs(10)).await;
    let timer = state.timer_snapshot().unwrap();
    assert_eq!(timer.phase, Phase::RunningRep);
    assert_eq!((timer.sequencer.current_rep, timer.sequencer.current_set), (1, 2));

    sleep(Duration::from_secs(20)).await;
    let timer = state.timer_snapshot().unwrap();
    assert_eq!(timer.phase, Phase::Complete);
    assert!(!timer.sequencer.running);
    assert!(sink.cues().is_empty());
}

#[tokio::test(start_paused = true)]
async fn repeated_start_while_running_keeps_ticking() {
    let (state, sink) = spawn_state(ExerciseDefinition::new("Test", 3, 5, 2, 10), false);
    tokio::task::yield_now().await;

    state.start_timer().unwrap();
    for _ in 0..10 {
        sleep(Duration::from_millis(900)).await;
        state.start_timer().unwrap();
    }
    sleep(Duration::from_millis(450)).await;

    let timer = state.timer_snapshot().unwrap();
    assert_eq!(timer.sequencer.current_rep, 2);
    assert_eq!(timer.sequencer.seconds_remaining_in_rep, 1);
    assert_eq!(sink.cues(), vec![Cue::Long, Cue::Short]);
}
