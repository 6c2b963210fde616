//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Cue, ExerciseDefinition, ExerciseDraft, ExerciseField, Phase, Sequencer};
use crate::{
    error::{AppError, AppResult},
    services::CueSink,
    store::ExerciseStore,
};

/// Everything a user intent can mutate, guarded by one lock
struct Session {
    store: ExerciseStore,
    sequencer: Sequencer,
    muted: bool,
}

/// Point-in-time view of the sequencer and the exercise it runs
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    #[serde(flatten)]
    pub sequencer: Sequencer,
    pub current_exercise: Option<ExerciseDefinition>,
    pub muted: bool,
}

/// Main application state shared by the HTTP handlers and the countdown task
pub struct AppState {
    session: Mutex<Session>,
    cues: Arc<dyn CueSink>,
    /// Bumped whenever an intent changes what the countdown depends on
    input_change_tx: watch::Sender<u64>,
    /// Keep the receiver alive to prevent channel closure
    _input_change_rx: watch::Receiver<u64>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(store: ExerciseStore, cues: Arc<dyn CueSink>, muted: bool, port: u16, host: String) -> Self {
        let (input_change_tx, input_change_rx) = watch::channel(0);

        Self {
            session: Mutex::new(Session {
                store,
                sequencer: Sequencer::new(),
                muted,
            }),
            cues,
            input_change_tx,
            _input_change_rx: input_change_rx,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Session>> {
        self.session.lock().map_err(|_| AppError::LockPoisoned)
    }

    /// Tell the countdown task to rebuild its tick source
    fn notify_input_change(&self) {
        self.input_change_tx.send_modify(|generation| *generation += 1);
    }

    /// Subscribe to input change notifications
    pub fn subscribe_input_changes(&self) -> watch::Receiver<u64> {
        self.input_change_tx.subscribe()
    }

    /// Play a cue unless muted. Muted cues never reach the sink.
    fn emit(&self, muted: bool, cue: Option<Cue>) {
        match cue {
            Some(cue) if muted => debug!("Muted, skipping {:?} cue", cue),
            Some(cue) => self.cues.emit(cue),
            None => {}
        }
    }

    pub fn exercises(&self) -> AppResult<Vec<ExerciseDefinition>> {
        Ok(self.lock()?.store.exercises().to_vec())
    }

    /// Add an exercise from the form. Returns the new index, or `None` if
    /// the draft was incomplete and nothing happened.
    pub fn add_exercise(&self, draft: ExerciseDraft) -> AppResult<Option<usize>> {
        let mut session = self.lock()?;
        Ok(session.store.add(draft)?)
    }

    pub fn edit_exercise(&self, index: usize, field: ExerciseField, value: &str) -> AppResult<ExerciseDefinition> {
        let edited = self.lock()?.store.edit(index, field, value)?.clone();
        self.notify_input_change();
        Ok(edited)
    }

    /// Remove an exercise. The sequencer keeps tracking the same active
    /// exercise, or resets if that exercise is the one removed.
    pub fn remove_exercise(&self, index: usize) -> AppResult<ExerciseDefinition> {
        let mut session = self.lock()?;
        let removed = session.store.remove(index)?;
        let remaining = session.store.len();
        if index == session.sequencer.current_exercise_index {
            info!("Active exercise removed, resetting timer");
        }
        session.sequencer.exercise_removed(index, remaining);
        drop(session);

        self.notify_input_change();
        Ok(removed)
    }

    pub fn start_timer(&self) -> AppResult<TimerSnapshot> {
        let mut session = self.lock()?;
        let exercise = active_exercise(&session)?;
        let cue = session.sequencer.start(&exercise);
        let started = cue.is_some();
        if started {
            info!("Timer started for {:?}", exercise.exercise_name);
        }
        self.emit(session.muted, cue);
        let snapshot = snapshot(&session);
        drop(session);

        // Already running: keep the current tick source and its phase
        if started {
            self.notify_input_change();
        }
        Ok(snapshot)
    }

    pub fn stop_timer(&self) -> AppResult<TimerSnapshot> {
        let mut session = self.lock()?;
        if session.store.is_empty() {
            return Err(AppError::NoExercises);
        }
        let was_running = session.sequencer.is_running();
        session.sequencer.stop();
        let snapshot = snapshot(&session);
        drop(session);

        if was_running {
            info!("Timer stopped");
            self.notify_input_change();
        }
        Ok(snapshot)
    }

    pub fn continue_exercise(&self) -> AppResult<TimerSnapshot> {
        let mut session = self.lock()?;
        if session.store.is_empty() {
            return Err(AppError::NoExercises);
        }
        let Session { store, sequencer, .. } = &mut *session;
        if !sequencer.continue_to_next(store.exercises()) {
            return Err(AppError::NotComplete);
        }
        info!("Moved on to exercise {}", sequencer.current_exercise_index);
        let snapshot = snapshot(&session);
        drop(session);

        self.notify_input_change();
        Ok(snapshot)
    }

    /// Flip the mute flag and return the new value
    pub fn toggle_mute(&self) -> AppResult<bool> {
        let mut session = self.lock()?;
        session.muted = !session.muted;
        let muted = session.muted;
        drop(session);

        info!("Audio cues {}", if muted { "muted" } else { "unmuted" });
        self.notify_input_change();
        Ok(muted)
    }

    /// Advance the countdown by one second against the current exercise.
    /// Returns whether the sequencer is still running afterwards.
    pub fn tick(&self) -> AppResult<bool> {
        let mut session = self.lock()?;
        let Ok(exercise) = active_exercise(&session) else {
            warn!("Tick with no active exercise, stopping timer");
            session.sequencer.reset();
            return Ok(false);
        };
        let cue = session.sequencer.tick(&exercise);
        self.emit(session.muted, cue);
        Ok(session.sequencer.is_running())
    }

    pub fn is_running(&self) -> AppResult<bool> {
        Ok(self.lock()?.sequencer.is_running())
    }

    pub fn timer_snapshot(&self) -> AppResult<TimerSnapshot> {
        Ok(snapshot(&*self.lock()?))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

fn active_exercise(session: &Session) -> AppResult<ExerciseDefinition> {
    session
        .store
        .get(session.sequencer.current_exercise_index)
        .cloned()
        .ok_or(AppError::NoExercises)
}

fn snapshot(session: &Session) -> TimerSnapshot {
    TimerSnapshot {
        phase: session.sequencer.phase(),
        sequencer: session.sequencer.clone(),
        current_exercise: session.store.get(session.sequencer.current_exercise_index).cloned(),
        muted: session.muted,
    }
}
