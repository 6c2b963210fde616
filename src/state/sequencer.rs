//! Rep/set/break countdown state machine
//!
//! The sequencer has no clock of its own. The countdown task calls
//! [`Sequencer::tick`] once per second while the sequencer is running and
//! passes in the exercise definition as it is at that moment.
//!
//! ```text
//! Idle -> RunningRep -> OnBreak -> RunningRep -> ... -> Complete
//! ```
//!
//! `stop` in either running phase reports `Paused` until the next `start`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ExerciseDefinition;

/// Audio cue requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Next repetition
    Short,
    /// Start, break begin, break end, exercise complete
    Long,
}

/// Coarse view of the sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    RunningRep,
    OnBreak,
    Paused,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequencer {
    pub current_exercise_index: usize,
    pub current_rep: u32,
    pub current_set: u32,
    pub seconds_remaining_in_rep: u32,
    pub seconds_remaining_in_break: u32,
    pub running: bool,
    /// Stopped mid-exercise, rep or break
    pub paused: bool,
    pub on_break: bool,
    pub exercise_complete: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            current_exercise_index: 0,
            current_rep: 0,
            current_set: 1,
            seconds_remaining_in_rep: 0,
            seconds_remaining_in_break: 0,
            running: false,
            paused: false,
            on_break: false,
            exercise_complete: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.exercise_complete {
            Phase::Complete
        } else if self.paused {
            Phase::Paused
        } else if self.on_break {
            Phase::OnBreak
        } else if self.running {
            Phase::RunningRep
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start, resume, or restart after completion.
    ///
    /// Returns the cue to play, or `None` if already running.
    pub fn start(&mut self, exercise: &ExerciseDefinition) -> Option<Cue> {
        if self.running {
            return None;
        }

        if self.exercise_complete {
            self.current_rep = 1;
            self.current_set = 1;
            self.exercise_complete = false;
        } else if self.current_rep == 0 {
            self.current_rep = 1;
        }

        // A paused break resumes where it left off
        if !self.on_break {
            self.seconds_remaining_in_rep = exercise.time;
        }
        self.running = true;
        self.paused = false;
        debug!(
            "Sequencer started: rep {}/{}, set {}/{}",
            self.current_rep, exercise.reps, self.current_set, exercise.sets
        );
        Some(Cue::Long)
    }

    /// Pause without touching the counters
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.paused = true;
        }
    }

    /// Advance by one second. Returns the cue for any transition taken.
    pub fn tick(&mut self, exercise: &ExerciseDefinition) -> Option<Cue> {
        if !self.running {
            return None;
        }

        if self.on_break {
            if self.seconds_remaining_in_break > 0 {
                self.seconds_remaining_in_break -= 1;
                if self.seconds_remaining_in_break > 0 {
                    return None;
                }
            }
            return Some(self.end_break(exercise));
        }

        if self.seconds_remaining_in_rep > 0 {
            self.seconds_remaining_in_rep -= 1;
        }
        if self.seconds_remaining_in_rep > 0 {
            return None;
        }
        Some(self.end_rep(exercise))
    }

    fn end_rep(&mut self, exercise: &ExerciseDefinition) -> Cue {
        if self.current_rep < exercise.reps {
            self.current_rep += 1;
            self.seconds_remaining_in_rep = exercise.time;
            Cue::Short
        } else if self.current_set < exercise.sets {
            debug!("Set {} finished, starting break", self.current_set);
            self.on_break = true;
            self.seconds_remaining_in_break = exercise.break_time;
            Cue::Long
        } else {
            debug!("Exercise {} complete", exercise.exercise_name);
            self.running = false;
            self.exercise_complete = true;
            Cue::Long
        }
    }

    fn end_break(&mut self, exercise: &ExerciseDefinition) -> Cue {
        self.on_break = false;
        self.current_set += 1;
        self.current_rep = 1;
        self.seconds_remaining_in_rep = exercise.time;
        debug!("Break over, starting set {}", self.current_set);
        Cue::Long
    }

    /// Move to the next exercise once the current one is complete, wrapping
    /// past the end of the list. Returns `false` if not complete.
    pub fn continue_to_next(&mut self, exercises: &[ExerciseDefinition]) -> bool {
        if !self.exercise_complete || exercises.is_empty() {
            return false;
        }

        let next = self.current_exercise_index + 1;
        self.current_exercise_index = if next < exercises.len() { next } else { 0 };
        self.current_rep = 1;
        self.current_set = 1;
        self.seconds_remaining_in_rep = exercises[self.current_exercise_index].time;
        self.seconds_remaining_in_break = 0;
        self.on_break = false;
        self.running = false;
        self.paused = false;
        self.exercise_complete = false;
        true
    }

    /// Keep the active index pointing at the same exercise after the entry
    /// at `removed` is gone. Removing the active exercise resets everything.
    pub fn exercise_removed(&mut self, removed: usize, remaining: usize) {
        if removed == self.current_exercise_index || remaining == 0 {
            self.reset();
        } else if removed < self.current_exercise_index {
            self.current_exercise_index -= 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
