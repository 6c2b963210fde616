//! State management module
//!
//! This module contains the exercise model, the countdown sequencer and the
//! shared application state that ties them to storage and audio cues.

pub mod app_state;
pub mod exercise;
pub mod sequencer;

// Re-export main types
pub use app_state::{AppState, TimerSnapshot};
pub use exercise::{ExerciseDefinition, ExerciseDraft, ExerciseField};
pub use sequencer::{Cue, Phase, Sequencer};
