//! Side-effecting services
//!
//! Currently only audio cue playback.

pub mod cues;

pub use cues::{CommandCuePlayer, CueSink, RecordingCueSink};
