//! Exercise persistence
//!
//! The exercise list lives under a single key of a string key-value
//! storage, serialized as a JSON array.

pub mod exercise_store;
pub mod storage;

pub use exercise_store::{ExerciseStore, EXERCISES_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
