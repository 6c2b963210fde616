//! Rep Counter - an exercise rep/set/break countdown timer
//!
//! Exercises are kept in an ordered list persisted to a key-value storage
//! file. A countdown sequencer walks through the reps, sets and breaks of
//! the active exercise once per second and plays audio cues on
//! transitions. User intents arrive over a small HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{AppError, StoreError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
