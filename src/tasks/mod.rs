//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;

// Re-export main functions
pub use countdown::{countdown_task, TICK_PERIOD};
