//! Error types shared by the store, the sequencer and the HTTP layer

use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

use crate::state::ExerciseField;

/// Failures while reading or writing the key-value storage
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read storage at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("In-memory storage lock poisoned")]
    Poisoned,
}

/// Application-level errors returned by `AppState` operations
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Exercise index {index} is out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid value {value:?} for field {field}")]
    InvalidValue { field: ExerciseField, value: String },

    #[error("No exercises defined")]
    NoExercises,

    #[error("Current exercise is not complete")]
    NotComplete,

    #[error("Session state lock poisoned")]
    LockPoisoned,
}

impl AppError {
    /// HTTP status code the API answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidValue { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoExercises | AppError::NotComplete => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
