//! Ordered exercise list with load-at-start and save-on-every-mutation

use tracing::{debug, info, warn};

use super::Storage;
use crate::{
    error::{AppError, AppResult, StoreError},
    state::{ExerciseDefinition, ExerciseDraft, ExerciseField},
};

/// Storage key holding the JSON array of exercises
pub const EXERCISES_KEY: &str = "exercises";

pub struct ExerciseStore {
    storage: Box<dyn Storage>,
    exercises: Vec<ExerciseDefinition>,
}

impl ExerciseStore {
    /// Load the persisted list. Anything missing or unreadable yields the
    /// single built-in default exercise.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let exercises = match storage.get(EXERCISES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ExerciseDefinition>>(&raw) {
                Ok(list) if list.iter().all(ExerciseDefinition::is_valid) => {
                    info!("Loaded {} exercises from storage", list.len());
                    list
                }
                Ok(_) => {
                    warn!("Stored exercises contain invalid entries, using default list");
                    default_list()
                }
                Err(e) => {
                    warn!("Stored exercises are malformed ({}), using default list", e);
                    default_list()
                }
            },
            Ok(None) => {
                info!("No stored exercises, using default list");
                default_list()
            }
            Err(e) => {
                warn!("Failed to read stored exercises ({}), using default list", e);
                default_list()
            }
        };

        Self { storage, exercises }
    }

    pub fn exercises(&self) -> &[ExerciseDefinition] {
        &self.exercises
    }

    pub fn get(&self, index: usize) -> Option<&ExerciseDefinition> {
        self.exercises.get(index)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Append the drafted exercise. An incomplete draft is ignored and
    /// `Ok(None)` is returned; otherwise the new index.
    pub fn add(&mut self, draft: ExerciseDraft) -> Result<Option<usize>, StoreError> {
        let Some(exercise) = draft.into_definition() else {
            debug!("Ignoring incomplete exercise draft");
            return Ok(None);
        };

        let mut updated = self.exercises.clone();
        info!("Adding exercise {:?}", exercise.exercise_name);
        updated.push(exercise);
        self.commit(updated)?;
        Ok(Some(self.exercises.len() - 1))
    }

    pub fn edit(&mut self, index: usize, field: ExerciseField, value: &str) -> AppResult<&ExerciseDefinition> {
        let current = self.exercises.get(index).ok_or(AppError::IndexOutOfRange {
            index,
            len: self.exercises.len(),
        })?;
        let edited = current.with_field(field, value).ok_or_else(|| AppError::InvalidValue {
            field,
            value: value.to_string(),
        })?;

        let mut updated = self.exercises.clone();
        updated[index] = edited;
        self.commit(updated)?;
        debug!("Edited exercise {} field {}", index, field);
        Ok(&self.exercises[index])
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> AppResult<ExerciseDefinition> {
        if index >= self.exercises.len() {
            return Err(AppError::IndexOutOfRange {
                index,
                len: self.exercises.len(),
            });
        }

        let mut updated = self.exercises.clone();
        let removed = updated.remove(index);
        self.commit(updated)?;
        info!("Removed exercise {:?}", removed.exercise_name);
        Ok(removed)
    }

    /// Persist first so a failed write leaves the in-memory list untouched
    fn commit(&mut self, updated: Vec<ExerciseDefinition>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&updated)?;
        self.storage.set(EXERCISES_KEY, &raw)?;
        self.exercises = updated;
        Ok(())
    }
}

fn default_list() -> Vec<ExerciseDefinition> {
    vec![ExerciseDefinition::default()]
}
