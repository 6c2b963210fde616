//! Exercise definitions and the add/edit form representations

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One exercise as persisted in storage and shown in the list.
///
/// Field names on the wire are the persisted ones: `exerciseName`, `reps`,
/// `time`, `sets`, `breakTime`. Numeric fields also accept numeric strings
/// when loading, since older data stored edited values as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    pub exercise_name: String,
    /// Repetitions per set
    #[serde(deserialize_with = "lenient_count")]
    pub reps: u32,
    /// Seconds per repetition
    #[serde(deserialize_with = "lenient_count")]
    pub time: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub sets: u32,
    /// Seconds of rest between sets
    #[serde(deserialize_with = "lenient_count")]
    pub break_time: u32,
}

impl ExerciseDefinition {
    pub fn new(name: impl Into<String>, reps: u32, time: u32, sets: u32, break_time: u32) -> Self {
        Self {
            exercise_name: name.into(),
            reps,
            time,
            sets,
            break_time,
        }
    }

    /// Non-empty name, positive reps/time/sets. Break may be zero.
    pub fn is_valid(&self) -> bool {
        !self.exercise_name.trim().is_empty() && self.reps >= 1 && self.time >= 1 && self.sets >= 1
    }

    /// Return a copy with `field` replaced by the parsed `value`, or `None`
    /// if the value does not fit the field.
    pub fn with_field(&self, field: ExerciseField, value: &str) -> Option<Self> {
        let mut updated = self.clone();
        match field {
            ExerciseField::ExerciseName => {
                if value.trim().is_empty() {
                    return None;
                }
                updated.exercise_name = value.to_string();
            }
            ExerciseField::Reps => updated.reps = parse_count(value, 1)?,
            ExerciseField::Time => updated.time = parse_count(value, 1)?,
            ExerciseField::Sets => updated.sets = parse_count(value, 1)?,
            ExerciseField::BreakTime => updated.break_time = parse_count(value, 0)?,
        }
        Some(updated)
    }
}

impl Default for ExerciseDefinition {
    /// The built-in exercise used when storage holds nothing usable
    fn default() -> Self {
        Self::new("Smile Exercise", 10, 30, 3, 60)
    }
}

/// Editable fields of an exercise, named as they are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseField {
    ExerciseName,
    Reps,
    Time,
    Sets,
    BreakTime,
}

impl fmt::Display for ExerciseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseField::ExerciseName => "exerciseName",
            ExerciseField::Reps => "reps",
            ExerciseField::Time => "time",
            ExerciseField::Sets => "sets",
            ExerciseField::BreakTime => "breakTime",
        };
        f.write_str(name)
    }
}

/// The add-exercise form as typed by the user. Every field is raw text;
/// JSON numbers are accepted and kept as their text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    #[serde(default)]
    pub exercise_name: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub reps: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub sets: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub break_time: Option<String>,
}

impl ExerciseDraft {
    /// Convert into a definition. Any missing, empty or non-numeric field
    /// yields `None`.
    pub fn into_definition(self) -> Option<ExerciseDefinition> {
        let name = self.exercise_name.filter(|n| !n.trim().is_empty())?;
        Some(ExerciseDefinition {
            exercise_name: name,
            reps: parse_count(self.reps.as_deref()?, 1)?,
            time: parse_count(self.time.as_deref()?, 1)?,
            sets: parse_count(self.sets.as_deref()?, 1)?,
            break_time: parse_count(self.break_time.as_deref()?, 0)?,
        })
    }
}

fn parse_count(value: &str, min: u32) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n >= min)
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn form_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
