//! JSON output formatting for workout-tracker.

use serde::Serialize;
use serde_json::json;

use crate::api::{ExerciseDescriptor, Workout};
use crate::error::WorkoutError;

/// Format workouts as JSON
///
/// # Errors
///
/// Returns `WorkoutError::Parse` if JSON serialization fails.
pub fn format_workouts_json(workouts: &[Workout]) -> Result<String, WorkoutError> {
    let output = json!({
        "count": workouts.len(),
        "items": workouts
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a workout's exercises as JSON
///
/// # Errors
///
/// Returns `WorkoutError::Parse` if JSON serialization fails.
pub fn format_exercises_json(
    workout_id: &str,
    exercises: &[ExerciseDescriptor],
) -> Result<String, WorkoutError> {
    let output = json!({
        "workout": workout_id,
        "count": exercises.len(),
        "items": exercises
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `WorkoutError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, WorkoutError> {
    Ok(serde_json::to_string_pretty(value)?)
}
