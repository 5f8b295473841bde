//! Output formatting for workout-tracker.
//!
//! This module provides formatters for displaying workouts and exercises in
//! various formats.

mod json;
mod pretty;

use crate::api::{ExerciseDescriptor, Workout};
use crate::cli::args::OutputFormat;
use crate::error::WorkoutError;

pub use json::*;
pub use pretty::*;

/// Format workouts based on output format
///
/// # Errors
///
/// Returns `WorkoutError::Parse` if JSON serialization fails.
pub fn format_workouts(workouts: &[Workout], format: OutputFormat) -> Result<String, WorkoutError> {
    match format {
        OutputFormat::Pretty => Ok(format_workouts_pretty(workouts)),
        OutputFormat::Json => format_workouts_json(workouts),
    }
}

/// Format a workout's exercises based on output format
///
/// # Errors
///
/// Returns `WorkoutError::Parse` if JSON serialization fails.
pub fn format_exercises(
    workout_id: &str,
    exercises: &[ExerciseDescriptor],
    format: OutputFormat,
) -> Result<String, WorkoutError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercises_pretty(workout_id, exercises)),
        OutputFormat::Json => format_exercises_json(workout_id, exercises),
    }
}
