//! Command implementations for workout-tracker.
//!
//! This module contains the implementation of all non-interactive CLI
//! commands.

mod config;

pub use config::config;

use crate::api::WorkoutSource;
use crate::cli::args::OutputFormat;
use crate::error::WorkoutError;
use crate::output::{format_exercises, format_workouts};

/// Execute list command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn list(source: &dyn WorkoutSource, format: OutputFormat) -> Result<String, WorkoutError> {
    let workouts = source.load_workouts()?;
    format_workouts(&workouts, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn show(
    source: &dyn WorkoutSource,
    id: &str,
    format: OutputFormat,
) -> Result<String, WorkoutError> {
    let exercises = source.load_exercises(id)?;
    format_exercises(id, &exercises, format)
}
