//! Command-line interface for workout-tracker.

pub mod args;
pub mod commands;
