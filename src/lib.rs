//! workout-tracker - step through workouts with a running clock
//!
//! This crate fetches workouts and their exercises from a workout backend
//! and runs an exercise session: a navigator over the exercise list, an
//! elapsed-time clock, and the controller that ties them together.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod tui;

pub use api::{WorkoutClient, WorkoutSource};
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::WorkoutError;
pub use session::{SessionController, SessionEvent, SessionStatus};
