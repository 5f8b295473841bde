//! Configuration management for workout-tracker.
//!
//! This module handles loading and saving configuration from `~/.workout/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ApiConfig, Config, SessionConfig};
