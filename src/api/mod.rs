pub mod client;
pub mod types;

pub use client::{WorkoutClient, WorkoutSource};
pub use types::*;
