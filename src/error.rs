//! Error types for workout-tracker.

use thiserror::Error;

/// Errors produced by the workout tracker.
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// Loading workouts or exercises from the backend failed.
    #[error("{message}")]
    Fetch {
        /// Message shown to the user.
        message: String,
        /// Underlying transport or decode error, if any.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A direct exercise selection named an index outside the list.
    #[error("exercise index {index} is out of range (workout has {len} exercises)")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of exercises in the session.
        len: usize,
    },

    /// Configuration could not be loaded, saved or applied.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup or drawing failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("failed to serialize output: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WorkoutError {
    /// Build a fetch error with no underlying source.
    #[must_use]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            source: None,
        }
    }

    /// Build a fetch error wrapping a transport or decode failure.
    #[must_use]
    pub fn fetch_with(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Whether this error came from the data-loading collaborator.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
