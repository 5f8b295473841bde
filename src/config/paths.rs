//! Path resolution for workout-tracker configuration and log files.
//!
//! All data is stored in `~/.workout/`:
//! - `config.yaml` - Main configuration file
//! - `logs/` - Log output (the terminal UI owns stdout/stderr)

use std::path::PathBuf;

use crate::error::WorkoutError;

/// Paths to configuration and log files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.workout/`
    pub root: PathBuf,
    /// Config file: `~/.workout/config.yaml`
    pub config_file: PathBuf,
    /// Logs directory: `~/.workout/logs/`
    pub logs: PathBuf,
    /// Log file: `~/.workout/logs/workout.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, WorkoutError> {
        let home = std::env::var("HOME")
            .map_err(|_| WorkoutError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".workout")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        let logs = root.join("logs");
        Self {
            config_file: root.join("config.yaml"),
            log_file: logs.join("workout.log"),
            logs,
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), WorkoutError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    WorkoutError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".workout"))
        })
    }
}
