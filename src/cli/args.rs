use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "workout")]
#[command(about = "Step through workouts from your workout backend, with a running clock")]
#[command(long_about = "workout - a terminal workout tracker

Lists the workouts served by your workout backend and walks you through
each workout's exercises one at a time while an elapsed-time clock runs.

QUICK START:
  workout list              Show available workouts
  workout show 3            Show the exercises of workout 3
  workout start 3           Start workout 3 in the terminal UI
  workout tui               Browse workouts in the terminal UI

BACKEND:
  The backend URL comes from ~/.workout/config.yaml (api.backend_url),
  the WORKOUT_BACKEND_URL environment variable, or --backend-url.

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Base URL of the workout backend (overrides the config file)
    #[arg(long, env = "WORKOUT_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Load configuration from this file instead of ~/.workout/config.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available workouts
    ///
    /// Shows every workout the backend serves: id, name, planned duration,
    /// rest between exercises and description.
    ///
    /// # Examples
    ///
    ///   workout list              List workouts
    ///   workout ls -o json        Output as JSON
    #[command(alias = "ls")]
    List,

    /// Show the exercises of a workout
    ///
    /// Prints the workout's exercises in order with sets, reps, weight
    /// and rest where the backend provides them.
    ///
    /// # Examples
    ///
    ///   workout show 3
    ///   workout show 3 -o json
    Show {
        /// Workout ID (from 'workout list')
        id: String,
    },

    /// Start a workout session in the terminal UI
    ///
    /// Loads the workout's exercises and opens the session screen with
    /// the clock running.
    ///
    /// Keys: n/→/space next, p/← previous, j/k move, Enter select,
    /// s start over (when finished), b back, q quit.
    Start {
        /// Workout ID (from 'workout list')
        id: String,
    },

    /// Browse workouts in the terminal UI
    Tui,

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
