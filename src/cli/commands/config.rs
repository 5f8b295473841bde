//! Config command implementation.

use std::path::Path;

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::WorkoutError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// `config` is the effective configuration (file plus overrides) and `path`
/// the file it was read from.
///
/// # Errors
///
/// Returns an error if the config file cannot be written or serialized.
pub fn config(
    config: &Config,
    path: &Path,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, WorkoutError> {
    match cmd {
        ConfigCommands::Show => show_config(config, path, format),
        ConfigCommands::Init { force } => init_config(path, force),
    }
}

fn show_config(config: &Config, path: &Path, format: OutputFormat) -> Result<String, WorkoutError> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Pretty => {
            let source = if path.exists() {
                path.display().to_string()
            } else {
                format!("{} (not found, using defaults)", path.display())
            };

            let mut output = Vec::new();
            output.push(format!("{} {}", "Config:".dimmed(), source));
            output.push("─".repeat(40));
            output.push(config.to_yaml()?.trim_end().to_string());
            Ok(output.join("\n"))
        }
    }
}

fn init_config(path: &Path, force: bool) -> Result<String, WorkoutError> {
    if path.exists() && !force {
        return Err(WorkoutError::Config(format!(
            "{} already exists.\nUse --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Config::default().save_to_path(path)?;

    Ok(format!("Wrote default configuration to {}", path.display())
        .green()
        .to_string())
}
