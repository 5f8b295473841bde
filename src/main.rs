use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use workout_tracker::api::WorkoutClient;
use workout_tracker::cli::args::{Cli, Commands};
use workout_tracker::cli::commands;
use workout_tracker::config::{Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::default();
    init_logging(&paths);

    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let mut config = Config::load_from_path(&config_path)?;
    config.override_backend_url(cli.backend_url);
    debug!(backend = %config.api.backend_url, config = %config_path.display(), "configuration loaded");

    let format = cli.output;

    let output = match cli.command {
        Commands::List => commands::list(&WorkoutClient::new(&config.api)?, format)?,
        Commands::Show { id } => commands::show(&WorkoutClient::new(&config.api)?, &id, format)?,
        Commands::Start { id } => {
            let client = WorkoutClient::new(&config.api)?;
            workout_tracker::tui::run(&client, config.session.tick_interval(), Some(id))?;
            String::new()
        }
        Commands::Tui => {
            let client = WorkoutClient::new(&config.api)?;
            workout_tracker::tui::run(&client, config.session.tick_interval(), None)?;
            String::new()
        }
        Commands::Config(args) => commands::config(&config, &config_path, args.command, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Send logs to the log file; the terminal UI owns stdout and stderr.
///
/// Filter comes from `WORKOUT_LOG` (default `warn`). Logging stays off when
/// the log file cannot be opened.
fn init_logging(paths: &Paths) {
    if paths.ensure_dirs().is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)
    else {
        return;
    };

    let filter = EnvFilter::try_from_env("WORKOUT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok();
}
