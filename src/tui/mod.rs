//! Terminal User Interface (TUI) for workout-tracker.
//!
//! Lists workouts from the backend and runs a timed session for the chosen
//! one. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::api::WorkoutSource;
use crate::error::WorkoutError;

/// How long to wait for a key press before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the TUI application.
///
/// Opens on the workout list, or straight on the session for `workout_id`.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    source: &dyn WorkoutSource,
    tick_interval: Duration,
    workout_id: Option<String>,
) -> Result<(), WorkoutError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| WorkoutError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| WorkoutError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| WorkoutError::Terminal(format!("Failed to create terminal: {e}")))?;

    // Create app state and run main loop
    let mut app = match workout_id {
        Some(id) => App::with_workout(source, tick_interval, id),
        None => App::new(source, tick_interval),
    };
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), WorkoutError> {
    while !app.should_quit {
        app.pump()?;

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| WorkoutError::Terminal(format!("Failed to draw: {e}")))?;

        // The loading screen is on screen now; fetch behind it
        if app.has_pending_load() {
            app.load_pending()?;
            continue;
        }

        // Handle events
        if let Some(action) = event::handle_events(app, POLL_INTERVAL)? {
            debug!(?action, "key action");
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::Back => app.back(),
                event::Action::Reload => app.reload(),
                event::Action::Open => app.open_selected(),
                event::Action::Session(session_event) => app.send(session_event),
            }
        }
    }

    Ok(())
}
