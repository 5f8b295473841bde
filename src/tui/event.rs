//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::WorkoutError;
use crate::session::{SessionEvent, SessionStatus};
use crate::tui::app::{App, Load, Screen};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Leave the session screen.
    Back,
    /// Re-fetch the current screen's data.
    Reload,
    /// Open the selected workout.
    Open,
    /// Send an event to the running session.
    Session(SessionEvent),
}

const WORKOUTS_HELP: &str = "j/k:nav | Enter:start | r:refresh | q:quit";
const SESSION_HELP: &str =
    "n:next | p:prev | j/k:move | Enter:select | 1-9:jump | b:back | q:quit";
const FINISHED_HELP: &str = "s:start over | b:back to workouts | q:quit";
const FAILED_HELP: &str = "r:try again | b:back | q:quit";

/// Help line for the current screen.
#[must_use]
pub fn help_text(app: &App<'_>) -> &'static str {
    match app.screen {
        Screen::Workouts => WORKOUTS_HELP,
        Screen::Session => match app.active.as_ref().map(|a| &a.runner) {
            Some(Load::Failed(_)) => FAILED_HELP,
            _ => match app.snapshot().map(|s| s.status) {
                Some(SessionStatus::Finished) => FINISHED_HELP,
                _ => SESSION_HELP,
            },
        },
    }
}

/// Handle terminal events.
///
/// Waits up to `timeout` for input. Returns an action to take, or None if no
/// action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>, timeout: Duration) -> Result<Option<Action>, WorkoutError> {
    if event::poll(timeout).map_err(|e| WorkoutError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) = event::read()
            .map_err(|e| WorkoutError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map one key press to an action, applying pure navigation directly.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if key.code == KeyCode::Char('?') {
        app.status = Some(help_text(app).to_string());
        return None;
    }

    app.status = None;
    match app.screen {
        Screen::Workouts => handle_workouts_key(app, key.code),
        Screen::Session => handle_session_key(app, key.code),
    }
}

fn handle_workouts_key(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Open),
        KeyCode::Char('r') => Some(Action::Reload),
        _ => None,
    }
}

fn handle_session_key(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    if let KeyCode::Char('q') = code {
        return Some(Action::Quit);
    }
    if matches!(code, KeyCode::Esc | KeyCode::Char('b')) {
        return Some(Action::Back);
    }

    let loaded = app.active.as_ref().map(|a| &a.runner);
    if let Some(Load::Failed(_)) = loaded {
        return match code {
            KeyCode::Char('r') => Some(Action::Reload),
            _ => None,
        };
    }

    match app.snapshot().map(|s| s.status) {
        Some(SessionStatus::Running) => match code {
            KeyCode::Char('n' | 'l' | ' ') | KeyCode::Right => {
                Some(Action::Session(SessionEvent::Next))
            }
            KeyCode::Char('p' | 'h') | KeyCode::Left => {
                Some(Action::Session(SessionEvent::Previous))
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.select_previous();
                None
            }
            KeyCode::Enter => {
                app.select_cursor();
                None
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                app.select_exercise(index);
                None
            }
            _ => None,
        },
        Some(SessionStatus::Finished) => match code {
            KeyCode::Char('s' | 'r') => Some(Action::Session(SessionEvent::Reset)),
            _ => None,
        },
        Some(SessionStatus::Idle) | None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockWorkoutSource;
    use crate::api::ExerciseDescriptor;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session_source() -> MockWorkoutSource {
        let mut source = MockWorkoutSource::new();
        source.expect_load_exercises().returning(|_| {
            Ok(vec![
                ExerciseDescriptor::new("A", ""),
                ExerciseDescriptor::new("B", ""),
            ])
        });
        source
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let source = MockWorkoutSource::new();
        let mut app = App::new(&source, Duration::from_secs(1));
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(handle_key(&mut app, key), Some(Action::Quit));
    }

    #[test]
    fn test_session_keys_while_running() {
        let source = session_source();
        let mut app = App::with_workout(&source, Duration::from_secs(1), "1".to_string());
        app.load_pending().unwrap();

        assert_eq!(
            handle_key(&mut app, press(KeyCode::Char('n'))),
            Some(Action::Session(SessionEvent::Next))
        );
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Left)),
            Some(Action::Session(SessionEvent::Previous))
        );
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('b'))), Some(Action::Back));
        // reset is only offered once finished
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), None);
    }

    #[test]
    fn test_finished_keys() {
        let source = session_source();
        let mut app = App::with_workout(&source, Duration::from_secs(1), "1".to_string());
        app.load_pending().unwrap();
        app.send(SessionEvent::Select(1));
        app.send(SessionEvent::Next);
        app.pump().unwrap();

        assert_eq!(
            handle_key(&mut app, press(KeyCode::Char('s'))),
            Some(Action::Session(SessionEvent::Reset))
        );
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('n'))), None);
        assert_eq!(help_text(&app), FINISHED_HELP);
    }

    #[test]
    fn test_digit_selects_exercise() {
        let source = session_source();
        let mut app = App::with_workout(&source, Duration::from_secs(1), "1".to_string());
        app.load_pending().unwrap();

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('2'))), None);
        app.pump().unwrap();
        assert_eq!(app.snapshot().unwrap().current_index, 1);
    }

    #[test]
    fn test_help_key_sets_status() {
        let source = MockWorkoutSource::new();
        let mut app = App::new(&source, Duration::from_secs(1));

        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.status.as_deref(), Some(WORKOUTS_HELP));
    }
}
