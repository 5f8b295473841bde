//! Application state for the TUI.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{error, warn};

use crate::api::{Workout, WorkoutSource};
use crate::error::WorkoutError;
use crate::session::{
    SessionController, SessionEvent, SessionObserver, SessionRunner, SessionSnapshot,
    SessionStatus,
};

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// List of workouts.
    Workouts,
    /// One workout's session.
    Session,
}

/// Result of loading something from the backend.
#[derive(Debug)]
pub enum Load<T> {
    /// A fetch is queued and runs after the loading screen is drawn.
    Loading,
    /// Fetched successfully.
    Ready(T),
    /// Fetch failed; the message is shown until the user retries.
    Failed(String),
}

/// Keeps the list cursor on the current exercise so it stays in view.
struct FollowCurrent {
    cursor: Rc<Cell<usize>>,
}

impl SessionObserver for FollowCurrent {
    fn index_changed(&mut self, index: usize) {
        self.cursor.set(index);
    }

    fn status_changed(&mut self, _status: SessionStatus) {}
}

/// A workout opened on the session screen.
pub struct ActiveWorkout {
    /// Backend ID of the workout.
    pub workout_id: String,
    /// Display name, when opened from the list.
    pub name: Option<String>,
    /// Session once the exercises are loaded.
    pub runner: Load<SessionRunner>,
    /// Highlighted row; follows the current exercise, moved with j/k.
    cursor: Rc<Cell<usize>>,
}

impl ActiveWorkout {
    fn new(workout_id: String, name: Option<String>) -> Self {
        Self {
            workout_id,
            name,
            runner: Load::Loading,
            cursor: Rc::new(Cell::new(0)),
        }
    }

    /// Title for the header.
    #[must_use]
    pub fn title(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Workout {}", self.workout_id))
    }

    /// Highlighted row.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// The running session, if loaded.
    #[must_use]
    pub fn session(&self) -> Option<&SessionController> {
        match &self.runner {
            Load::Ready(runner) => Some(runner.controller()),
            Load::Loading | Load::Failed(_) => None,
        }
    }
}

/// Application state.
pub struct App<'a> {
    /// Source of workouts and exercises.
    source: &'a dyn WorkoutSource,
    /// Clock tick period for new sessions.
    tick_interval: Duration,
    /// Current screen.
    pub screen: Screen,
    /// Workout list.
    pub workouts: Load<Vec<Workout>>,
    /// Selected row on the workout list.
    pub selected: usize,
    /// Workout on the session screen.
    pub active: Option<ActiveWorkout>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create an app that opens on the workout list.
    #[must_use]
    pub fn new(source: &'a dyn WorkoutSource, tick_interval: Duration) -> Self {
        Self {
            source,
            tick_interval,
            screen: Screen::Workouts,
            workouts: Load::Loading,
            selected: 0,
            active: None,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
        }
    }

    /// Create an app that opens directly on a workout's session.
    #[must_use]
    pub fn with_workout(
        source: &'a dyn WorkoutSource,
        tick_interval: Duration,
        workout_id: String,
    ) -> Self {
        let mut app = Self::new(source, tick_interval);
        app.screen = Screen::Session;
        app.active = Some(ActiveWorkout::new(workout_id, None));
        app
    }

    /// Whether a fetch is queued for the current screen.
    #[must_use]
    pub fn has_pending_load(&self) -> bool {
        match self.screen {
            Screen::Workouts => matches!(self.workouts, Load::Loading),
            Screen::Session => self
                .active
                .as_ref()
                .is_some_and(|a| matches!(a.runner, Load::Loading)),
        }
    }

    /// Run the queued fetch for the current screen.
    ///
    /// Fetch failures become a failed load state rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a session ticker cannot be started.
    pub fn load_pending(&mut self) -> Result<(), WorkoutError> {
        match self.screen {
            Screen::Workouts => {
                self.workouts = match self.source.load_workouts() {
                    Ok(workouts) => {
                        if self.selected >= workouts.len() {
                            self.selected = workouts.len().saturating_sub(1);
                        }
                        Load::Ready(workouts)
                    }
                    Err(e) => {
                        warn!(error = %e, "loading workouts failed");
                        Load::Failed(e.to_string())
                    }
                };
            }
            Screen::Session => {
                let source = self.source;
                let tick_interval = self.tick_interval;
                let Some(active) = self.active.as_mut() else {
                    return Ok(());
                };

                active.runner = match source.load_exercises(&active.workout_id) {
                    Ok(exercises) => {
                        active.cursor.set(0);
                        let mut controller = SessionController::new();
                        controller.set_observer(Box::new(FollowCurrent {
                            cursor: Rc::clone(&active.cursor),
                        }));
                        controller.load(exercises);
                        Load::Ready(SessionRunner::new(controller, tick_interval)?)
                    }
                    Err(e) => {
                        warn!(workout = %active.workout_id, error = %e, "loading exercises failed");
                        Load::Failed(e.to_string())
                    }
                };
            }
        }
        Ok(())
    }

    /// Apply queued session events (clock ticks and user actions).
    ///
    /// # Errors
    ///
    /// Returns an error if an event is invalid for the session, which means
    /// the UI produced a selection outside the exercise list.
    pub fn pump(&mut self) -> Result<(), WorkoutError> {
        if let Some(ActiveWorkout {
            runner: Load::Ready(runner),
            ..
        }) = self.active.as_mut()
        {
            runner.pump().map_err(|e| {
                error!(error = %e, "session rejected an event");
                e
            })?;
        }
        Ok(())
    }

    /// Snapshot of the running session, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.active
            .as_ref()
            .and_then(ActiveWorkout::session)
            .map(SessionController::snapshot)
    }

    /// Re-fetch whatever the current screen shows.
    pub fn reload(&mut self) {
        match self.screen {
            Screen::Workouts => self.workouts = Load::Loading,
            Screen::Session => {
                if let Some(active) = self.active.as_mut() {
                    active.runner = Load::Loading;
                }
            }
        }
    }

    /// Open the selected workout on the session screen.
    pub fn open_selected(&mut self) {
        if let Load::Ready(workouts) = &self.workouts {
            if let Some(workout) = workouts.get(self.selected) {
                self.active = Some(ActiveWorkout::new(
                    workout.id.clone(),
                    Some(workout.name.clone()),
                ));
                self.screen = Screen::Session;
                self.status = None;
            }
        }
    }

    /// Leave the session screen, discarding the session.
    pub fn back(&mut self) {
        if self.screen == Screen::Session {
            // dropping the runner cancels its ticker
            self.active = None;
            self.screen = Screen::Workouts;
            self.status = None;
        }
    }

    /// Queue an event for the running session.
    pub fn send(&self, event: SessionEvent) {
        if let Some(ActiveWorkout {
            runner: Load::Ready(runner),
            ..
        }) = self.active.as_ref()
        {
            runner.send(event);
        }
    }

    /// Number of rows on the current screen's list.
    fn row_count(&self) -> usize {
        match self.screen {
            Screen::Workouts => match &self.workouts {
                Load::Ready(workouts) => workouts.len(),
                Load::Loading | Load::Failed(_) => 0,
            },
            Screen::Session => self
                .active
                .as_ref()
                .and_then(ActiveWorkout::session)
                .map_or(0, |s| s.exercises().len()),
        }
    }

    /// Move the highlight up.
    pub fn select_previous(&mut self) {
        match self.screen {
            Screen::Workouts => self.selected = self.selected.saturating_sub(1),
            Screen::Session => {
                if let Some(active) = self.active.as_ref() {
                    active.cursor.set(active.cursor.get().saturating_sub(1));
                }
            }
        }
    }

    /// Move the highlight down.
    pub fn select_next(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        match self.screen {
            Screen::Workouts => {
                if self.selected < rows - 1 {
                    self.selected += 1;
                }
            }
            Screen::Session => {
                if let Some(active) = self.active.as_ref() {
                    if active.cursor.get() < rows - 1 {
                        active.cursor.set(active.cursor.get() + 1);
                    }
                }
            }
        }
    }

    /// Make the highlighted exercise the current one.
    pub fn select_cursor(&mut self) {
        if let Some(active) = self.active.as_ref() {
            self.select_exercise(active.cursor.get());
        }
    }

    /// Make exercise `index` the current one.
    ///
    /// Indices outside the list are ignored here so the session only ever
    /// sees valid selections.
    pub fn select_exercise(&mut self, index: usize) {
        let rows = self.row_count();
        if index < rows {
            self.send(SessionEvent::Select(index));
        } else {
            self.status = Some(format!("No exercise {}", index + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockWorkoutSource;
    use crate::api::ExerciseDescriptor;

    const FAST: Duration = Duration::from_millis(5);

    fn workouts() -> Vec<Workout> {
        vec![
            Workout {
                id: "1".to_string(),
                name: "Push".to_string(),
                duration: Some(30.0),
                description: String::new(),
                rest: Some(60.0),
            },
            Workout {
                id: "2".to_string(),
                name: "Pull".to_string(),
                duration: Some(35.0),
                description: String::new(),
                rest: None,
            },
        ]
    }

    fn source_with_exercises(names: &'static [&'static str]) -> MockWorkoutSource {
        let mut source = MockWorkoutSource::new();
        source.expect_load_workouts().returning(|| Ok(workouts()));
        source.expect_load_exercises().returning(move |_| {
            Ok(names
                .iter()
                .map(|n| ExerciseDescriptor::new(*n, ""))
                .collect())
        });
        source
    }

    #[test]
    fn test_load_workouts_and_open() {
        let source = source_with_exercises(&["A", "B", "C"]);
        let mut app = App::new(&source, FAST);
        assert!(app.has_pending_load());

        app.load_pending().unwrap();
        assert!(!app.has_pending_load());

        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);

        app.open_selected();
        assert_eq!(app.screen, Screen::Session);
        assert_eq!(app.active.as_ref().unwrap().title(), "Pull");
        assert!(app.has_pending_load());

        app.load_pending().unwrap();
        let snapshot = app.snapshot().unwrap();
        assert_eq!(snapshot.status, SessionStatus::Running);
        assert_eq!(snapshot.total_exercises, 3);
    }

    #[test]
    fn test_failed_load_is_shown_not_raised() {
        let mut source = MockWorkoutSource::new();
        source
            .expect_load_workouts()
            .returning(|| Err(WorkoutError::fetch("Failed to fetch workouts")));
        let mut app = App::new(&source, FAST);

        app.load_pending().unwrap();
        assert!(matches!(&app.workouts, Load::Failed(m) if m == "Failed to fetch workouts"));

        app.reload();
        assert!(app.has_pending_load());
    }

    #[test]
    fn test_failed_exercise_load_leaves_no_session() {
        let mut source = MockWorkoutSource::new();
        source
            .expect_load_exercises()
            .returning(|_| Err(WorkoutError::fetch("Failed to fetch exercises")));
        let mut app = App::with_workout(&source, FAST, "9".to_string());

        app.load_pending().unwrap();
        assert!(app.snapshot().is_none());
        assert!(matches!(
            app.active.as_ref().unwrap().runner,
            Load::Failed(_)
        ));
    }

    #[test]
    fn test_cursor_follows_current_exercise() {
        let source = source_with_exercises(&["A", "B", "C"]);
        let mut app = App::with_workout(&source, FAST, "1".to_string());
        app.load_pending().unwrap();

        app.send(SessionEvent::Next);
        app.pump().unwrap();
        assert_eq!(app.active.as_ref().unwrap().cursor(), 1);

        app.select_next();
        assert_eq!(app.active.as_ref().unwrap().cursor(), 2);
        app.select_cursor();
        app.pump().unwrap();
        assert_eq!(app.snapshot().unwrap().current_index, 2);
    }

    #[test]
    fn test_select_out_of_list_is_ignored() {
        let source = source_with_exercises(&["A", "B"]);
        let mut app = App::with_workout(&source, FAST, "1".to_string());
        app.load_pending().unwrap();

        app.select_exercise(5);
        app.pump().unwrap();
        assert_eq!(app.snapshot().unwrap().current_index, 0);
        assert_eq!(app.status.as_deref(), Some("No exercise 6"));
    }

    #[test]
    fn test_finish_and_back() {
        let source = source_with_exercises(&["A"]);
        let mut app = App::with_workout(&source, FAST, "1".to_string());
        app.load_pending().unwrap();

        app.send(SessionEvent::Next);
        app.pump().unwrap();
        let snapshot = app.snapshot().unwrap();
        assert_eq!(snapshot.status, SessionStatus::Finished);
        assert_eq!(snapshot.exercises_completed, 1);

        app.back();
        assert_eq!(app.screen, Screen::Workouts);
        assert!(app.active.is_none());
        assert!(app.has_pending_load());
    }
}
