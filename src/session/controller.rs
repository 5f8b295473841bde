//! Workout session state machine.
//!
//! Composes a [`Navigator`] and a [`Clock`] behind a small event API. Every
//! mutation, clock ticks included, arrives as a [`SessionEvent`] and is
//! applied by [`SessionController::dispatch`], one at a time.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::api::ExerciseDescriptor;
use crate::error::WorkoutError;
use crate::session::clock::Clock;
use crate::session::navigator::{Navigator, Step};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Nothing loaded, or the workout has no exercises
    Idle,
    /// Clock counting, navigation enabled
    Running,
    /// Terminal; only reset is accepted
    Finished,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second elapsed for the given clock generation.
    Tick {
        /// Clock generation the tick was scheduled for.
        generation: u64,
    },
    /// Advance to the next exercise, finishing on the last one.
    Next,
    /// Go back one exercise.
    Previous,
    /// Jump directly to an exercise.
    Select(usize),
    /// Start over from the first exercise with the clock at zero.
    Reset,
}

/// Receives view-relevant notifications from the controller.
///
/// The terminal UI uses this to keep the current exercise scrolled into view.
#[cfg_attr(test, mockall::automock)]
pub trait SessionObserver {
    /// The current exercise index changed.
    fn index_changed(&mut self, index: usize);

    /// The session status changed.
    fn status_changed(&mut self, status: SessionStatus);
}

/// Derived readouts for rendering, recomputed on demand after a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Index of the current exercise.
    pub current_index: usize,
    /// Current exercise, absent while idle.
    pub current_exercise: Option<ExerciseDescriptor>,
    /// Whole seconds counted by the clock.
    pub elapsed_seconds: u64,
    /// Elapsed time as MM:SS.
    pub formatted_time: String,
    /// Fraction of the workout reached, 0.0 to 1.0.
    pub progress_fraction: f64,
    /// Whether the current exercise is the last one.
    pub is_last_exercise: bool,
    /// Number of exercises in the workout.
    pub total_exercises: usize,
    /// Shown on the finish screen. Always the full list length; skipped
    /// exercises are not tracked.
    pub exercises_completed: usize,
}

/// One user's traversal of a single workout's exercise list.
pub struct SessionController {
    exercises: Vec<ExerciseDescriptor>,
    navigator: Navigator,
    clock: Clock,
    status: SessionStatus,
    observer: Option<Box<dyn SessionObserver>>,
}

impl SessionController {
    /// Create an idle controller with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            exercises: Vec::new(),
            navigator: Navigator::new(0),
            clock: Clock::new(),
            status: SessionStatus::Idle,
            observer: None,
        }
    }

    /// Create a controller and load `exercises` into it.
    #[must_use]
    pub fn with_exercises(exercises: Vec<ExerciseDescriptor>) -> Self {
        let mut controller = Self::new();
        controller.load(exercises);
        controller
    }

    /// Register the observer notified on index and status changes.
    pub fn set_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observer = Some(observer);
    }

    /// Load the workout's exercises.
    ///
    /// A non-empty list starts the session on the first exercise with the
    /// clock running. An empty list leaves the session idle.
    pub fn load(&mut self, exercises: Vec<ExerciseDescriptor>) {
        self.navigator = Navigator::new(exercises.len());
        self.exercises = exercises;
        // keep the generation counter so ticks from a previous load stay stale
        self.clock.stop();
        self.clock.reset();

        if self.exercises.is_empty() {
            info!("workout has no exercises, session stays idle");
            self.set_status(SessionStatus::Idle);
            return;
        }

        info!(exercises = self.exercises.len(), "session started");
        self.clock.start();
        self.set_status(SessionStatus::Running);
        self.notify_index();
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::OutOfRange` for a selection outside the list;
    /// the session is left unchanged.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<(), WorkoutError> {
        match event {
            SessionEvent::Tick { generation } => {
                self.tick(generation);
            }
            SessionEvent::Next => {
                self.next();
            }
            SessionEvent::Previous => {
                self.previous();
            }
            SessionEvent::Select(index) => self.select_exercise(index)?,
            SessionEvent::Reset => self.reset(),
        }
        Ok(())
    }

    /// Count a clock tick. Returns true if elapsed time changed.
    pub fn tick(&mut self, generation: u64) -> bool {
        self.status == SessionStatus::Running && self.clock.tick(generation)
    }

    /// Advance to the next exercise; on the last exercise, finish.
    pub fn next(&mut self) -> Step {
        if self.status != SessionStatus::Running {
            return Step::default();
        }

        let step = self.navigator.advance();
        if step.moved {
            debug!(index = self.navigator.current(), "advanced");
            self.notify_index();
        } else if step.completed {
            self.clock.stop();
            info!(elapsed = self.clock.elapsed(), "workout finished");
            self.set_status(SessionStatus::Finished);
        }
        step
    }

    /// Go back one exercise. No-op on the first exercise.
    pub fn previous(&mut self) -> Step {
        if self.status != SessionStatus::Running {
            return Step::default();
        }

        let step = self.navigator.retreat();
        if step.moved {
            debug!(index = self.navigator.current(), "went back");
            self.notify_index();
        }
        step
    }

    /// Jump to any exercise, ahead of or behind the current one.
    ///
    /// Ignored unless the session is running.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::OutOfRange` if `index` is not in the list.
    pub fn select_exercise(&mut self, index: usize) -> Result<(), WorkoutError> {
        if self.status != SessionStatus::Running {
            return Ok(());
        }

        match self.navigator.jump_to(index) {
            Ok(step) => {
                if step.moved {
                    debug!(index, "selected exercise");
                    self.notify_index();
                }
                Ok(())
            }
            Err(e) => {
                error!(index, len = self.navigator.len(), "exercise selection out of range");
                Err(e)
            }
        }
    }

    /// Start over: first exercise, clock at zero and running.
    ///
    /// Ignored while idle.
    pub fn reset(&mut self) {
        if self.status == SessionStatus::Idle {
            return;
        }

        let moved = self.navigator.current() != 0;
        self.navigator.rewind();
        self.clock.reset();
        self.clock.start();
        info!("session reset");

        self.set_status(SessionStatus::Running);
        if moved {
            self.notify_index();
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Current exercise index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.navigator.current()
    }

    /// Current exercise, absent while idle.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&ExerciseDescriptor> {
        if self.status == SessionStatus::Idle {
            return None;
        }
        self.exercises.get(self.navigator.current())
    }

    /// All loaded exercises in order.
    #[must_use]
    pub fn exercises(&self) -> &[ExerciseDescriptor] {
        &self.exercises
    }

    /// Elapsed whole seconds.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed()
    }

    /// Generation ticks must carry to be counted.
    #[must_use]
    pub const fn clock_generation(&self) -> u64 {
        self.clock.generation()
    }

    /// Check if the clock is counting.
    #[must_use]
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Elapsed time as MM:SS.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.clock.format_elapsed()
    }

    /// Fraction of the workout reached, 0.0 when empty.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        self.navigator.progress_fraction()
    }

    /// Check if the current exercise is the last one.
    #[must_use]
    pub const fn is_last_exercise(&self) -> bool {
        self.navigator.is_last()
    }

    /// Capture all readouts for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            current_index: self.navigator.current(),
            current_exercise: self.current_exercise().cloned(),
            elapsed_seconds: self.clock.elapsed(),
            formatted_time: self.formatted_time(),
            progress_fraction: self.progress_fraction(),
            is_last_exercise: self.is_last_exercise(),
            total_exercises: self.exercises.len(),
            exercises_completed: if self.status == SessionStatus::Finished {
                self.exercises.len()
            } else {
                self.navigator.current()
            },
        }
    }

    fn set_status(&mut self, status: SessionStatus) {
        if self.status == status {
            return;
        }
        self.status = status;
        if let Some(observer) = self.observer.as_mut() {
            observer.status_changed(status);
        }
    }

    fn notify_index(&mut self) {
        let index = self.navigator.current();
        if let Some(observer) = self.observer.as_mut() {
            observer.index_changed(index);
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("status", &self.status)
            .field("current_index", &self.navigator.current())
            .field("exercises", &self.exercises.len())
            .field("elapsed_seconds", &self.clock.elapsed())
            .finish_non_exhaustive()
    }
}
