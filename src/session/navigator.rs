//! Position tracking within an ordered exercise list.

use crate::error::WorkoutError;

/// Outcome of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// The current index changed.
    pub moved: bool,
    /// An advance was attempted on the last exercise.
    pub completed: bool,
}

impl Step {
    const MOVED: Self = Self {
        moved: true,
        completed: false,
    };

    const STAYED: Self = Self {
        moved: false,
        completed: false,
    };

    const COMPLETED: Self = Self {
        moved: false,
        completed: true,
    };
}

/// Cursor over a fixed number of exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    current: usize,
}

impl Navigator {
    /// Create a navigator over `len` exercises, positioned on the first.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Move to the next exercise.
    ///
    /// On the last exercise nothing moves and the step reports completion.
    pub fn advance(&mut self) -> Step {
        if self.len == 0 {
            return Step::STAYED;
        }

        if self.current < self.len - 1 {
            self.current += 1;
            Step::MOVED
        } else {
            Step::COMPLETED
        }
    }

    /// Move to the previous exercise. No-op on the first.
    pub fn retreat(&mut self) -> Step {
        if self.current > 0 {
            self.current -= 1;
            Step::MOVED
        } else {
            Step::STAYED
        }
    }

    /// Jump directly to `index`, forwards or backwards.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::OutOfRange` if `index` is not a valid position;
    /// the current index is left unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<Step, WorkoutError> {
        if index >= self.len {
            return Err(WorkoutError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let moved = index != self.current;
        self.current = index;
        Ok(Step {
            moved,
            completed: false,
        })
    }

    /// Return to the first exercise.
    pub fn rewind(&mut self) {
        self.current = 0;
    }

    /// Fraction of the list reached, counting the current exercise.
    ///
    /// Returns 0.0 for an empty list.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        (self.current + 1) as f64 / self.len as f64
    }

    /// Current index.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of exercises.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if there are no exercises.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the cursor is on the last exercise.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.len > 0 && self.current == self.len - 1
    }
}
