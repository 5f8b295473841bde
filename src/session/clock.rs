//! Elapsed-time clock for workout sessions.
//!
//! The clock never reads the wall clock itself. It counts `Tick` events
//! delivered by a [`Ticker`](super::Ticker), one per second, and ignores any
//! tick that arrives while it is stopped or that was scheduled for an older
//! generation.

use serde::{Deserialize, Serialize};

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    /// Counting ticks
    Running,
    /// Not counting; elapsed value is frozen
    Stopped,
}

/// A counter of whole elapsed seconds.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Elapsed seconds
    elapsed_seconds: u64,
    /// Current state
    state: ClockState,
    /// Ticks tagged with any other generation are stale.
    generation: u64,
}

impl Clock {
    /// Create a stopped clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            state: ClockState::Stopped,
            generation: 0,
        }
    }

    /// Start counting. Calling this while already running has no effect.
    pub fn start(&mut self) {
        if self.state == ClockState::Stopped {
            self.state = ClockState::Running;
            self.generation += 1;
        }
    }

    /// Stop counting. The elapsed value is kept.
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Set the counter back to zero without changing running/stopped state.
    ///
    /// Ticks already scheduled against the previous generation are dropped.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.generation += 1;
    }

    /// Count one tick scheduled for `generation`.
    ///
    /// Returns true if the tick was counted.
    pub fn tick(&mut self, generation: u64) -> bool {
        if self.state != ClockState::Running || generation != self.generation {
            return false;
        }

        self.elapsed_seconds += 1;
        true
    }

    /// Elapsed whole seconds.
    #[must_use]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Generation a ticker must tag its ticks with to be counted.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if the clock is counting.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> ClockState {
        self.state
    }

    /// Format elapsed time as MM:SS.
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_mmss(self.elapsed_seconds)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as MM:SS. Minutes are not capped at 59.
#[must_use]
pub fn format_mmss(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.elapsed(), 0);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn test_clock_tick_counts_one_per_tick() {
        let mut clock = Clock::new();
        clock.start();
        let generation = clock.generation();

        for expected in 1..=90 {
            assert!(clock.tick(generation));
            assert_eq!(clock.elapsed(), expected);
        }
    }

    #[test]
    fn test_clock_start_is_idempotent() {
        let mut clock = Clock::new();
        clock.start();
        let generation = clock.generation();
        clock.start();

        assert_eq!(clock.generation(), generation);
        assert!(clock.tick(generation));
        assert_eq!(clock.elapsed(), 1);
    }

    #[test]
    fn test_no_tick_after_stop() {
        let mut clock = Clock::new();
        clock.start();
        let generation = clock.generation();
        clock.tick(generation);
        clock.tick(generation);

        clock.stop();
        clock.stop();
        assert!(!clock.tick(generation));
        assert_eq!(clock.elapsed(), 2);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_reset_zeroes_and_keeps_state() {
        let mut clock = Clock::new();
        clock.start();
        let old = clock.generation();
        for _ in 0..42 {
            clock.tick(old);
        }

        clock.reset();
        assert_eq!(clock.elapsed(), 0);
        assert!(clock.is_running());

        // a tick scheduled before the reset is stale
        assert!(!clock.tick(old));
        assert_eq!(clock.elapsed(), 0);
        assert!(clock.tick(clock.generation()));
        assert_eq!(clock.elapsed(), 1);

        clock.stop();
        clock.reset();
        assert_eq!(clock.elapsed(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_restart_opens_new_generation() {
        let mut clock = Clock::new();
        clock.start();
        let first = clock.generation();
        clock.stop();
        clock.start();

        assert_ne!(clock.generation(), first);
        assert!(!clock.tick(first));
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(60), "01:00");
        assert_eq!(format_mmss(125), "02:05");
        assert_eq!(format_mmss(3661), "61:01");
    }
}
