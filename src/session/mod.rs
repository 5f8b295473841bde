//! Workout session tracking.
//!
//! Steps through a workout's exercises in order while counting elapsed time:
//! - Navigator: position within the exercise list
//! - Clock: elapsed seconds, counted from ticks
//! - Controller: the state machine composing both
//! - Ticker/queue: the serial event stream that drives the controller

pub mod clock;
pub mod controller;
pub mod navigator;
pub mod ticker;

pub use clock::{format_mmss, Clock, ClockState};
pub use controller::{
    SessionController, SessionEvent, SessionObserver, SessionSnapshot, SessionStatus,
};
pub use navigator::{Navigator, Step};
pub use ticker::{EventQueue, SessionRunner, Ticker, TICK_INTERVAL};
