//! Once-per-second tick source and the serial event queue it feeds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::WorkoutError;
use crate::session::controller::{SessionController, SessionEvent};

/// Wall-clock period of one clock tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Single serial queue carrying clock ticks and user actions.
///
/// Events are applied to the controller strictly in arrival order.
#[derive(Debug)]
pub struct EventQueue {
    sender: Sender<SessionEvent>,
    receiver: Receiver<SessionEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A handle producers use to enqueue events.
    #[must_use]
    pub fn sender(&self) -> Sender<SessionEvent> {
        self.sender.clone()
    }

    /// Enqueue an event.
    pub fn push(&self, event: SessionEvent) {
        // the receiver lives in self, so sending cannot fail
        let _ = self.sender.send(event);
    }

    /// Take the next pending event without blocking.
    #[must_use]
    pub fn try_next(&self) -> Option<SessionEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    #[must_use]
    pub fn next_timeout(&self, timeout: Duration) -> Option<SessionEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Background thread sending one `Tick` per interval for a fixed generation.
///
/// Dropping the ticker cancels it. A tick already in flight when the ticker
/// is cancelled carries a generation the clock no longer accepts.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    /// Spawn a ticker for `generation`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(
        sender: Sender<SessionEvent>,
        generation: u64,
        interval: Duration,
    ) -> Result<Self, WorkoutError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::Builder::new()
            .name(format!("ticker-{generation}"))
            .spawn(move || run_ticker(&sender, generation, interval, &flag))?;

        debug!(generation, "ticker started");
        Ok(Self {
            generation,
            cancelled,
        })
    }

    /// Generation this ticker tags its ticks with.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop sending ticks.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!(generation = self.generation, "ticker cancelled");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_ticker(
    sender: &Sender<SessionEvent>,
    generation: u64,
    interval: Duration,
    cancelled: &AtomicBool,
) {
    // deadlines are absolute so sleep overshoot does not accumulate
    let mut deadline = Instant::now() + interval;
    loop {
        thread::sleep(deadline.saturating_duration_since(Instant::now()));
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        trace!(generation, "tick");
        if sender.send(SessionEvent::Tick { generation }).is_err() {
            break;
        }
        deadline += interval;
    }
}

/// A session controller driven by its own event queue and ticker.
///
/// Keeps exactly one ticker alive while the clock runs, matching the clock's
/// current generation.
#[derive(Debug)]
pub struct SessionRunner {
    controller: SessionController,
    queue: EventQueue,
    ticker: Option<Ticker>,
    tick_interval: Duration,
}

impl SessionRunner {
    /// Wrap `controller`, starting a ticker if its clock is running.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker thread cannot be spawned.
    pub fn new(controller: SessionController, tick_interval: Duration) -> Result<Self, WorkoutError> {
        let mut runner = Self {
            controller,
            queue: EventQueue::new(),
            ticker: None,
            tick_interval,
        };
        runner.sync_ticker()?;
        Ok(runner)
    }

    /// Enqueue a user action.
    pub fn send(&self, event: SessionEvent) {
        self.queue.push(event);
    }

    /// Apply every pending event in order.
    ///
    /// Returns the number of events applied. Stops at the first failing
    /// event; later events stay queued.
    ///
    /// # Errors
    ///
    /// Returns the error of the failing event.
    pub fn pump(&mut self) -> Result<usize, WorkoutError> {
        let mut applied = 0;
        while let Some(event) = self.queue.try_next() {
            self.apply(event)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Wait up to `timeout` for one event and apply it.
    ///
    /// Returns false if nothing arrived.
    ///
    /// # Errors
    ///
    /// Returns the error of the applied event.
    pub fn pump_one(&mut self, timeout: Duration) -> Result<bool, WorkoutError> {
        match self.queue.next_timeout(timeout) {
            Some(event) => {
                self.apply(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The wrapped controller.
    #[must_use]
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Check if a ticker is currently alive.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    fn apply(&mut self, event: SessionEvent) -> Result<(), WorkoutError> {
        let result = self.controller.dispatch(event);
        self.sync_ticker()?;
        result
    }

    fn sync_ticker(&mut self) -> Result<(), WorkoutError> {
        if !self.controller.is_clock_running() {
            self.ticker = None;
            return Ok(());
        }

        let generation = self.controller.clock_generation();
        if self.ticker.as_ref().map(Ticker::generation) != Some(generation) {
            // the old ticker is cancelled when dropped by the assignment
            self.ticker = Some(Ticker::spawn(
                self.queue.sender(),
                generation,
                self.tick_interval,
            )?);
        }
        Ok(())
    }
}
