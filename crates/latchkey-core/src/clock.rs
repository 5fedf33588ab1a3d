//! Monotonic millisecond tick sources
//!
//! Ticks are `u32` milliseconds that wrap around after roughly 49.7 days,
//! the same shape as a firmware timer register. Consumers must compare them
//! with wrapping arithmetic only.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond clock
pub trait Clock {
    /// Current tick in milliseconds (wrapping)
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `since`, correct across one wraparound
    fn elapsed_since(&self, since: u32) -> u32 {
        self.now_ms().wrapping_sub(since)
    }
}

/// Wall clock backed by [`Instant`], counting from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wraparound.
        self.origin.elapsed().as_millis() as u32
    }
}

/// Hand-driven clock for simulation and tests
///
/// Clones share the same tick, so a test can keep one handle while the latch
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    /// Create a clock starting at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given tick
    pub fn starting_at(tick: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(tick)),
        }
    }

    /// Move time forward, wrapping at `u32::MAX`
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Jump to an absolute tick
    pub fn set(&self, tick: u32) {
        self.now.set(tick);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
