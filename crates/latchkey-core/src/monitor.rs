//! Auto-lock monitor
//!
//! Polled once per scan tick. Relocks after the configured idle time has
//! passed since the last successful unlock.

use tracing::debug;

use crate::clock::Clock;
use crate::latch::Latch;
use crate::state::LockCause;

impl<C: Clock, const CAP: usize> Latch<'_, C, CAP> {
    /// Run one monitor pass. Returns `true` if this pass locked the latch.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_unlocked() {
            return false;
        }
        let elapsed = self.clock.elapsed_since(self.unlocked_at);
        if elapsed < self.config.lock_timeout_ms() {
            return false;
        }
        debug!(elapsed_ms = elapsed, "Auto-lock timeout reached");
        self.relock(LockCause::Timeout);
        true
    }

    /// Milliseconds until auto-lock, or `None` when not unlocked
    pub fn remaining_ms(&self) -> Option<u32> {
        if !self.state.is_unlocked() {
            return None;
        }
        let elapsed = self.clock.elapsed_since(self.unlocked_at);
        Some(self.config.lock_timeout_ms().saturating_sub(elapsed))
    }
}
