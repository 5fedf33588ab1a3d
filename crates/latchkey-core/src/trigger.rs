//! External lock trigger
//!
//! Invoked when the host observes a "lock workstation" gesture. Unlike the
//! other lock paths this leaves the PIN buffer untouched; the next entry
//! request clears it before any digit is read.

use tracing::debug;

use crate::clock::Clock;
use crate::latch::Latch;
use crate::state::{LockCause, LockState};

impl<C: Clock, const CAP: usize> Latch<'_, C, CAP> {
    /// Force `Locked` immediately, whatever the current state
    pub fn external_lock(&mut self) {
        if self.state != LockState::Locked {
            debug!(cause = %LockCause::External, from = %self.state, "Secrets locked");
        }
        self.state = LockState::Locked;
    }
}
