//! PIN entry controller
//!
//! While the latch is in [`LockState::PinEntry`], digit presses from either
//! the number row or the keypad are collected, Enter submits and Escape
//! cancels. The entry-request key starts a prompt, or locks when the latch
//! is already unlocked.

use tracing::{debug, trace};

use crate::clock::Clock;
use crate::keycode::{KeyEvent, Keycode};
use crate::latch::Latch;
use crate::state::{LockCause, LockState, Propagation, Rejection};

impl<C: Clock, const CAP: usize> Latch<'_, C, CAP> {
    /// Request PIN entry
    ///
    /// From `Locked` (or an ongoing prompt) this starts a fresh prompt with
    /// an empty buffer. From `Unlocked` it locks instead.
    pub fn request_entry(&mut self) {
        match self.state {
            LockState::Unlocked => self.relock(LockCause::Toggle),
            LockState::Locked | LockState::PinEntry => {
                self.pin_buffer.clear();
                self.state = LockState::PinEntry;
                debug!("Entering PIN mode");
            }
        }
    }

    /// Handle the entry-request key
    pub fn process_entry_key(&mut self, event: KeyEvent) -> Propagation {
        if event.code == Keycode::PIN_ENTRY && event.pressed {
            self.request_entry();
            Propagation::Handled
        } else {
            Propagation::PassThrough
        }
    }

    /// Handle a key while collecting a PIN
    ///
    /// Consumes digit, submit and cancel presses. Everything else, including
    /// all releases, passes through. Outside PIN entry nothing is consumed.
    pub fn process_pin_entry(&mut self, event: KeyEvent) -> Propagation {
        if !self.state.is_pin_entry() || !event.pressed {
            return Propagation::PassThrough;
        }

        if let Some(digit) = event.code.digit() {
            self.push_digit(digit);
            return Propagation::Handled;
        }

        if event.code.is_submit() {
            self.submit_pin();
            return Propagation::Handled;
        }

        if event.code.is_cancel() {
            self.cancel_entry();
            return Propagation::Handled;
        }

        Propagation::PassThrough
    }

    /// Append a digit; dropped silently when the buffer is full
    ///
    /// Values above 9 are ignored.
    pub fn push_digit(&mut self, digit: u8) {
        if !self.state.is_pin_entry() || digit > 9 {
            return;
        }
        if self.pin_buffer.push(digit) {
            trace!(len = self.pin_buffer.len(), "Digit added");
        } else {
            debug!(reason = %Rejection::BufferOverflow, "Digit dropped");
        }
    }

    /// Compare the buffer against the PIN and leave PIN entry
    pub fn submit_pin(&mut self) {
        if !self.state.is_pin_entry() {
            return;
        }
        debug!(len = self.pin_buffer.len(), "PIN submitted");

        if self.pin_buffer.matches(self.config.pin_bytes()) {
            self.pin_buffer.clear();
            self.unlocked_at = self.clock.now_ms();
            self.state = LockState::Unlocked;
            debug!("PIN correct, secrets unlocked");
        } else {
            debug!(reason = %Rejection::WrongPin, "Access denied");
            self.relock(LockCause::WrongPin);
        }
    }

    /// Abandon PIN entry
    pub fn cancel_entry(&mut self) {
        if self.state.is_pin_entry() {
            self.relock(LockCause::Cancelled);
        }
    }
}
