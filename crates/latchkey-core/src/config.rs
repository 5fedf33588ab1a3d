//! Latch configuration

use tracing::warn;
use zeroize::Zeroizing;

use crate::error::{LatchError, Result};
use crate::LOCK_TIMEOUT_MS;

/// PIN and timing settings, fixed for the lifetime of a latch
#[derive(Clone)]
pub struct LatchConfig {
    /// Expected PIN as ASCII digits
    pin: Zeroizing<String>,

    /// Idle time after unlock before auto-lock (milliseconds)
    lock_timeout_ms: u32,
}

impl LatchConfig {
    /// Create a config with the default 5 minute timeout
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: Zeroizing::new(pin.into()),
            lock_timeout_ms: LOCK_TIMEOUT_MS,
        }
    }

    /// Override the auto-lock timeout
    pub fn with_lock_timeout_ms(mut self, lock_timeout_ms: u32) -> Self {
        self.lock_timeout_ms = lock_timeout_ms;
        self
    }

    pub fn lock_timeout_ms(&self) -> u32 {
        self.lock_timeout_ms
    }

    pub(crate) fn pin_bytes(&self) -> &[u8] {
        self.pin.as_bytes()
    }

    pub fn pin_len(&self) -> usize {
        self.pin.len()
    }

    /// Check the PIN can be typed into a buffer holding `max_digits`
    ///
    /// A PIN longer than the buffer is accepted but can never match, since
    /// extra digits are dropped during entry.
    pub fn validate(&self, max_digits: usize) -> Result<()> {
        if self.pin.is_empty() {
            return Err(LatchError::EmptyPin);
        }
        if !self.pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LatchError::NonDigitPin);
        }
        if self.pin.len() > max_digits {
            warn!(
                pin_len = self.pin.len(),
                max_digits, "PIN longer than the entry buffer; it can never match"
            );
        }
        Ok(())
    }
}

impl core::fmt::Debug for LatchConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LatchConfig")
            .field("pin", &"<redacted>")
            .field("lock_timeout_ms", &self.lock_timeout_ms)
            .finish()
    }
}
