//! The latch: single owner of all lock state
//!
//! Operations are split across modules by concern:
//! - [`crate::entry`]: PIN entry controller and entry-request key
//! - [`crate::dispense`]: secret dispenser
//! - [`crate::monitor`]: auto-lock monitor
//! - [`crate::trigger`]: external lock trigger
//! - [`crate::indicator`]: indicator adapter

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::LatchConfig;
use crate::dispense::KeystrokeSink;
use crate::error::{LatchError, Result};
use crate::keycode::KeyEvent;
use crate::pin::PinBuffer;
use crate::registry::SecretRegistry;
use crate::state::{LockCause, LockState, Propagation};
use crate::PIN_BUFFER_CAPACITY;

/// PIN-gated secrets engine
///
/// Holds the lock state, the PIN buffer and the unlock timestamp. Every
/// transition takes `&mut self`, so a host can only drive it from one place
/// at a time.
pub struct Latch<'a, C: Clock = SystemClock, const CAP: usize = PIN_BUFFER_CAPACITY> {
    pub(crate) state: LockState,
    pub(crate) pin_buffer: PinBuffer<CAP>,
    /// Tick of the last successful unlock; only meaningful while unlocked
    pub(crate) unlocked_at: u32,
    pub(crate) config: LatchConfig,
    pub(crate) registry: SecretRegistry<'a>,
    pub(crate) clock: C,
}

impl<'a, C: Clock, const CAP: usize> Latch<'a, C, CAP> {
    /// Create a locked latch
    pub fn new(config: LatchConfig, registry: SecretRegistry<'a>, clock: C) -> Result<Self> {
        if CAP < 2 {
            return Err(LatchError::BufferTooSmall(CAP));
        }
        config.validate(PinBuffer::<CAP>::max_digits())?;

        debug!(
            secrets = registry.len(),
            lock_timeout_ms = config.lock_timeout_ms(),
            "Latch initialized"
        );

        Ok(Self {
            state: LockState::Locked,
            pin_buffer: PinBuffer::new(),
            unlocked_at: 0,
            config,
            registry,
            clock,
        })
    }

    /// Route one input event through the handlers
    ///
    /// Order: PIN entry controller, entry-request key, dispenser. The first
    /// handler that consumes the event ends the chain.
    pub fn process<S>(&mut self, event: KeyEvent, sink: &mut S) -> Propagation
    where
        S: KeystrokeSink + ?Sized,
    {
        self.process_pin_entry(event)
            .or_else(|| self.process_entry_key(event))
            .or_else(|| self.process_secret_key(event, sink))
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state.is_unlocked()
    }

    pub fn is_pin_entry(&self) -> bool {
        self.state.is_pin_entry()
    }

    /// Number of digits collected in the current PIN entry
    pub fn pin_len(&self) -> usize {
        self.pin_buffer.len()
    }

    pub fn config(&self) -> &LatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &SecretRegistry<'a> {
        &self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Return to `Locked` and wipe the PIN buffer
    pub(crate) fn relock(&mut self, cause: LockCause) {
        self.state = LockState::Locked;
        self.pin_buffer.clear();
        debug!(%cause, "Secrets locked");
    }
}

impl<'a, const CAP: usize> Latch<'a, SystemClock, CAP> {
    /// Create a locked latch driven by the wall clock
    pub fn with_system_clock(config: LatchConfig, registry: SecretRegistry<'a>) -> Result<Self> {
        Self::new(config, registry, SystemClock::new())
    }
}

impl<C: Clock, const CAP: usize> core::fmt::Debug for Latch<'_, C, CAP> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Latch")
            .field("state", &self.state)
            .field("pin_buffer", &self.pin_buffer)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
