//! Latchkey Core - PIN-gated secrets engine for keyboard firmware
//!
//! This crate provides the lock state machine that sits between a keyboard's
//! input pipeline and its output pipeline:
//! - PIN entry from the number row or keypad
//! - Dispensing of fixed secrets as simulated keystrokes while unlocked
//! - Auto-lock after an idle timeout, polled once per scan tick
//! - Immediate relock from an external "lock workstation" trigger
//! - A status code for indicator LEDs
//!
//! All state lives in one owned [`Latch`] value. Nothing here performs I/O;
//! keystrokes leave through a [`KeystrokeSink`] supplied by the host.

pub mod clock;
pub mod config;
pub mod dispense;
pub mod entry;
pub mod error;
pub mod indicator;
pub mod keycode;
pub mod latch;
pub mod monitor;
pub mod pin;
pub mod registry;
pub mod state;
pub mod trigger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LatchConfig;
pub use dispense::{Keystroke, KeystrokeSink};
pub use error::{LatchError, Result};
pub use indicator::{Hsv, IndicatorCode};
pub use keycode::{KeyEvent, Keycode, Modifiers};
pub use latch::Latch;
pub use pin::PinBuffer;
pub use registry::SecretRegistry;
pub use state::{LockCause, LockState, Propagation, Rejection};

/// Idle time after a successful unlock before secrets relock (5 minutes)
pub const LOCK_TIMEOUT_MS: u32 = 300_000;

/// PIN buffer capacity, including the terminator slot
pub const PIN_BUFFER_CAPACITY: usize = 32;

/// Number of secret slots; sizes both the registry and the secret keycode range
pub const SECRET_SLOTS: usize = 6;
