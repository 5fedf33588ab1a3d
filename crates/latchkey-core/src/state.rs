//! Lock states and handler outcomes

use serde::{Deserialize, Serialize};

/// Lock state of the secrets engine. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockState {
    /// Secrets are inaccessible
    #[default]
    Locked,

    /// Collecting PIN digits
    PinEntry,

    /// Secrets can be dispensed until the idle timeout or a relock
    Unlocked,
}

impl LockState {
    pub fn is_locked(self) -> bool {
        matches!(self, LockState::Locked)
    }

    pub fn is_pin_entry(self) -> bool {
        matches!(self, LockState::PinEntry)
    }

    pub fn is_unlocked(self) -> bool {
        matches!(self, LockState::Unlocked)
    }
}

impl core::fmt::Display for LockState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LockState::Locked => write!(f, "locked"),
            LockState::PinEntry => write!(f, "pin-entry"),
            LockState::Unlocked => write!(f, "unlocked"),
        }
    }
}

/// Whether a handler consumed an event or let it continue downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Propagation {
    /// Event consumed; later handlers and the host must not see it
    Handled,

    /// Event not ours; keep processing
    PassThrough,
}

impl Propagation {
    pub fn is_handled(self) -> bool {
        matches!(self, Propagation::Handled)
    }

    /// Run the next handler only if this one passed the event through
    pub fn or_else(self, next: impl FnOnce() -> Propagation) -> Propagation {
        match self {
            Propagation::Handled => Propagation::Handled,
            Propagation::PassThrough => next(),
        }
    }
}

/// Why the engine returned to [`LockState::Locked`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockCause {
    /// Entry key pressed while already unlocked
    Toggle,
    /// PIN entry cancelled
    Cancelled,
    /// Submitted PIN did not match
    WrongPin,
    /// Idle timeout elapsed
    Timeout,
    /// Host lock gesture observed
    External,
}

impl core::fmt::Display for LockCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LockCause::Toggle => write!(f, "toggled off"),
            LockCause::Cancelled => write!(f, "PIN entry cancelled"),
            LockCause::WrongPin => write!(f, "PIN incorrect"),
            LockCause::Timeout => write!(f, "auto-lock timeout"),
            LockCause::External => write!(f, "host lock gesture"),
        }
    }
}

/// Conditions the engine absorbs silently
///
/// None of these cross the API boundary; they exist for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Secret requested for an empty slot, or while not unlocked.
    /// Both cases report this same variant.
    InvalidIndex,
    /// Digit arrived with the PIN buffer full
    BufferOverflow,
    /// Submitted PIN did not match
    WrongPin,
}

impl core::fmt::Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Rejection::InvalidIndex => write!(f, "secret unavailable"),
            Rejection::BufferOverflow => write!(f, "PIN buffer full"),
            Rejection::WrongPin => write!(f, "PIN incorrect"),
        }
    }
}
