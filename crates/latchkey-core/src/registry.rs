//! Secret registry
//!
//! An immutable, ordered table of secrets indexed by slot. Slot `i` is
//! selected by keycode `Keycode::SECRET_START + i`; both the table bound and
//! the keycode range derive from [`SECRET_SLOTS`].

use crate::error::{LatchError, Result};
use crate::SECRET_SLOTS;

/// Fixed table of secrets, built once and never modified
#[derive(Clone, Copy)]
pub struct SecretRegistry<'a> {
    entries: &'a [&'a str],
}

impl<'a> SecretRegistry<'a> {
    /// Registry with no secrets
    pub const EMPTY: SecretRegistry<'static> = SecretRegistry { entries: &[] };

    /// Build a registry at compile time
    ///
    /// Panics (a compile error when evaluated in a `const`) if more entries
    /// are given than there are secret keycodes.
    pub const fn new(entries: &'a [&'a str]) -> Self {
        assert!(
            entries.len() <= SECRET_SLOTS,
            "more secrets than SECRET_SLOTS keycodes"
        );
        Self { entries }
    }

    /// Build a registry from entries loaded at startup
    pub fn try_new(entries: &'a [&'a str]) -> Result<Self> {
        if entries.len() > SECRET_SLOTS {
            return Err(LatchError::TooManySecrets {
                count: entries.len(),
                max: SECRET_SLOTS,
            });
        }
        Ok(Self { entries })
    }

    /// Look up a secret by slot index
    pub fn lookup(&self, index: usize) -> Option<&'a str> {
        self.entries.get(index).copied()
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl core::fmt::Debug for SecretRegistry<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretRegistry")
            .field("slots", &self.entries.len())
            .finish_non_exhaustive()
    }
}
