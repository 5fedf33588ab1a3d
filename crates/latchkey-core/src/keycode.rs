//! Keycodes and key events
//!
//! Standard keys use USB HID usage IDs. Firmware-specific keys live above
//! [`Keycode::SAFE_RANGE`]: first the secret slots, then the PIN entry key.

use serde::{Deserialize, Serialize};

use crate::SECRET_SLOTS;

/// A 16-bit keycode as delivered by the input pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Keycode(pub u16);

impl Keycode {
    pub const L: Self = Self(0x0F);
    pub const N1: Self = Self(0x1E);
    pub const N9: Self = Self(0x26);
    pub const N0: Self = Self(0x27);
    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const KP_ENTER: Self = Self(0x58);
    pub const KP_1: Self = Self(0x59);
    pub const KP_9: Self = Self(0x61);
    pub const KP_0: Self = Self(0x62);
    pub const LEFT_CTRL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_GUI: Self = Self(0xE3);
    pub const RIGHT_CTRL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_GUI: Self = Self(0xE7);

    /// First keycode available for firmware-defined keys
    pub const SAFE_RANGE: Self = Self(0x7E00);

    /// First secret slot keycode
    pub const SECRET_START: Self = Self::SAFE_RANGE;

    /// One past the last secret slot keycode
    pub const SECRET_END: Self = Self(Self::SECRET_START.0 + SECRET_SLOTS as u16);

    /// Requests PIN entry (or locks, when already unlocked)
    pub const PIN_ENTRY: Self = Self::SECRET_END;

    /// Keycode for a secret slot, if the slot exists
    pub const fn secret(index: usize) -> Option<Self> {
        if index < SECRET_SLOTS {
            Some(Self(Self::SECRET_START.0 + index as u16))
        } else {
            None
        }
    }

    /// Secret slot index for keycodes in the secret range
    pub fn secret_index(self) -> Option<usize> {
        if self >= Self::SECRET_START && self < Self::SECRET_END {
            Some((self.0 - Self::SECRET_START.0) as usize)
        } else {
            None
        }
    }

    /// Normalize number row and keypad digits into one 0-9 space
    pub fn digit(self) -> Option<u8> {
        match self {
            Self::N0 | Self::KP_0 => Some(0),
            c if c >= Self::N1 && c <= Self::N9 => Some((c.0 - Self::N1.0) as u8 + 1),
            c if c >= Self::KP_1 && c <= Self::KP_9 => Some((c.0 - Self::KP_1.0) as u8 + 1),
            _ => None,
        }
    }

    /// Number row keycode for a digit 0-9
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::N0),
            1..=9 => Some(Self(Self::N1.0 + digit as u16 - 1)),
            _ => None,
        }
    }

    /// Keypad keycode for a digit 0-9
    pub fn keypad_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::KP_0),
            1..=9 => Some(Self(Self::KP_1.0 + digit as u16 - 1)),
            _ => None,
        }
    }

    pub fn is_submit(self) -> bool {
        self == Self::ENTER || self == Self::KP_ENTER
    }

    pub fn is_cancel(self) -> bool {
        self == Self::ESCAPE
    }

    pub fn is_gui(self) -> bool {
        self == Self::LEFT_GUI || self == Self::RIGHT_GUI
    }

    /// Modifier bit for modifier keycodes (`0xE0..=0xE7`)
    pub fn modifier_bit(self) -> Option<u8> {
        if self >= Self::LEFT_CTRL && self <= Self::RIGHT_GUI {
            Some(1 << (self.0 - Self::LEFT_CTRL.0))
        } else {
            None
        }
    }
}

impl core::fmt::Display for Keycode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// A single press or release from the input pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: Keycode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(code: Keycode) -> Self {
        Self {
            code,
            pressed: true,
        }
    }

    pub fn release(code: Keycode) -> Self {
        Self {
            code,
            pressed: false,
        }
    }
}

/// Snapshot of held modifiers, one bit per HID modifier key
///
/// The latch itself ignores modifiers; hosts use the snapshot to recognise
/// gestures such as GUI+L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Self = Self(0);

    /// Fold one event into the snapshot
    pub fn apply(&mut self, event: KeyEvent) {
        if let Some(bit) = event.code.modifier_bit() {
            if event.pressed {
                self.0 |= bit;
            } else {
                self.0 &= !bit;
            }
        }
    }

    pub fn gui(self) -> bool {
        let mask = Keycode::LEFT_GUI.modifier_bit().unwrap_or(0)
            | Keycode::RIGHT_GUI.modifier_bit().unwrap_or(0);
        self.0 & mask != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
