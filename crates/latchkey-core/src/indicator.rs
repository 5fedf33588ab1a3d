//! Indicator adapter
//!
//! Maps the lock state to a small status code for an external LED or display
//! renderer. Pure query; never mutates the latch.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::latch::Latch;
use crate::state::LockState;

/// Status code exposed to indicator renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IndicatorCode {
    Locked = 0,
    PinEntry = 1,
    Unlocked = 2,
}

/// Hue/saturation/value colour hint, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl IndicatorCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Suggested colour: red locked, yellow awaiting PIN, green unlocked
    pub fn hsv(self) -> Hsv {
        let h = match self {
            IndicatorCode::Locked => 0,
            IndicatorCode::PinEntry => 43,
            IndicatorCode::Unlocked => 85,
        };
        Hsv { h, s: 255, v: 255 }
    }
}

impl From<LockState> for IndicatorCode {
    fn from(state: LockState) -> Self {
        match state {
            LockState::Locked => IndicatorCode::Locked,
            LockState::PinEntry => IndicatorCode::PinEntry,
            LockState::Unlocked => IndicatorCode::Unlocked,
        }
    }
}

impl From<IndicatorCode> for u8 {
    fn from(code: IndicatorCode) -> Self {
        code.as_u8()
    }
}

impl<C: Clock, const CAP: usize> Latch<'_, C, CAP> {
    /// Current indicator code
    pub fn indicator(&self) -> IndicatorCode {
        IndicatorCode::from(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LockState::Locked, 0, 0)]
    #[case(LockState::PinEntry, 1, 43)]
    #[case(LockState::Unlocked, 2, 85)]
    fn test_state_mapping(#[case] state: LockState, #[case] code: u8, #[case] hue: u8) {
        let indicator = IndicatorCode::from(state);
        assert_eq!(indicator.as_u8(), code);
        assert_eq!(u8::from(indicator), code);
        assert_eq!(indicator.hsv(), Hsv { h: hue, s: 255, v: 255 });
    }

    #[test]
    fn test_latch_indicator_follows_state() {
        use crate::clock::ManualClock;
        use crate::config::LatchConfig;
        use crate::registry::SecretRegistry;

        let mut latch: Latch<'static, ManualClock> =
            Latch::new(LatchConfig::new("5"), SecretRegistry::EMPTY, ManualClock::new()).unwrap();
        assert_eq!(latch.indicator(), IndicatorCode::Locked);
        latch.request_entry();
        assert_eq!(latch.indicator(), IndicatorCode::PinEntry);
        latch.push_digit(5);
        latch.submit_pin();
        assert_eq!(latch.indicator(), IndicatorCode::Unlocked);
    }
}
