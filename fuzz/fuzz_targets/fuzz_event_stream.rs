#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use latchkey_core::{
    KeyEvent, Keycode, Keystroke, Latch, LatchConfig, LockState, ManualClock, SecretRegistry,
    PIN_BUFFER_CAPACITY,
};

const SECRETS: SecretRegistry<'static> = SecretRegistry::new(&["fuzz", "secret"]);

#[derive(Debug, Arbitrary)]
enum Step {
    Key { code: u16, pressed: bool },
    /// Keycode in or just past the secret range
    Near { offset: u8, pressed: bool },
    Digit { digit: u8, keypad: bool },
    Wait(u32),
    ExternalLock,
}

#[derive(Debug, Arbitrary)]
struct Input {
    start: u32,
    timeout: u32,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let clock = ManualClock::starting_at(input.start);
    let config = LatchConfig::new("1234").with_lock_timeout_ms(input.timeout);
    let Ok(mut latch) = Latch::<'static, ManualClock>::new(config, SECRETS, clock.clone()) else {
        return;
    };

    for step in input.steps {
        let before = latch.state();
        let mut sink: Vec<Keystroke> = Vec::new();

        match step {
            Step::Key { code, pressed } => {
                latch.process(KeyEvent { code: Keycode(code), pressed }, &mut sink);
            }
            Step::Near { offset, pressed } => {
                let code = Keycode(Keycode::SAFE_RANGE.0.wrapping_add(u16::from(offset % 16)));
                latch.process(KeyEvent { code, pressed }, &mut sink);
            }
            Step::Digit { digit, keypad } => {
                let digit = digit % 10;
                let code = if keypad {
                    Keycode::keypad_digit(digit)
                } else {
                    Keycode::from_digit(digit)
                };
                if let Some(code) = code {
                    latch.process(KeyEvent::press(code), &mut sink);
                }
            }
            Step::Wait(ms) => {
                clock.advance(ms);
                latch.tick();
            }
            Step::ExternalLock => latch.external_lock(),
        }

        // Buffer stays bounded
        assert!(latch.pin_len() < PIN_BUFFER_CAPACITY);

        // Nothing is typed unless the latch was unlocked
        if !sink.is_empty() {
            assert_eq!(before, LockState::Unlocked);
            assert_eq!(sink.last(), Some(&Keystroke::Submit));
        }

        // Indicator tracks state
        assert_eq!(
            latch.indicator().as_u8(),
            match latch.state() {
                LockState::Locked => 0,
                LockState::PinEntry => 1,
                LockState::Unlocked => 2,
            }
        );
    }
});
