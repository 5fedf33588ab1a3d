//! Secret dispenser
//!
//! Secret-slot keys type the stored secret followed by Enter, but only while
//! unlocked. A locked latch and an empty slot look the same from outside:
//! the key is consumed and nothing is typed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::keycode::KeyEvent;
use crate::latch::Latch;
use crate::state::{Propagation, Rejection};

/// One simulated keystroke for the output pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keystroke {
    /// Type a single character
    Char(char),
    /// Tap Enter
    Submit,
}

/// Receiver for emitted keystrokes
///
/// Sending is infallible from the latch's point of view; once a dispense
/// starts, every keystroke is sent in order.
pub trait KeystrokeSink {
    fn send(&mut self, keystroke: Keystroke);
}

impl KeystrokeSink for Vec<Keystroke> {
    fn send(&mut self, keystroke: Keystroke) {
        self.push(keystroke);
    }
}

impl<S: KeystrokeSink + ?Sized> KeystrokeSink for &mut S {
    fn send(&mut self, keystroke: Keystroke) {
        (**self).send(keystroke);
    }
}

impl<C: Clock, const CAP: usize> Latch<'_, C, CAP> {
    /// Handle a key in the secret-slot range
    ///
    /// Any press or release in the range is consumed. Only a press while
    /// unlocked, on a populated slot, produces output. Releases are consumed
    /// even while unlocked, so the host never sees a release without its press.
    pub fn process_secret_key<S>(&mut self, event: KeyEvent, sink: &mut S) -> Propagation
    where
        S: KeystrokeSink + ?Sized,
    {
        let Some(index) = event.code.secret_index() else {
            return Propagation::PassThrough;
        };
        if event.pressed {
            self.dispense(index, sink);
        }
        Propagation::Handled
    }

    /// Type the secret in slot `index`, then Enter
    ///
    /// Always reports [`Propagation::Handled`].
    pub fn dispense<S>(&mut self, index: usize, sink: &mut S) -> Propagation
    where
        S: KeystrokeSink + ?Sized,
    {
        let secret = if self.state.is_unlocked() {
            self.registry.lookup(index)
        } else {
            None
        };

        match secret {
            Some(secret) => {
                debug!(slot = index, "Dispensing secret");
                for c in secret.chars() {
                    sink.send(Keystroke::Char(c));
                }
                sink.send(Keystroke::Submit);
            }
            None => debug!(reason = %Rejection::InvalidIndex, "Secret request consumed"),
        }

        Propagation::Handled
    }
}
