//! Host "lock workstation" gesture detection

use latchkey_core::{Clock, KeyEvent, Keycode, Latch, Modifiers};
use tracing::info;

/// Watches the event stream for GUI+L and relocks the latch when seen
///
/// The watcher only observes; it never consumes events. The L press still
/// flows on to the latch and the rest of the keymap.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockGestureWatcher {
    modifiers: Modifiers,
}

impl LockGestureWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Fold `event` into the modifier snapshot. Returns `true` when it
    /// completes the gesture.
    pub fn observe(&mut self, event: KeyEvent) -> bool {
        self.modifiers.apply(event);
        event.pressed && event.code == Keycode::L && self.modifiers.gui()
    }

    /// Observe `event` and trigger an external lock on the gesture
    pub fn watch<C: Clock, const CAP: usize>(
        &mut self,
        event: KeyEvent,
        latch: &mut Latch<'_, C, CAP>,
    ) -> bool {
        if !self.observe(event) {
            return false;
        }
        info!(state = %latch.state(), "Lock gesture detected");
        latch.external_lock();
        true
    }
}
