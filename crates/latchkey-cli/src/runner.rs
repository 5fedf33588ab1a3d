//! Script runner: the simulated scan loop
//!
//! Each command becomes one or more key events fed through the lock gesture
//! watcher and then the latch. Dispensed keystrokes are written to the
//! output as plain text, one line per secret.

use std::io::{self, Write};

use latchkey_core::{
    Clock, Hsv, KeyEvent, Keycode, Keystroke, KeystrokeSink, Latch, LatchConfig, LatchError,
    LockState, ManualClock, Propagation, SecretRegistry,
};
use serde::Serialize;
use tracing::{info, trace};

use crate::error::RunError;
use crate::gesture::LockGestureWatcher;
use crate::script::{parse_script, Command};

/// Keystroke sink over any writer
///
/// The latch cannot handle sink failures, so the first write error is kept
/// and later keystrokes are dropped. Check it with [`WriterSink::finish`].
pub struct WriterSink<'w, W: Write> {
    out: &'w mut W,
    error: Option<io::Error>,
}

impl<'w, W: Write> WriterSink<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self { out, error: None }
    }

    /// Surface the first write error, if any
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> KeystrokeSink for WriterSink<'_, W> {
    fn send(&mut self, keystroke: Keystroke) {
        if self.error.is_some() {
            return;
        }
        let result = match keystroke {
            Keystroke::Char(c) => write!(self.out, "{}", c),
            Keystroke::Submit => writeln!(self.out),
        };
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

/// Snapshot printed by the `status` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub tick_ms: u32,
    pub state: LockState,
    pub indicator: u8,
    pub hsv: Hsv,
    /// Time left before auto-lock; only present while unlocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ms: Option<u32>,
}

impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} ms] {} (indicator {})",
            self.tick_ms, self.state, self.indicator
        )?;
        if let Some(remaining) = self.remaining_ms {
            write!(f, ", auto-lock in {} ms", remaining)?;
        }
        Ok(())
    }
}

/// Drives a latch from script commands against a manual clock
pub struct Runner<'a, W: Write> {
    latch: Latch<'a, ManualClock>,
    clock: ManualClock,
    watcher: LockGestureWatcher,
    out: W,
    json: bool,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(
        config: LatchConfig,
        registry: SecretRegistry<'a>,
        out: W,
    ) -> Result<Self, LatchError> {
        let clock = ManualClock::new();
        let latch = Latch::new(config, registry, clock.clone())?;
        Ok(Self {
            latch,
            clock,
            watcher: LockGestureWatcher::new(),
            out,
            json: false,
        })
    }

    /// Print `status` as JSON lines instead of text
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn latch(&self) -> &Latch<'a, ManualClock> {
        &self.latch
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn status(&self) -> StatusReport {
        let indicator = self.latch.indicator();
        StatusReport {
            tick_ms: self.clock.now_ms(),
            state: self.latch.state(),
            indicator: indicator.as_u8(),
            hsv: indicator.hsv(),
            remaining_ms: self.latch.remaining_ms(),
        }
    }

    /// Feed one event through the gesture watcher and the latch
    pub fn key_event(&mut self, event: KeyEvent) -> io::Result<Propagation> {
        self.watcher.watch(event, &mut self.latch);

        let mut sink = WriterSink::new(&mut self.out);
        let result = self.latch.process(event, &mut sink);
        sink.finish()?;

        if !result.is_handled() {
            trace!(code = %event.code, pressed = event.pressed, "Key passed through");
        }
        Ok(result)
    }

    fn tap(&mut self, code: Keycode) -> io::Result<()> {
        self.key_event(KeyEvent::press(code))?;
        self.key_event(KeyEvent::release(code))?;
        Ok(())
    }

    pub fn run_command(&mut self, command: &Command) -> io::Result<()> {
        let before = self.latch.state();
        match command {
            Command::Press(code) => {
                self.key_event(KeyEvent::press(*code))?;
            }
            Command::Release(code) => {
                self.key_event(KeyEvent::release(*code))?;
            }
            Command::Tap(code) => self.tap(*code)?,
            Command::Type(digits) => {
                for code in digits.iter().filter_map(|&d| Keycode::from_digit(d)) {
                    self.tap(code)?;
                }
            }
            Command::Wait(ms) => {
                self.clock.advance(*ms);
                self.latch.tick();
            }
            Command::LockGesture => {
                self.key_event(KeyEvent::press(Keycode::LEFT_GUI))?;
                self.tap(Keycode::L)?;
                self.key_event(KeyEvent::release(Keycode::LEFT_GUI))?;
            }
            Command::Status => {
                let report = self.status();
                if self.json {
                    let line = serde_json::to_string(&report).map_err(io::Error::other)?;
                    writeln!(self.out, "{}", line)?;
                } else {
                    writeln!(self.out, "{}", report)?;
                }
            }
        }

        let after = self.latch.state();
        if before != after {
            info!(from = %before, to = %after, "Lock state changed");
        }
        Ok(())
    }

    /// Parse `source` in full, then run it. Nothing runs if any line is bad.
    pub fn run_script(&mut self, source: &str) -> Result<(), RunError> {
        let commands = parse_script(source)?;
        for command in &commands {
            self.run_command(command)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRETS: SecretRegistry<'static> = SecretRegistry::new(&["hunter2", "pa ss"]);

    fn runner() -> Runner<'static, Vec<u8>> {
        Runner::new(LatchConfig::new("1234"), SECRETS, Vec::new()).unwrap()
    }

    fn output(runner: Runner<'static, Vec<u8>>) -> String {
        String::from_utf8(runner.into_output()).unwrap()
    }

    #[test]
    fn test_unlock_and_dispense() {
        let mut runner = runner();
        runner
            .run_script("tap pin-entry\ntype 1234\ntap enter\ntap secret0\ntap secret1\n")
            .unwrap();
        assert_eq!(runner.latch().state(), LockState::Unlocked);
        assert_eq!(output(runner), "hunter2\npa ss\n");
    }

    #[test]
    fn test_locked_dispense_prints_nothing() {
        let mut runner = runner();
        runner.run_script("tap secret0\ntap secret5\n").unwrap();
        assert_eq!(output(runner), "");
    }

    #[test]
    fn test_keypad_entry() {
        let mut runner = runner();
        runner
            .run_script("tap pin-entry\ntap kp1\ntap kp2\ntap kp3\ntap kp4\ntap kp-enter\n")
            .unwrap();
        assert!(runner.latch().is_unlocked());
    }

    #[test]
    fn test_wait_runs_monitor() {
        let mut runner = runner();
        runner
            .run_script("tap pin-entry\ntype 1234\ntap enter\nwait 299999\n")
            .unwrap();
        assert!(runner.latch().is_unlocked());
        assert_eq!(runner.status().remaining_ms, Some(1));
        runner.run_command(&Command::Wait(1)).unwrap();
        assert_eq!(runner.latch().state(), LockState::Locked);
    }

    #[test]
    fn test_long_wait_locks_once_at_end() {
        let mut runner = runner();
        runner
            .run_script("tap pin-entry\ntype 1234\ntap enter\nwait 900000\nstatus\n")
            .unwrap();
        assert_eq!(runner.latch().state(), LockState::Locked);
        assert_eq!(runner.clock().now_ms(), 900_000);
        assert_eq!(output(runner), "[900000 ms] locked (indicator 0)\n");
    }

    #[test]
    fn test_lock_gesture() {
        let mut runner = runner();
        runner
            .run_script("tap pin-entry\ntype 1234\ntap enter\nlock-gesture\ntap secret0\n")
            .unwrap();
        assert_eq!(runner.latch().state(), LockState::Locked);
        assert_eq!(output(runner), "");
    }

    #[test]
    fn test_status_text() {
        let mut runner = runner();
        runner
            .run_script("status\ntap pin-entry\nstatus\ntype 1234\ntap enter\nwait 1000\nstatus\n")
            .unwrap();
        assert_eq!(
            output(runner),
            "[0 ms] locked (indicator 0)\n\
             [0 ms] pin-entry (indicator 1)\n\
             [1000 ms] unlocked (indicator 2), auto-lock in 299000 ms\n"
        );
    }

    #[test]
    fn test_status_json() {
        let mut runner = runner().with_json(true);
        runner.run_script("status\n").unwrap();
        let text = output(runner);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["state"], "locked");
        assert_eq!(value["indicator"], 0);
        assert_eq!(value["hsv"]["h"], 0);
        assert!(value.get("remaining_ms").is_none());
    }

    #[test]
    fn test_bad_script_runs_nothing() {
        let mut runner = runner();
        let err = runner
            .run_script("tap pin-entry\ntype 1234\ntap enter\nexplode\n")
            .unwrap_err();
        assert!(matches!(err, RunError::Script(_)));
        assert_eq!(runner.latch().state(), LockState::Locked);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_keeps_first_error() {
        let mut out = FailingWriter;
        let mut sink = WriterSink::new(&mut out);
        sink.send(Keystroke::Char('a'));
        sink.send(Keystroke::Submit);
        assert_eq!(sink.finish().unwrap_err().to_string(), "closed");
    }

    #[test]
    fn test_output_error_surfaces() {
        let mut runner = Runner::new(LatchConfig::new("1"), SECRETS, FailingWriter).unwrap();
        runner.run_script("tap pin-entry\ntype 1\ntap enter\n").unwrap();
        let err = runner.run_script("tap secret0\n").unwrap_err();
        assert!(matches!(err, RunError::Io(_)));
    }
}
