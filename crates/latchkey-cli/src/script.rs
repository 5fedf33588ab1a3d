//! Event script parsing
//!
//! One command per line; blank lines and `#` comments are ignored.
//!
//! ```text
//! tap pin-entry
//! type 1234
//! tap enter
//! press secret0
//! wait 300001
//! status
//! ```

use latchkey_core::Keycode;

use crate::error::ScriptError;

/// A single script step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Press(Keycode),
    Release(Keycode),
    /// Press then release
    Tap(Keycode),
    /// Tap each number row digit in order
    Type(Vec<u8>),
    /// Advance the clock, then run one monitor tick
    ///
    /// The clock jumps in one step, so a timeout that falls inside the wait
    /// is only observed at its end.
    Wait(u32),
    /// GUI+L, as the host's "lock workstation" shortcut
    LockGesture,
    Status,
}

/// Resolve a key name to a keycode
///
/// Accepts `0`-`9`, `kp0`-`kp9`, `enter`, `kp-enter`, `esc`, `pin-entry`,
/// `secret<N>`, `lgui`, `rgui`, `l` and raw `0x` hex codes.
pub fn parse_key(name: &str) -> Option<Keycode> {
    let name = name.to_ascii_lowercase();
    let key = match name.as_str() {
        "enter" => Keycode::ENTER,
        "kp-enter" => Keycode::KP_ENTER,
        "esc" | "escape" => Keycode::ESCAPE,
        "pin-entry" => Keycode::PIN_ENTRY,
        "lgui" => Keycode::LEFT_GUI,
        "rgui" => Keycode::RIGHT_GUI,
        "l" => Keycode::L,
        other => {
            if let Some(hex) = other.strip_prefix("0x") {
                return u16::from_str_radix(hex, 16).ok().map(Keycode);
            }
            if let Some(index) = other.strip_prefix("secret") {
                return index.parse().ok().and_then(Keycode::secret);
            }
            if let Some(digit) = other.strip_prefix("kp") {
                return single_digit(digit).and_then(Keycode::keypad_digit);
            }
            return single_digit(other).and_then(Keycode::from_digit);
        }
    };
    Some(key)
}

fn single_digit(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii_digit() => Some(b - b'0'),
        _ => None,
    }
}

/// Parse one script line. `line` is 1-based and only used for errors.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = match text.find('#') {
        Some(pos) => &text[..pos],
        None => text,
    };
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(ScriptError::UnexpectedArgument {
            line,
            arg: extra.to_string(),
        });
    }

    let require = || {
        arg.ok_or_else(|| ScriptError::MissingArgument {
            line,
            command: command.to_string(),
        })
    };
    let key = || {
        let name = require()?;
        parse_key(name).ok_or_else(|| ScriptError::UnknownKey {
            line,
            key: name.to_string(),
        })
    };

    let parsed = match command {
        "press" => Command::Press(key()?),
        "release" => Command::Release(key()?),
        "tap" => Command::Tap(key()?),
        "type" => {
            let value = require()?;
            let digits: Option<Vec<u8>> = value
                .chars()
                .map(|c| c.to_digit(10).map(|d| d as u8))
                .collect();
            Command::Type(digits.ok_or_else(|| ScriptError::InvalidDigits {
                line,
                value: value.to_string(),
            })?)
        }
        "wait" => {
            let value = require()?;
            Command::Wait(value.parse().map_err(|_| ScriptError::InvalidDuration {
                line,
                value: value.to_string(),
            })?)
        }
        "lock-gesture" | "status" => {
            if let Some(arg) = arg {
                return Err(ScriptError::UnexpectedArgument {
                    line,
                    arg: arg.to_string(),
                });
            }
            if command == "status" {
                Command::Status
            } else {
                Command::LockGesture
            }
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };
    Ok(Some(parsed))
}

/// Parse a whole script, stopping at the first bad line
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, text) in source.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, text)? {
            commands.push(command);
        }
    }
    Ok(commands)
}
