//! End-to-end scenarios for the latchkey simulator
//!
//! Each test loads a profile, replays an event script through the runner and
//! checks the resulting lock state and typed output.

use latchkey_cli::{Profile, ProfileError, RunError, Runner, ScriptError};
use latchkey_core::{LatchError, LockState, SecretRegistry};

const PROFILE: &str = r#"
pin = "1234"
lock_timeout_ms = 300000
secrets = ["hunter2", "correct horse battery staple"]
"#;

/// Final state of one scripted session
#[derive(Debug)]
struct Outcome {
    state: LockState,
    indicator: u8,
    pin_len: usize,
    output: String,
}

fn run_with(profile: &Profile, script: &str, json: bool) -> Result<Outcome, RunError> {
    let secrets = profile.secret_refs();
    let registry = SecretRegistry::try_new(&secrets).unwrap();
    let mut runner = Runner::new(profile.latch_config(), registry, Vec::new())
        .unwrap()
        .with_json(json);
    runner.run_script(script)?;

    let latch = runner.latch();
    let (state, indicator, pin_len) = (latch.state(), latch.indicator().as_u8(), latch.pin_len());
    let output = String::from_utf8(runner.into_output()).unwrap();
    Ok(Outcome {
        state,
        indicator,
        pin_len,
        output,
    })
}

fn run(script: &str) -> Outcome {
    let profile = Profile::from_toml_str(PROFILE).unwrap();
    run_with(&profile, script, false).unwrap()
}

// ==========================================
// PIN entry scenarios
// ==========================================

#[test]
fn test_correct_pin_unlocks() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\n");
    assert_eq!(outcome.state, LockState::Unlocked);
    assert_eq!(outcome.indicator, 2);
    assert_eq!(outcome.pin_len, 0);
}

#[test]
fn test_wrong_pin_relocks() {
    let outcome = run("tap pin-entry\ntype 9999\ntap enter\n");
    assert_eq!(outcome.state, LockState::Locked);
    assert_eq!(outcome.indicator, 0);
    assert_eq!(outcome.pin_len, 0);
}

#[test]
fn test_cancel_relocks() {
    let outcome = run("tap pin-entry\ntype 12\ntap esc\n");
    assert_eq!(outcome.state, LockState::Locked);
    assert_eq!(outcome.pin_len, 0);
}

#[test]
fn test_idle_timeout_relocks() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\nwait 300001\n");
    assert_eq!(outcome.state, LockState::Locked);
    assert_eq!(outcome.indicator, 0);
}

#[test]
fn test_prefix_and_extension_rejected() {
    assert_eq!(run("tap pin-entry\ntype 123\ntap enter\n").state, LockState::Locked);
    assert_eq!(run("tap pin-entry\ntype 12345\ntap enter\n").state, LockState::Locked);
}

#[test]
fn test_entry_key_toggles_lock() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\ntap pin-entry\ntap secret0\n");
    assert_eq!(outcome.state, LockState::Locked);
    assert_eq!(outcome.output, "");
}

#[test]
fn test_overflow_digits_dropped() {
    let digits = "7".repeat(40);
    let outcome = run(&format!("tap pin-entry\ntype {}\nstatus\n", digits));
    assert_eq!(outcome.state, LockState::PinEntry);
    assert_eq!(outcome.pin_len, 31);
}

// ==========================================
// Dispensing
// ==========================================

#[test]
fn test_dispense_after_unlock() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\ntap secret1\ntap secret0\n");
    assert_eq!(outcome.output, "correct horse battery staple\nhunter2\n");
}

#[test]
fn test_locked_and_empty_slots_are_silent() {
    let locked = run("tap secret0\n");
    let empty = run("tap pin-entry\ntype 1234\ntap enter\ntap secret4\n");
    assert_eq!(locked.output, "");
    assert_eq!(empty.output, "");
    assert_eq!(empty.state, LockState::Unlocked);
}

#[test]
fn test_pin_digits_are_not_typed() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\n");
    assert_eq!(outcome.output, "");
}

// ==========================================
// External lock
// ==========================================

#[test]
fn test_lock_gesture_relocks() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\nlock-gesture\ntap secret0\n");
    assert_eq!(outcome.state, LockState::Locked);
    assert_eq!(outcome.output, "");
}

#[test]
fn test_lock_gesture_keeps_partial_buffer_until_next_prompt() {
    let outcome = run("tap pin-entry\ntype 12\nlock-gesture\n");
    assert_eq!(outcome.state, LockState::Locked);
    assert_eq!(outcome.pin_len, 2);

    let outcome = run("tap pin-entry\ntype 12\nlock-gesture\ntap pin-entry\ntype 1234\ntap enter\n");
    assert_eq!(outcome.state, LockState::Unlocked);
}

#[test]
fn test_manual_gesture_with_right_gui() {
    let outcome = run("tap pin-entry\ntype 1234\ntap enter\npress rgui\ntap l\nrelease rgui\n");
    assert_eq!(outcome.state, LockState::Locked);
}

// ==========================================
// Status output
// ==========================================

#[test]
fn test_json_status_lines() {
    let profile = Profile::from_toml_str(PROFILE).unwrap();
    let outcome = run_with(
        &profile,
        "status\ntap pin-entry\ntype 1234\ntap enter\nwait 500\nstatus\n",
        true,
    )
    .unwrap();

    let lines: Vec<serde_json::Value> = outcome
        .output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["state"], "locked");
    assert_eq!(lines[1]["state"], "unlocked");
    assert_eq!(lines[1]["indicator"], 2);
    assert_eq!(lines[1]["remaining_ms"], 299_500);
    assert_eq!(lines[1]["hsv"]["h"], 85);
}

#[test]
fn test_script_error_reports_line() {
    let profile = Profile::from_toml_str(PROFILE).unwrap();
    let err = run_with(&profile, "tap pin-entry\n# note\ntap nowhere\n", false).unwrap_err();
    match err {
        RunError::Script(ScriptError::UnknownKey { line, key }) => {
            assert_eq!(line, 3);
            assert_eq!(key, "nowhere");
        }
        other => panic!("unexpected error: {}", other),
    }
}

// ==========================================
// Profiles
// ==========================================

#[test]
fn test_profile_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latchkey.toml");
    std::fs::write(&path, "pin = \"0042\"\nlock_timeout_ms = 10\nsecrets = [\"s\"]\n").unwrap();

    let profile = Profile::load(&path).unwrap();
    let outcome = run_with(
        &profile,
        "tap pin-entry\ntype 0042\ntap enter\ntap secret0\nwait 10\n",
        false,
    )
    .unwrap();
    assert_eq!(outcome.output, "s\n");
    assert_eq!(outcome.state, LockState::Locked);
}

#[test]
fn test_profile_resolve_prefers_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explicit.toml");
    std::fs::write(&path, "pin = \"5\"\n").unwrap();

    let profile = Profile::resolve(Some(path)).unwrap();
    assert!(profile.secret_refs().is_empty());
    assert_eq!(profile.summary().pin_digits, 1);
}

#[test]
fn test_invalid_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "pin = \"12x4\"\n").unwrap();

    assert!(matches!(
        Profile::load(&path),
        Err(ProfileError::Latch(LatchError::NonDigitPin))
    ));
}

#[test]
fn test_demo_profile_session() {
    let outcome = run_with(
        &Profile::demo(),
        "tap pin-entry\ntype 1234\ntap enter\ntap secret0\n",
        false,
    )
    .unwrap();
    assert_eq!(outcome.output, "hunter2\n");
}
