//! Latchkey host simulator
//!
//! Drives a [`latchkey_core::Latch`] from a line-oriented event script with
//! a simulated clock, standing in for the keyboard scan loop.

pub mod error;
pub mod gesture;
pub mod profile;
pub mod runner;
pub mod script;

pub use error::{ProfileError, RunError, ScriptError};
pub use gesture::LockGestureWatcher;
pub use profile::{Profile, ProfileSummary};
pub use runner::{Runner, StatusReport, WriterSink};
pub use script::{parse_key, parse_line, parse_script, Command};

/// Environment variable naming the profile when `--profile` is absent
pub const PROFILE_ENV: &str = "LATCHKEY_PROFILE";
