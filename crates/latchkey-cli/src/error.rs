//! Error types for the host simulator

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Profile file could not be read
    #[error("Failed to read profile {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile is not valid TOML or has the wrong shape
    #[error("Invalid profile: {0}")]
    Parse(#[from] toml::de::Error),

    /// Profile parsed but was rejected by the engine
    #[error("Invalid profile: {0}")]
    Latch(#[from] latchkey_core::LatchError),
}

/// Errors raised while parsing an event script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects an argument")]
    MissingArgument { line: usize, command: String },

    #[error("line {line}: unexpected argument '{arg}'")]
    UnexpectedArgument { line: usize, arg: String },

    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: '{value}' is not a valid duration in milliseconds")]
    InvalidDuration { line: usize, value: String },

    #[error("line {line}: '{value}' is not a digit sequence")]
    InvalidDigits { line: usize, value: String },
}

/// Errors raised while running a script
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Writing simulator output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
