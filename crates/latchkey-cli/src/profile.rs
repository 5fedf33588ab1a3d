//! Simulator profile: PIN, timeout and secrets loaded from TOML
//!
//! ```toml
//! pin = "1234"
//! lock_timeout_ms = 300000
//! secrets = ["hunter2", "correct horse battery staple"]
//! ```

use std::path::{Path, PathBuf};

use latchkey_core::{LatchConfig, PinBuffer, SecretRegistry, LOCK_TIMEOUT_MS, PIN_BUFFER_CAPACITY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::error::ProfileError;
use crate::PROFILE_ENV;

/// On-disk shape, converted straight into [`Profile`]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    pin: String,
    #[serde(default = "default_lock_timeout_ms")]
    lock_timeout_ms: u32,
    #[serde(default)]
    secrets: Vec<String>,
}

fn default_lock_timeout_ms() -> u32 {
    LOCK_TIMEOUT_MS
}

/// Validated profile, immutable after load
#[derive(Clone)]
pub struct Profile {
    pin: Zeroizing<String>,
    lock_timeout_ms: u32,
    secrets: Vec<Zeroizing<String>>,
}

/// Redacted view of a profile for printing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub pin_digits: usize,
    pub lock_timeout_ms: u32,
    /// Character count per slot
    pub secret_lengths: Vec<usize>,
}

impl Profile {
    /// Profile used when none is configured
    pub fn demo() -> Self {
        Self {
            pin: Zeroizing::new("1234".to_string()),
            lock_timeout_ms: LOCK_TIMEOUT_MS,
            secrets: vec![
                Zeroizing::new("hunter2".to_string()),
                Zeroizing::new("correct horse battery staple".to_string()),
            ],
        }
    }

    /// Parse and validate a TOML profile
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let raw: RawProfile = toml::from_str(content)?;
        let profile = Self {
            pin: Zeroizing::new(raw.pin),
            lock_timeout_ms: raw.lock_timeout_ms,
            secrets: raw.secrets.into_iter().map(Zeroizing::new).collect(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from disk
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            ProfileError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?);
        let profile = Self::from_toml_str(&content)?;
        debug!(path = ?path, secrets = profile.secrets.len(), "Loaded profile");
        Ok(profile)
    }

    /// Pick the profile path: explicit argument first, then `LATCHKEY_PROFILE`
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var_os(PROFILE_ENV).map(PathBuf::from))
    }

    /// Load the located profile, or fall back to [`Profile::demo`]
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, ProfileError> {
        match Self::locate(explicit) {
            Some(path) => Self::load(&path),
            None => {
                info!("No profile configured, using the demo profile");
                Ok(Self::demo())
            }
        }
    }

    /// Run the same checks the engine applies at construction
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.latch_config()
            .validate(PinBuffer::<PIN_BUFFER_CAPACITY>::max_digits())?;
        let refs = self.secret_refs();
        SecretRegistry::try_new(&refs)?;
        Ok(())
    }

    pub fn latch_config(&self) -> LatchConfig {
        LatchConfig::new(self.pin.as_str()).with_lock_timeout_ms(self.lock_timeout_ms)
    }

    /// Borrowed secrets, in slot order, for building a [`SecretRegistry`]
    pub fn secret_refs(&self) -> Vec<&str> {
        self.secrets.iter().map(|s| s.as_str()).collect()
    }

    pub fn lock_timeout_ms(&self) -> u32 {
        self.lock_timeout_ms
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            pin_digits: self.pin.len(),
            lock_timeout_ms: self.lock_timeout_ms,
            secret_lengths: self.secrets.iter().map(|s| s.chars().count()).collect(),
        }
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("pin", &"<redacted>")
            .field("lock_timeout_ms", &self.lock_timeout_ms)
            .field("secrets", &self.secrets.len())
            .finish()
    }
}

impl std::fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PIN:          {} digits", self.pin_digits)?;
        writeln!(f, "Auto-lock:    {} ms", self.lock_timeout_ms)?;
        write!(f, "Secrets:      {}", self.secret_lengths.len())?;
        for (slot, len) in self.secret_lengths.iter().enumerate() {
            write!(f, "\n  secret{}:    <redacted, {} chars>", slot, len)?;
        }
        Ok(())
    }
}
