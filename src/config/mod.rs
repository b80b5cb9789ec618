//! Configuration module for pose-playback
//!
//! Startup configuration is small: where the checkpoint log is, which keys
//! make up the tracked entity's pose stream, and how fast to play it.
//!
//! # Resolution Order
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, or the platform default below if present)
//! 3. Command-line flags
//!
//! # Default Location
//!
//! - **Linux**: `~/.config/dev.pose-playback/playback.toml`
//! - **macOS**: `~/Library/Application Support/dev.pose-playback/playback.toml`
//! - **Windows**: `%APPDATA%\dev.pose-playback\playback.toml`
//!
//! # Example
//!
//! ```toml
//! log_path = "/data/agent.0/run.jsonl"
//! key_prefix = ".gams.frames.p1_base_footprint"
//! key_suffixes = [".origin", ".parent"]
//! tick_interval_ms = 10
//! ordering = "advisory"
//! ```
//!
//! Playback state itself is never persisted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PlaybackError, Result};
use crate::pipeline::{KeyFilter, OrderingPolicy};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.pose-playback";

/// Config filename inside the app config directory
pub const CONFIG_FILE: &str = "playback.toml";

/// Default key prefix of the tracked entity
pub const DEFAULT_KEY_PREFIX: &str = ".gams.frames.p1_base_footprint";

/// Default key suffixes of pose records
pub const DEFAULT_KEY_SUFFIXES: [&str; 2] = [".origin", ".parent"];

/// Default playback tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10;

// ==================== Config Directory ====================

/// Get the application config directory path
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    app_config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Playback Config ====================

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Checkpoint log to read
    pub log_path: Option<PathBuf>,

    /// Substring every pose key must contain
    pub key_prefix: String,

    /// Pose keys must contain at least one of these
    pub key_suffixes: Vec<String>,

    /// Wall-clock interval between playback ticks
    pub tick_interval_ms: u64,

    /// Reaction to a decreasing time of interest
    pub ordering: OrderingPolicy,

    /// Treat a non-empty diagnostics list as failure
    pub fail_on_diagnostics: bool,

    /// Headless playback returns after the last frame
    pub exit_when_exhausted: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            key_suffixes: DEFAULT_KEY_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            ordering: OrderingPolicy::Advisory,
            fail_on_diagnostics: false,
            exit_when_exhausted: true,
        }
    }
}

impl PlaybackConfig {
    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlaybackError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml(&content).map_err(|e| e.with_context(format!("{:?}", path)))
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PlaybackError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Resolve the config to start from.
    ///
    /// An explicit path must load. Without one, the platform default is
    /// used when it exists, otherwise built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PlaybackError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Check values that would make playback meaningless
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.key_suffixes.is_empty() {
            return Err(PlaybackError::Config(
                "key_suffixes must name at least one suffix".to_string(),
            ));
        }
        if self.key_prefix.is_empty() {
            tracing::warn!("Empty key_prefix matches every key");
        }
        Ok(())
    }

    /// The checkpoint log path, or a config error if none was given
    pub fn require_log_path(&self) -> Result<&Path> {
        self.log_path.as_deref().ok_or_else(|| {
            PlaybackError::Config("no checkpoint log path configured".to_string())
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn key_filter(&self) -> KeyFilter {
        KeyFilter::new(self.key_prefix.clone(), self.key_suffixes.iter().cloned())
    }
}
