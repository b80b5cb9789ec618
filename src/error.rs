//! Error handling for pose-playback
//!
//! This module defines the fatal error type and a Result alias for use
//! throughout the crate. Per-record problems are not errors; they are
//! collected as [`Diagnostic`](crate::Diagnostic) values.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pose-playback operations
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The checkpoint log could not be opened
    #[error("Checkpoint log unreadable: {path:?}: {source}")]
    LogUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A time of interest went backwards under the strict ordering policy
    #[error(
        "Out-of-order time of interest at sample {position}: {offending_toi} follows {previous_toi}"
    )]
    OutOfOrder {
        previous_toi: u64,
        offending_toi: u64,
        position: usize,
    },

    /// Errors related to configuration loading/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Errors raised by the interactive viewer
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PlaybackError>,
    },
}

impl PlaybackError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PlaybackError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error means the log itself could not be read
    pub fn is_log_unreadable(&self) -> bool {
        match self {
            PlaybackError::LogUnreadable { .. } => true,
            PlaybackError::WithContext { source, .. } => source.is_log_unreadable(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for PlaybackError {
    fn from(err: serde_json::Error) -> Self {
        PlaybackError::Serialization(err.to_string())
    }
}

/// Result type alias for pose-playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlaybackError::Config("tick interval must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: tick interval must be positive"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = PlaybackError::Viewer("no display".to_string());
        let with_ctx = err.with_context("Failed to start viewer");
        assert!(with_ctx.to_string().contains("Failed to start viewer"));
    }

    #[test]
    fn test_out_of_order_display() {
        let err = PlaybackError::OutOfOrder {
            previous_toi: 7,
            offending_toi: 6,
            position: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("sample 2"));
        assert!(msg.contains("6 follows 7"));
    }

    #[test]
    fn test_log_unreadable_through_context() {
        let err = PlaybackError::LogUnreadable {
            path: PathBuf::from("/nope.jsonl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.is_log_unreadable());
        assert!(err.with_context("assembling").is_log_unreadable());
        assert!(!PlaybackError::Config("x".into()).is_log_unreadable());
    }

    #[test]
    fn test_result_ext_context() {
        let res: Result<()> = Err(PlaybackError::Config("bad".into()));
        let err = res.context("loading config").unwrap_err();
        assert_eq!(err.to_string(), "loading config: Configuration error: bad");
    }
}
