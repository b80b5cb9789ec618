//! Recoverable per-record conditions collected during assembly
//!
//! Nothing in here aborts processing. The reader and the assembly
//! pipeline push a [`Diagnostic`] and move on to the next record; the
//! caller receives the ordered list next to the assembled series and
//! decides whether a non-empty list counts as failure.

use crate::types::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A time of interest that went backwards relative to the previous sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfOrderWarning {
    /// TOI of the sample already in the series
    pub previous_toi: u64,
    /// TOI of the sample that broke the ordering
    pub offending_toi: u64,
    /// Series position the offending sample was appended at
    pub position: usize,
}

impl fmt::Display for OutOfOrderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time of interest went backwards at sample {}: {} follows {}",
            self.position, self.offending_toi, self.previous_toi
        )
    }
}

/// A recoverable condition observed while reading or assembling
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Record bytes could not be decoded into any value variant; entry skipped
    #[error("record {key:?} could not be decoded: {reason}")]
    RecordDecode { key: String, reason: String },

    /// Pose array shorter than six components; entry skipped
    #[error("record {key:?} has {len} components, expected at least 6")]
    Arity { key: String, len: usize },

    /// Matching key carried something other than a double array; entry skipped
    #[error("record {key:?} is a {found}, expected a double array")]
    TypeMismatch { key: String, found: ValueKind },

    /// Sample kept, but its TOI is lower than its predecessor's
    #[error("{0}")]
    OutOfOrder(OutOfOrderWarning),
}

impl Diagnostic {
    /// Key of the offending record, if the condition is tied to one
    pub fn key(&self) -> Option<&str> {
        match self {
            Diagnostic::RecordDecode { key, .. }
            | Diagnostic::Arity { key, .. }
            | Diagnostic::TypeMismatch { key, .. } => Some(key),
            Diagnostic::OutOfOrder(_) => None,
        }
    }

    /// True when the offending entry was dropped from the series
    pub fn skipped_entry(&self) -> bool {
        !matches!(self, Diagnostic::OutOfOrder(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::Arity {
            key: "a.origin".into(),
            len: 5,
        };
        assert_eq!(
            d.to_string(),
            "record \"a.origin\" has 5 components, expected at least 6"
        );

        let d = Diagnostic::TypeMismatch {
            key: "a.origin".into(),
            found: ValueKind::Text,
        };
        assert!(d.to_string().contains("is a text"));
    }

    #[test]
    fn test_out_of_order_is_not_a_skip() {
        let d = Diagnostic::OutOfOrder(OutOfOrderWarning {
            previous_toi: 7,
            offending_toi: 6,
            position: 2,
        });
        assert!(!d.skipped_entry());
        assert_eq!(d.key(), None);
        assert!(d.to_string().contains("6 follows 7"));
    }

    #[test]
    fn test_diagnostic_serializes_with_kind() {
        let d = Diagnostic::RecordDecode {
            key: "<line 3>".into(),
            reason: "expected value".into(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "record_decode");
        assert_eq!(json["key"], "<line 3>");
    }
}
