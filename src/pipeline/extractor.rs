//! Decode a matching record into a pose sample

use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::types::{LogEntry, PoseSample, RecordValue, ValueKind, Vec3};

/// Number of components in a pose record (position xyz, orientation uvw)
pub const POSE_COMPONENTS: usize = 6;

/// Why a matching record could not become a pose
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    #[error("pose array has {len} components, expected at least 6")]
    Arity { len: usize },

    #[error("expected a double array, found {found}")]
    TypeMismatch { found: ValueKind },
}

impl ExtractError {
    /// Attach the offending key for the diagnostics list
    pub fn into_diagnostic(self, key: String) -> Diagnostic {
        match self {
            ExtractError::Arity { len } => Diagnostic::Arity { key, len },
            ExtractError::TypeMismatch { found } => Diagnostic::TypeMismatch { key, found },
        }
    }
}

/// Turns `DoubleArray` records into [`PoseSample`]s.
///
/// Indices 0-2 are position, 3-5 orientation; anything past index 5 is
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseExtractor;

impl PoseExtractor {
    pub fn extract(entry: &LogEntry) -> Result<PoseSample, ExtractError> {
        match &entry.value {
            RecordValue::DoubleArray(v) if v.len() >= POSE_COMPONENTS => Ok(PoseSample::new(
                entry.toi,
                Vec3::new(v[0], v[1], v[2]),
                Vec3::new(v[3], v[4], v[5]),
            )),
            RecordValue::DoubleArray(v) => Err(ExtractError::Arity { len: v.len() }),
            RecordValue::Double(_) | RecordValue::Text(_) | RecordValue::Opaque(_) => {
                Err(ExtractError::TypeMismatch {
                    found: entry.value.kind(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: RecordValue) -> LogEntry {
        LogEntry::new(".gams.frames.p1_base_footprint.origin", value, 42)
    }

    #[test]
    fn test_six_components() {
        let sample = PoseExtractor::extract(&entry(RecordValue::DoubleArray(vec![
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
        ])))
        .unwrap();

        assert_eq!(sample.toi, 42);
        assert_eq!(sample.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sample.orientation, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_five_components_is_arity_error() {
        let err = PoseExtractor::extract(&entry(RecordValue::DoubleArray(vec![
            1.0, 2.0, 3.0, 4.0, 5.0,
        ])))
        .unwrap_err();
        assert_eq!(err, ExtractError::Arity { len: 5 });
    }

    #[test]
    fn test_extra_components_are_ignored() {
        let sample = PoseExtractor::extract(&entry(RecordValue::DoubleArray(vec![
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0,
        ])))
        .unwrap();
        assert_eq!(sample.orientation.z, 6.0);
    }

    #[test]
    fn test_wrong_variant_is_type_mismatch() {
        let err = PoseExtractor::extract(&entry(RecordValue::Text("p1".into()))).unwrap_err();
        assert_eq!(
            err,
            ExtractError::TypeMismatch {
                found: ValueKind::Text
            }
        );

        let err = PoseExtractor::extract(&entry(RecordValue::Double(1.0))).unwrap_err();
        assert_eq!(
            err,
            ExtractError::TypeMismatch {
                found: ValueKind::Double
            }
        );
    }

    #[test]
    fn test_into_diagnostic_keeps_key() {
        let d = ExtractError::Arity { len: 2 }.into_diagnostic("k".into());
        assert_eq!(d, Diagnostic::Arity { key: "k".into(), len: 2 });
    }
}
