//! Core data types for pose-playback
//!
//! This module contains the fundamental data structures shared by the
//! checkpoint reader, the assembly pipeline and the playback session.
//!
//! # Main Types
//!
//! - [`RecordValue`] - A decoded, typed value from the checkpoint log
//! - [`LogEntry`] - One keyed record with its time of interest
//! - [`PoseSample`] - A 6-component pose (position + orientation) at a TOI
//! - [`Heading`] - A 2-D unit direction derived from a pose's yaw
//!
//! # Record Variants
//!
//! The log only carries four kinds of value:
//! - Scalar doubles
//! - Double arrays (never empty)
//! - Text
//! - Opaque binary blobs whose encoding is owned by the producer
//!
//! A value's variant is fixed when it is decoded. The only way to look
//! inside a [`RecordValue::DoubleArray`] is indexed access through
//! [`RecordValue::index`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The variant of a [`RecordValue`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// 64-bit floating point scalar
    Double,
    /// Ordered sequence of 64-bit floats
    DoubleArray,
    /// UTF-8 text
    Text,
    /// Binary blob with an unspecified type id
    Opaque,
}

impl ValueKind {
    /// Display name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueKind::Double => "double",
            ValueKind::DoubleArray => "double array",
            ValueKind::Text => "text",
            ValueKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A typed, immutable value decoded from the checkpoint log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RecordValue {
    /// Scalar double
    Double(f64),
    /// Non-empty array of doubles
    DoubleArray(Vec<f64>),
    /// Text value
    Text(String),
    /// Opaque binary payload
    Opaque(Vec<u8>),
}

impl RecordValue {
    /// Get the variant of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            RecordValue::Double(_) => ValueKind::Double,
            RecordValue::DoubleArray(_) => ValueKind::DoubleArray,
            RecordValue::Text(_) => ValueKind::Text,
            RecordValue::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Indexed access into a double array.
    ///
    /// Returns `None` for every other variant and for out-of-range indices.
    pub fn index(&self, i: usize) -> Option<f64> {
        match self {
            RecordValue::DoubleArray(values) => values.get(i).copied(),
            RecordValue::Double(_) | RecordValue::Text(_) | RecordValue::Opaque(_) => None,
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Double(v) => write!(f, "{}", v),
            RecordValue::DoubleArray(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            RecordValue::Text(s) => f.write_str(s),
            RecordValue::Opaque(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// One decoded record from the checkpoint log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Hierarchical, conventionally dot-delimited key
    pub key: String,
    /// Decoded value
    pub value: RecordValue,
    /// Time of interest assigned by the producer
    pub toi: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(key: impl Into<String>, value: RecordValue, toi: u64) -> Self {
        Self {
            key: key.into(),
            value,
            toi,
        }
    }
}

/// A three-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

/// A pose at one time of interest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Time of interest of the record the pose was decoded from
    pub toi: u64,
    /// Position (x, y, z)
    pub position: Vec3,
    /// Orientation (u, v, w)
    pub orientation: Vec3,
}

impl PoseSample {
    /// Create a new pose sample
    pub fn new(toi: u64, position: Vec3, orientation: Vec3) -> Self {
        Self {
            toi,
            position,
            orientation,
        }
    }

    /// Heading in the XY plane derived from the orientation's third component
    pub fn heading(&self) -> Heading {
        Heading::from_yaw(self.orientation.z)
    }
}

/// A 2-D direction vector used to overlay a pose's heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub x: f64,
    pub y: f64,
}

impl Heading {
    /// Decompose a yaw angle into `(cos, sin)`.
    ///
    /// `angle` is in radians and is used as-is, with no degree conversion.
    pub fn from_yaw(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }
}
