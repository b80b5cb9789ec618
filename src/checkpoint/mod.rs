//! Checkpoint log access
//!
//! The on-disk encoding of a checkpoint log belongs to whoever writes it.
//! This module only depends on a small iteration interface:
//!
//! - [`LogSource`] yields `(key, raw value)` pairs in storage order, once.
//! - [`RawValue`] answers "what type are you", "what is your time of
//!   interest" and decodes itself as a double, a double array, a string
//!   or a byte blob.
//!
//! [`CheckpointLogReader`] turns a source into a lazy sequence of typed
//! [`LogEntry`](crate::types::LogEntry) values, skipping records that do
//! not decode and reporting them as diagnostics.
//!
//! Two sources ship with the crate:
//!
//! - [`JsonLinesSource`] - a file with one JSON record per line
//! - [`MemorySource`] - an in-memory list, for tests and embedding

pub mod jsonl;
pub mod memory;
pub mod reader;

pub use jsonl::{JsonLinesSource, JsonValue};
pub use memory::{MemoryPayload, MemorySource, MemoryValue};
pub use reader::CheckpointLogReader;

use thiserror::Error;

/// Type tag a raw value reports before it is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// Scalar double
    Double,
    /// Indexed double array
    DoubleArray,
    /// String
    String,
    /// Producer-defined binary payload
    Any,
    /// A tag this crate does not know how to decode
    Unknown(String),
}

/// A raw value failed to decode under the requested interpretation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RawDecodeError(pub String);

impl RawDecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// An undecoded value as exposed by a log source
pub trait RawValue {
    /// Type tag stored with the value
    fn type_tag(&self) -> TypeTag;

    /// Time of interest assigned by the producer
    fn toi(&self) -> u64;

    /// Decode as a scalar double
    fn to_double(&self) -> Result<f64, RawDecodeError>;

    /// Decode as an indexed double array
    fn to_double_array(&self) -> Result<Vec<f64>, RawDecodeError>;

    /// Decode as a string
    fn to_text(&self) -> Result<String, RawDecodeError>;

    /// Decode as an opaque byte blob
    fn to_bytes(&self) -> Result<Vec<u8>, RawDecodeError>;
}

/// One item pulled from a log source
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord<V> {
    /// A keyed value
    Record { key: String, value: V },
    /// Storage that could not even be split into key and value.
    ///
    /// `location` is the key when it could be recovered, otherwise a
    /// source-specific position such as `<line 12>`.
    Malformed { location: String, reason: String },
}

/// Forward-only, single-pass producer of raw records in storage order
pub trait LogSource {
    type Value: RawValue;

    /// Pull the next record; `None` once the source is exhausted
    fn next_record(&mut self) -> Option<RawRecord<Self::Value>>;
}
