//! In-memory checkpoint source

use std::collections::VecDeque;

use crate::types::RecordValue;

use super::{LogSource, RawDecodeError, RawRecord, RawValue, TypeTag};

/// Payload held by a [`MemoryValue`]
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryPayload {
    /// An already-typed value
    Value(RecordValue),
    /// A value whose type tag is not understood (decoding always fails)
    Undecodable(String),
}

/// A raw value held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryValue {
    toi: u64,
    payload: MemoryPayload,
}

impl MemoryValue {
    pub fn new(toi: u64, payload: MemoryPayload) -> Self {
        Self { toi, payload }
    }

    pub fn double(toi: u64, value: f64) -> Self {
        Self::new(toi, MemoryPayload::Value(RecordValue::Double(value)))
    }

    pub fn array(toi: u64, values: Vec<f64>) -> Self {
        Self::new(toi, MemoryPayload::Value(RecordValue::DoubleArray(values)))
    }

    pub fn text(toi: u64, text: impl Into<String>) -> Self {
        Self::new(toi, MemoryPayload::Value(RecordValue::Text(text.into())))
    }

    pub fn opaque(toi: u64, bytes: Vec<u8>) -> Self {
        Self::new(toi, MemoryPayload::Value(RecordValue::Opaque(bytes)))
    }

    pub fn undecodable(toi: u64, tag: impl Into<String>) -> Self {
        Self::new(toi, MemoryPayload::Undecodable(tag.into()))
    }

    fn mismatch(&self, wanted: &str) -> RawDecodeError {
        RawDecodeError(format!("value is not {}", wanted))
    }
}

impl RawValue for MemoryValue {
    fn type_tag(&self) -> TypeTag {
        match &self.payload {
            MemoryPayload::Value(RecordValue::Double(_)) => TypeTag::Double,
            MemoryPayload::Value(RecordValue::DoubleArray(_)) => TypeTag::DoubleArray,
            MemoryPayload::Value(RecordValue::Text(_)) => TypeTag::String,
            MemoryPayload::Value(RecordValue::Opaque(_)) => TypeTag::Any,
            MemoryPayload::Undecodable(tag) => TypeTag::Unknown(tag.clone()),
        }
    }

    fn toi(&self) -> u64 {
        self.toi
    }

    fn to_double(&self) -> Result<f64, RawDecodeError> {
        match &self.payload {
            MemoryPayload::Value(RecordValue::Double(v)) => Ok(*v),
            _ => Err(self.mismatch("a double")),
        }
    }

    fn to_double_array(&self) -> Result<Vec<f64>, RawDecodeError> {
        match &self.payload {
            MemoryPayload::Value(RecordValue::DoubleArray(values)) => Ok(values.clone()),
            _ => Err(self.mismatch("a double array")),
        }
    }

    fn to_text(&self) -> Result<String, RawDecodeError> {
        match &self.payload {
            MemoryPayload::Value(RecordValue::Text(s)) => Ok(s.clone()),
            _ => Err(self.mismatch("a string")),
        }
    }

    fn to_bytes(&self) -> Result<Vec<u8>, RawDecodeError> {
        match &self.payload {
            MemoryPayload::Value(RecordValue::Opaque(bytes)) => Ok(bytes.clone()),
            _ => Err(self.mismatch("a byte blob")),
        }
    }
}

/// Checkpoint source over a list of `(key, value)` pairs held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: VecDeque<(String, MemoryValue)>,
}

impl MemorySource {
    pub fn new(records: Vec<(String, MemoryValue)>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Append a record to the end of the log
    pub fn push(&mut self, key: impl Into<String>, value: MemoryValue) {
        self.records.push_back((key.into(), value));
    }

    /// Records not yet consumed
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl FromIterator<(String, MemoryValue)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (String, MemoryValue)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl LogSource for MemorySource {
    type Value = MemoryValue;

    fn next_record(&mut self) -> Option<RawRecord<MemoryValue>> {
        self.records
            .pop_front()
            .map(|(key, value)| RawRecord::Record { key, value })
    }
}
