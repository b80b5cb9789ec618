//! Typed, lazy reader over a checkpoint log source

use std::iter::FusedIterator;
use std::path::Path;

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::types::{LogEntry, RecordValue};

use super::{JsonLinesSource, LogSource, RawDecodeError, RawRecord, RawValue, TypeTag};

/// Lazy sequence of decoded [`LogEntry`] values in physical log order.
///
/// The reader is an [`Iterator`] that can be drained exactly once. Records
/// that fail to decode are skipped and recorded in the reader's diagnostics
/// list, which the caller collects after iteration.
#[derive(Debug)]
pub struct CheckpointLogReader<S> {
    source: S,
    diagnostics: Vec<Diagnostic>,
    yielded: usize,
    finished: bool,
}

impl CheckpointLogReader<JsonLinesSource> {
    /// Open a JSON-lines checkpoint file.
    ///
    /// Fails with [`PlaybackError::LogUnreadable`](crate::PlaybackError::LogUnreadable)
    /// if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(JsonLinesSource::open(path)?))
    }
}

impl<S: LogSource> CheckpointLogReader<S> {
    /// Wrap a log source
    pub fn new(source: S) -> Self {
        Self {
            source,
            diagnostics: Vec::new(),
            yielded: 0,
            finished: false,
        }
    }

    /// Diagnostics collected so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the diagnostics collected so far, leaving the list empty
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Consume the reader and return its diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Number of entries yielded so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Whether the underlying source has been exhausted
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn decode(value: &S::Value) -> std::result::Result<RecordValue, RawDecodeError> {
        match value.type_tag() {
            TypeTag::Double => value.to_double().map(RecordValue::Double),
            TypeTag::DoubleArray => {
                let values = value.to_double_array()?;
                if values.is_empty() {
                    return Err(RawDecodeError::new("double array is empty"));
                }
                Ok(RecordValue::DoubleArray(values))
            }
            TypeTag::String => value.to_text().map(RecordValue::Text),
            TypeTag::Any => value.to_bytes().map(RecordValue::Opaque),
            TypeTag::Unknown(tag) => Err(RawDecodeError(format!("unknown type tag {:?}", tag))),
        }
    }
}

impl<S: LogSource> Iterator for CheckpointLogReader<S> {
    type Item = LogEntry;

    fn next(&mut self) -> Option<LogEntry> {
        if self.finished {
            return None;
        }

        loop {
            match self.source.next_record() {
                None => {
                    self.finished = true;
                    tracing::debug!(
                        yielded = self.yielded,
                        skipped = self.diagnostics.len(),
                        "Checkpoint log exhausted"
                    );
                    return None;
                }
                Some(RawRecord::Malformed { location, reason }) => {
                    tracing::warn!("Skipping malformed record at {}: {}", location, reason);
                    self.diagnostics.push(Diagnostic::RecordDecode {
                        key: location,
                        reason,
                    });
                }
                Some(RawRecord::Record { key, value }) => match Self::decode(&value) {
                    Ok(decoded) => {
                        self.yielded += 1;
                        return Some(LogEntry::new(key, decoded, value.toi()));
                    }
                    Err(e) => {
                        tracing::warn!("Skipping undecodable record {:?}: {}", key, e);
                        self.diagnostics.push(Diagnostic::RecordDecode {
                            key,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
    }
}

impl<S: LogSource> FusedIterator for CheckpointLogReader<S> {}
