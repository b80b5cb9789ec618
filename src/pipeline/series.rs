//! Append-only pose series with index-stable snapshots
//!
//! Samples live in fixed-size chunks behind [`Arc`]s. A snapshot clones the
//! chunk pointers, not the samples, and later appends never touch what a
//! snapshot already references: the writer copies a shared chunk before
//! pushing into it.

use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::types::PoseSample;

/// Samples per storage chunk
const CHUNK_SIZE: usize = 1024;

/// Ordered sequence of pose samples in arrival order.
///
/// Cloning is cheap and yields a read-only view that stays valid while the
/// series it was cloned from keeps growing.
#[derive(Debug, Clone, Default)]
pub struct PoseSeries {
    chunks: Vec<Arc<Vec<PoseSample>>>,
    len: usize,
}

impl PoseSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sample at position `index`, O(1)
    pub fn get(&self, index: usize) -> Option<&PoseSample> {
        if index >= self.len {
            return None;
        }
        self.chunks
            .get(index / CHUNK_SIZE)
            .and_then(|chunk| chunk.get(index % CHUNK_SIZE))
    }

    pub fn first(&self) -> Option<&PoseSample> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&PoseSample> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoseSample> + '_ {
        self.chunks.iter().flat_map(|chunk| chunk.iter()).take(self.len)
    }

    /// Read-only view of the series as it is now
    pub fn snapshot(&self) -> PoseSeries {
        self.clone()
    }

    pub(crate) fn push(&mut self, sample: PoseSample) {
        if self.len % CHUNK_SIZE == 0 {
            self.chunks.push(Arc::new(Vec::with_capacity(CHUNK_SIZE)));
        }
        if let Some(chunk) = self.chunks.last_mut() {
            Arc::make_mut(chunk).push(sample);
            self.len += 1;
        }
    }
}

impl Serialize for PoseSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
