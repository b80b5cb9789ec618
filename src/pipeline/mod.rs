//! Pose assembly pipeline.
//!
//! Runs once, synchronously, before playback:
//!
//! ```text
//! CheckpointLogReader -> KeyFilter -> PoseExtractor -> TimeSeriesAssembler
//! ```
//!
//! Entries whose key does not match the filter are dropped silently.
//! Matching entries that cannot become a pose are dropped with a
//! diagnostic. Only an unreadable log, or a decreasing TOI under the strict
//! ordering policy, stops assembly.

pub mod assembler;
pub mod entities;
pub mod extractor;
pub mod filter;
pub mod report;
pub mod series;

pub use assembler::{OrderingPolicy, TimeSeriesAssembler};
pub use entities::{discover_entities, entity_name};
pub use extractor::{ExtractError, PoseExtractor, POSE_COMPONENTS};
pub use filter::{matches, KeyFilter};
pub use report::AssemblyReport;
pub use series::PoseSeries;

use serde::Serialize;
use std::path::Path;

use crate::analysis::SeriesSummary;
use crate::checkpoint::{CheckpointLogReader, LogSource};
use crate::diagnostics::Diagnostic;
use crate::error::Result;

/// Output of one assembly run
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    /// Assembled samples in log order
    pub series: PoseSeries,
    /// Recoverable conditions, in the order they were met
    pub diagnostics: Vec<Diagnostic>,
    /// Entries the reader yielded
    pub entries_read: usize,
    /// Entries whose key matched the filter
    pub entries_matched: usize,
}

impl Assembly {
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary::from_series(&self.series)
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Drain `reader` through the filter and extractor into a pose series
pub fn assemble<S: LogSource>(
    mut reader: CheckpointLogReader<S>,
    filter: &KeyFilter,
    policy: OrderingPolicy,
) -> Result<Assembly> {
    let mut assembler = TimeSeriesAssembler::new(policy);
    let mut entries_read = 0;
    let mut entries_matched = 0;

    while let Some(entry) = reader.next() {
        // Records skipped by the reader came before this entry
        for diagnostic in reader.take_diagnostics() {
            assembler.record(diagnostic);
        }

        entries_read += 1;
        if !filter.matches(&entry.key) {
            continue;
        }
        entries_matched += 1;

        match PoseExtractor::extract(&entry) {
            Ok(sample) => {
                tracing::trace!(
                    key = %entry.key,
                    toi = sample.toi,
                    position = %sample.position,
                    orientation = %sample.orientation,
                    "Matched pose"
                );
                assembler.append(sample)?;
            }
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", entry.key, e);
                assembler.record(e.into_diagnostic(entry.key));
            }
        }
    }

    for diagnostic in reader.into_diagnostics() {
        assembler.record(diagnostic);
    }

    let (series, diagnostics) = assembler.finish();
    tracing::info!(
        "Assembled {} pose samples from {} entries ({} matched, {} diagnostics)",
        series.len(),
        entries_read,
        entries_matched,
        diagnostics.len()
    );

    Ok(Assembly {
        series,
        diagnostics,
        entries_read,
        entries_matched,
    })
}

/// Open a JSON-lines checkpoint file and assemble it
pub fn assemble_file(
    path: impl AsRef<Path>,
    filter: &KeyFilter,
    policy: OrderingPolicy,
) -> Result<Assembly> {
    assemble(CheckpointLogReader::open(path)?, filter, policy)
}
