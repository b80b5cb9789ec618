//! Serializable report of an assembly run

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::analysis::SeriesSummary;
use crate::error::Result;

use super::{Assembly, KeyFilter};

/// Everything a `dump` writes: where the series came from, its summary,
/// the samples and the diagnostics
#[derive(Debug, Serialize)]
pub struct AssemblyReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub log_path: Option<&'a Path>,
    pub key_prefix: &'a str,
    pub key_suffixes: &'a [String],
    pub summary: SeriesSummary,
    #[serde(flatten)]
    pub assembly: &'a Assembly,
}

impl<'a> AssemblyReport<'a> {
    pub fn new(assembly: &'a Assembly, filter: &'a KeyFilter, log_path: Option<&'a Path>) -> Self {
        Self {
            generated_at: Utc::now(),
            log_path,
            key_prefix: filter.prefix(),
            key_suffixes: filter.suffixes(),
            summary: assembly.summary(),
            assembly,
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json<W: Write>(&self, mut out: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::{CheckpointLogReader, MemorySource, MemoryValue};
    use crate::pipeline::{assemble, OrderingPolicy};

    #[test]
    fn test_report_json_shape() {
        let source = MemorySource::new(vec![
            (
                ".gams.frames.p1_base_footprint.origin".into(),
                MemoryValue::array(5, vec![1.0, 2.0, 0.0, 0.0, 0.0, 0.5]),
            ),
            (
                ".gams.frames.p1_base_footprint.origin".into(),
                MemoryValue::array(4, vec![1.0; 3]),
            ),
        ]);
        let filter = KeyFilter::new("p1_base_footprint", [".origin"]);
        let assembly =
            assemble(CheckpointLogReader::new(source), &filter, OrderingPolicy::Advisory).unwrap();

        let mut buf = Vec::new();
        AssemblyReport::new(&assembly, &filter, None)
            .write_json(&mut buf)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["key_prefix"], "p1_base_footprint");
        assert_eq!(json["summary"]["samples"], 1);
        assert_eq!(json["series"][0]["toi"], 5);
        assert_eq!(json["series"][0]["position"]["y"], 2.0);
        assert_eq!(json["diagnostics"][0]["kind"], "arity");
        assert_eq!(json["entries_matched"], 2);
        assert!(json["generated_at"].is_string());
    }
}
