//! Time-series assembly with the monotonic time-of-interest check

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, OutOfOrderWarning};
use crate::error::{PlaybackError, Result};
use crate::types::PoseSample;

use super::series::PoseSeries;

/// What to do when a sample's TOI is lower than its predecessor's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Keep the sample and record an [`OutOfOrderWarning`]
    #[default]
    Advisory,
    /// Reject the sample and abort assembly
    Strict,
}

/// Builds a [`PoseSeries`] one sample at a time.
///
/// Also owns the ordered diagnostics list for the whole assembly run, so
/// reader and extraction problems can be interleaved with ordering
/// warnings in log order.
#[derive(Debug, Default)]
pub struct TimeSeriesAssembler {
    series: PoseSeries,
    policy: OrderingPolicy,
    diagnostics: Vec<Diagnostic>,
    out_of_order: usize,
}

impl TimeSeriesAssembler {
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Append a sample, checking it against the previous one.
    ///
    /// Under [`OrderingPolicy::Strict`] a decreasing TOI is returned as
    /// [`PlaybackError::OutOfOrder`] and the sample is not appended.
    pub fn append(&mut self, sample: PoseSample) -> Result<()> {
        if let Some(previous) = self.series.last() {
            if sample.toi < previous.toi {
                let warning = OutOfOrderWarning {
                    previous_toi: previous.toi,
                    offending_toi: sample.toi,
                    position: self.series.len(),
                };

                match self.policy {
                    OrderingPolicy::Strict => {
                        tracing::error!("{}", warning);
                        return Err(PlaybackError::OutOfOrder {
                            previous_toi: warning.previous_toi,
                            offending_toi: warning.offending_toi,
                            position: warning.position,
                        });
                    }
                    OrderingPolicy::Advisory => {
                        tracing::warn!("{}", warning);
                        self.out_of_order += 1;
                        self.diagnostics.push(Diagnostic::OutOfOrder(warning));
                    }
                }
            }
        }

        self.series.push(sample);
        Ok(())
    }

    /// Record a diagnostic raised elsewhere in the pipeline
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of ordering warnings recorded so far
    pub fn out_of_order_count(&self) -> usize {
        self.out_of_order
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Read-only view of the series; stays valid across later appends
    pub fn snapshot(&self) -> PoseSeries {
        self.series.snapshot()
    }

    /// Finish assembly, handing over the series and the diagnostics list
    pub fn finish(self) -> (PoseSeries, Vec<Diagnostic>) {
        (self.series, self.diagnostics)
    }
}
