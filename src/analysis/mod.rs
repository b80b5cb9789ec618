//! Analysis module for assembled pose series
//!
//! This module provides summary statistics over a [`PoseSeries`](crate::pipeline::PoseSeries):
//! - Sample count and time-of-interest span
//! - Per-axis position bounds
//! - Constant-axis detection (used to flatten plots)

pub mod summary;

pub use summary::{AxisRange, ConstantAxes, SeriesSummary};
