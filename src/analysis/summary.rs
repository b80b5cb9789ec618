//! Series summary statistics

use serde::{Deserialize, Serialize};

use crate::pipeline::PoseSeries;

/// Closed range of one position axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    fn single(v: f64) -> Self {
        Self { min: v, max: v }
    }

    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Which position axes hold the same value in every sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Default for ConstantAxes {
    /// An empty series is constant on every axis
    fn default() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }
}

/// Summary of an assembled pose series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Number of samples
    pub samples: usize,
    /// TOI of the first sample
    pub first_toi: Option<u64>,
    /// TOI of the last sample
    pub last_toi: Option<u64>,
    /// Position bounds per axis (`None` when empty)
    pub x: Option<AxisRange>,
    pub y: Option<AxisRange>,
    pub z: Option<AxisRange>,
    /// Axes that never change
    pub constant: ConstantAxes,
}

impl SeriesSummary {
    /// Compute the summary in a single pass
    pub fn from_series(series: &PoseSeries) -> Self {
        let mut x: Option<AxisRange> = None;
        let mut y: Option<AxisRange> = None;
        let mut z: Option<AxisRange> = None;
        let mut constant = ConstantAxes::default();

        let first = series.first().copied();
        for sample in series.iter() {
            let p = sample.position;
            for (range, v) in [(&mut x, p.x), (&mut y, p.y), (&mut z, p.z)] {
                match range {
                    Some(r) => r.include(v),
                    None => *range = Some(AxisRange::single(v)),
                }
            }

            if let Some(first) = first {
                constant.x &= p.x == first.position.x;
                constant.y &= p.y == first.position.y;
                constant.z &= p.z == first.position.z;
            }
        }

        Self {
            samples: series.len(),
            first_toi: first.map(|s| s.toi),
            last_toi: series.last().map(|s| s.toi),
            x,
            y,
            z,
            constant,
        }
    }

    /// TOI distance between the first and last sample
    pub fn toi_span(&self) -> Option<u64> {
        match (self.first_toi, self.last_toi) {
            (Some(first), Some(last)) => Some(last.saturating_sub(first)),
            _ => None,
        }
    }

    /// XY plot bounds as `([x_min, y_min], [x_max, y_max])`, padded so a
    /// constant axis still has a visible extent
    pub fn xy_bounds(&self, padding: f64) -> Option<([f64; 2], [f64; 2])> {
        let (x, y) = (self.x?, self.y?);
        let pad = |r: AxisRange| {
            let margin = if r.span() > 0.0 {
                r.span() * padding
            } else {
                1.0
            };
            (r.min - margin, r.max + margin)
        };
        let (x_min, x_max) = pad(x);
        let (y_min, y_max) = pad(y);
        Some(([x_min, y_min], [x_max, y_max]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{OrderingPolicy, TimeSeriesAssembler};
    use crate::types::{PoseSample, Vec3};

    fn series(points: &[(u64, f64, f64, f64)]) -> PoseSeries {
        let mut assembler = TimeSeriesAssembler::new(OrderingPolicy::Advisory);
        for &(toi, x, y, z) in points {
            assembler
                .append(PoseSample::new(toi, Vec3::new(x, y, z), Vec3::default()))
                .unwrap();
        }
        assembler.finish().0
    }

    #[test]
    fn test_summary_of_planar_track() {
        let summary = SeriesSummary::from_series(&series(&[
            (10, 0.0, 1.0, 0.0),
            (20, 2.0, -1.0, 0.0),
            (30, 1.0, 0.5, 0.0),
        ]));

        assert_eq!(summary.samples, 3);
        assert_eq!(summary.toi_span(), Some(20));
        assert_eq!(summary.x, Some(AxisRange { min: 0.0, max: 2.0 }));
        assert_eq!(summary.y, Some(AxisRange { min: -1.0, max: 1.0 }));
        assert_eq!(
            summary.constant,
            ConstantAxes {
                x: false,
                y: false,
                z: true
            }
        );
    }

    #[test]
    fn test_summary_of_empty_series() {
        let summary = SeriesSummary::from_series(&PoseSeries::new());
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.toi_span(), None);
        assert!(summary.xy_bounds(0.1).is_none());
        assert_eq!(summary.constant, ConstantAxes::default());
    }

    #[test]
    fn test_xy_bounds_pad_constant_axis() {
        let summary = SeriesSummary::from_series(&series(&[(1, 3.0, 0.0, 0.0), (2, 3.0, 4.0, 0.0)]));
        let (min, max) = summary.xy_bounds(0.25).unwrap();
        assert_eq!(min, [2.0, -1.0]);
        assert_eq!(max, [4.0, 5.0]);
    }
}
