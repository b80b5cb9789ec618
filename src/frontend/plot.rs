//! Trajectory plot rendering with egui_plot

use egui::{Color32, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints, Points};

use crate::analysis::SeriesSummary;
use crate::session::{FrameSink, Frame};

/// Fraction of the plot extent used for the heading segment
const HEADING_SCALE: f64 = 0.05;

const TRAIL_COLOR: Color32 = Color32::from_rgb(0x30, 0xa2, 0xda);
const POSE_COLOR: Color32 = Color32::from_rgb(0xfc, 0x4f, 0x30);
const HEADING_COLOR: Color32 = Color32::from_rgb(0xe5, 0xae, 0x38);

/// Renderer side of the viewer: accumulates emitted frames and draws them
#[derive(Debug, Default)]
pub struct TrajectoryCanvas {
    /// XY positions of every frame emitted so far
    trail: Vec<[f64; 2]>,
    /// Most recent frame
    current: Option<Frame>,
    /// Fixed plot bounds, so the view does not jump as the trail grows
    bounds: Option<([f64; 2], [f64; 2])>,
    heading_length: f64,
}

impl TrajectoryCanvas {
    pub fn new(summary: &SeriesSummary) -> Self {
        let bounds = summary.xy_bounds(0.1);
        let heading_length = bounds
            .map(|(min, max)| (max[0] - min[0]).max(max[1] - min[1]) * HEADING_SCALE)
            .unwrap_or(0.5);

        Self {
            trail: Vec::with_capacity(summary.samples),
            current: None,
            bounds,
            heading_length,
        }
    }

    pub fn current(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    pub fn show(&self, ui: &mut Ui, title: &str) {
        let plot = Plot::new("trajectory_plot")
            .show_axes(true)
            .show_grid(true)
            .x_axis_label("X")
            .y_axis_label("Y")
            .legend(Legend::default().position(Corner::RightTop));

        ui.heading(title);

        plot.show(ui, |plot_ui| {
            if let Some((min, max)) = self.bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            }

            if !self.trail.is_empty() {
                let line = Line::new("Trajectory", PlotPoints::from(self.trail.clone()))
                    .color(TRAIL_COLOR)
                    .width(2.0);
                plot_ui.line(line);
            }

            if let Some(frame) = &self.current {
                let p = frame.sample.position;
                let tip = [
                    p.x + frame.heading.x * self.heading_length,
                    p.y + frame.heading.y * self.heading_length,
                ];

                plot_ui.points(
                    Points::new("Pose", PlotPoints::from(vec![[p.x, p.y]]))
                        .color(POSE_COLOR)
                        .radius(5.0),
                );
                plot_ui.line(
                    Line::new("Heading", PlotPoints::from(vec![[p.x, p.y], tip]))
                        .color(HEADING_COLOR)
                        .width(2.5),
                );
            }
        });
    }
}

impl FrameSink for TrajectoryCanvas {
    fn render(&mut self, frame: &Frame) {
        let p = frame.sample.position;
        self.trail.push([p.x, p.y]);
        self.current = Some(frame.clone());
    }
}
