//! Frontend module for the egui viewer
//!
//! This module is the interactive renderer: an eframe window that ticks a
//! [`PlaybackController`] on a fixed interval and draws each emitted frame.
//!
//! # Main Types
//!
//! - [`PoseViewerApp`] - Application state implementing [`eframe::App`]
//! - [`TrajectoryCanvas`] - Frame sink that draws the trail, pose and heading
//!
//! # Controls
//!
//! - **Pause/Play** button or `Space` toggles playback
//! - The toolbar shows the TOI annotation, frame counter and state

mod plot;

pub use plot::TrajectoryCanvas;

use egui::{Color32, RichText};
use std::time::{Duration, Instant};

use crate::analysis::SeriesSummary;
use crate::error::{PlaybackError, Result};
use crate::session::{PlaybackController, PlaybackState};

/// Interactive pose playback window
pub struct PoseViewerApp {
    controller: PlaybackController,
    canvas: TrajectoryCanvas,
    summary: SeriesSummary,
    title: String,
    diagnostics: usize,
    interval: Duration,
    last_tick: Instant,
}

impl PoseViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: PlaybackController,
        summary: SeriesSummary,
        title: String,
        diagnostics: usize,
        interval: Duration,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            canvas: TrajectoryCanvas::new(&summary),
            controller,
            summary,
            title,
            diagnostics,
            interval,
            last_tick: Instant::now(),
        }
    }

    /// Advance at most one frame per elapsed interval
    fn drive(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= self.interval {
            self.controller.tick(&mut self.canvas);
            self.last_tick = now;
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let state = self.controller.state();
            let button = ui.add_enabled(
                !state.is_exhausted(),
                egui::Button::new(state.toggle_label()),
            );
            if button.clicked() {
                self.controller.toggle_pause();
            }

            ui.separator();

            let annotation = self
                .canvas
                .current()
                .map(|f| f.annotation.as_str())
                .unwrap_or("TOI: -");
            ui.label(RichText::new(annotation).monospace());

            ui.separator();
            ui.label(format!(
                "frame {} / {}",
                self.controller.index(),
                self.controller.len()
            ));

            ui.separator();
            let color = match state {
                PlaybackState::Running => Color32::LIGHT_GREEN,
                PlaybackState::Paused => Color32::YELLOW,
                PlaybackState::Exhausted => Color32::GRAY,
            };
            ui.colored_label(color, state.display_name());

            if self.summary.constant.z {
                if let Some(z) = self.summary.z {
                    ui.separator();
                    ui.label(format!("planar track (z = {:.3})", z.min));
                }
            }

            if self.diagnostics > 0 {
                ui.separator();
                ui.colored_label(
                    Color32::LIGHT_RED,
                    format!("{} diagnostics", self.diagnostics),
                );
            }
        });
    }
}

impl eframe::App for PoseViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.controller.toggle_pause();
        }

        self.drive();

        egui::TopBottomPanel::top("playback_toolbar").show(ctx, |ui| {
            self.render_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Nothing to draw: no pose samples matched the key filter");
                });
                return;
            }
            self.canvas.show(ui, &self.title);
        });

        if self.controller.state().is_running() {
            ctx.request_repaint_after(self.interval);
        }
    }
}

/// Open the viewer window and block until it is closed
pub fn run_viewer(
    controller: PlaybackController,
    summary: SeriesSummary,
    title: String,
    diagnostics: usize,
    interval: Duration,
) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title(format!("Pose Playback - {}", title)),
        ..Default::default()
    };

    eframe::run_native(
        "Pose Playback",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(PoseViewerApp::new(
                cc,
                controller,
                summary,
                title,
                diagnostics,
                interval,
            )))
        }),
    )
    .map_err(|e| PlaybackError::Viewer(e.to_string()))
}
