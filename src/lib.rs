//! # pose-playback: Checkpoint Log Pose Playback
//!
//! Extracts a time-ordered series of agent poses from a checkpoint log (an
//! append-only log of typed key/value records) and plays it back frame by
//! frame, with pause and resume.
//!
//! ## Architecture
//!
//! - **Checkpoint**: Lazy, single-pass reader over a log source, decoding
//!   records into typed values
//! - **Pipeline**: Key filter, pose extractor and time-series assembler,
//!   run once to completion before playback
//! - **Session**: Playback cursor/controller, renderer trait and a headless
//!   timer loop
//! - **Frontend**: eframe/egui_plot viewer (feature `viewer`)
//!
//! Per-record problems never abort assembly; they are returned as an
//! ordered list of [`Diagnostic`]s next to the series. Only an unreadable
//! log is fatal.
//!
//! ## Example
//!
//! ```no_run
//! use pose_playback::{
//!     pipeline::{assemble_file, KeyFilter, OrderingPolicy},
//!     session::{ConsoleRenderer, PlaybackController},
//! };
//!
//! fn main() -> pose_playback::Result<()> {
//!     let filter = KeyFilter::new(".gams.frames.p1_base_footprint", [".origin", ".parent"]);
//!     let assembly = assemble_file("agent.0.jsonl", &filter, OrderingPolicy::Advisory)?;
//!
//!     let mut controller = PlaybackController::new(assembly.series);
//!     let mut renderer = ConsoleRenderer::new(std::io::stdout());
//!     while controller.tick(&mut renderer) {}
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod checkpoint;
pub mod config;
pub mod diagnostics;
pub mod error;
#[cfg(feature = "viewer")]
pub mod frontend;
pub mod pipeline;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use checkpoint::{CheckpointLogReader, LogSource, RawValue};
pub use config::PlaybackConfig;
pub use diagnostics::{Diagnostic, OutOfOrderWarning};
pub use error::{PlaybackError, Result};
pub use pipeline::{assemble, Assembly, KeyFilter, OrderingPolicy, PoseSeries};
pub use session::{Frame, FrameSink, PlaybackController, PlaybackState};
pub use types::{LogEntry, PoseSample, RecordValue, ValueKind};
