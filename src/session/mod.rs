//! Pose playback session
//!
//! This module steps through an assembled pose series one frame at a time
//! and hands each frame to a renderer.
//!
//! # Features
//!
//! - Explicit [`PlaybackCursor`] owned by the [`PlaybackController`]
//! - Pause/resume that is a no-op once playback is exhausted
//! - Heading overlay and TOI annotation computed per frame
//! - A headless timer loop with cross-thread pause/quit commands
//! - Text renderer for terminals and an in-memory frame collector

pub mod player;
pub mod renderer;
pub mod runner;
pub mod types;

pub use player::PlaybackController;
pub use renderer::{ConsoleRenderer, FrameSink};
pub use runner::{PlaybackCommand, PlaybackRunner, RunOutcome};
pub use types::{Frame, PlaybackCursor, PlaybackState};
