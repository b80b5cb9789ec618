//! Playback controller stepping through an assembled pose series

use crate::pipeline::PoseSeries;

use super::renderer::FrameSink;
use super::types::{Frame, PlaybackCursor, PlaybackState};

/// Cursor over a [`PoseSeries`] that emits one frame per tick.
///
/// The controller does no timing of its own; whoever owns it calls
/// [`tick`](Self::tick) at a fixed interval. Ticks are O(1) and never block.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    /// Series being played (read-only)
    series: PoseSeries,
    /// Next index and pause flag
    cursor: PlaybackCursor,
}

impl PlaybackController {
    /// Start in `Running` at index 0 (or `Exhausted` for an empty series)
    pub fn new(series: PoseSeries) -> Self {
        Self::from_parts(series, PlaybackCursor::default())
    }

    /// Resume from an explicit cursor. The index is clamped to the series length.
    pub fn from_parts(series: PoseSeries, mut cursor: PlaybackCursor) -> Self {
        cursor.index = cursor.index.min(series.len());
        Self { series, cursor }
    }

    /// Split back into series and cursor
    pub fn into_parts(self) -> (PoseSeries, PlaybackCursor) {
        (self.series, self.cursor)
    }

    pub fn series(&self) -> &PoseSeries {
        &self.series
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// Get current state
    pub fn state(&self) -> PlaybackState {
        if self.cursor.index >= self.series.len() {
            PlaybackState::Exhausted
        } else if self.cursor.paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Running
        }
    }

    /// Next index to emit
    pub fn index(&self) -> usize {
        self.cursor.index
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        self.state().is_paused()
    }

    /// Check if exhausted
    pub fn is_exhausted(&self) -> bool {
        self.state().is_exhausted()
    }

    /// Get playback progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.series.is_empty() {
            return 1.0;
        }
        self.cursor.index as f64 / self.series.len() as f64
    }

    /// Switch between `Running` and `Paused`; ignored once exhausted
    pub fn toggle_pause(&mut self) {
        if self.is_exhausted() {
            return;
        }
        self.cursor.paused = !self.cursor.paused;
        tracing::debug!(
            index = self.cursor.index,
            "Playback {}",
            self.state().display_name()
        );
    }

    /// Step once without a renderer. Returns the frame that would have
    /// been emitted, or `None` when paused or exhausted.
    pub fn advance(&mut self) -> Option<Frame> {
        if !self.state().is_running() {
            return None;
        }

        let index = self.cursor.index;
        let sample = *self.series.get(index)?;
        self.cursor.index += 1;

        if self.cursor.index == self.series.len() {
            tracing::debug!("Playback exhausted after {} frames", self.cursor.index);
        }

        Some(Frame::new(index, sample))
    }

    /// Emit the current frame to `renderer` and move on.
    ///
    /// Returns true if a frame was emitted.
    pub fn tick<R: FrameSink + ?Sized>(&mut self, renderer: &mut R) -> bool {
        match self.advance() {
            Some(frame) => {
                renderer.render(&frame);
                true
            }
            None => false,
        }
    }
}
