//! Playback data types

use serde::{Deserialize, Serialize};

use crate::types::{Heading, PoseSample};

/// State of the playback state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Advancing one sample per tick
    #[default]
    Running,
    /// Ticks are ignored until resumed
    Paused,
    /// Every sample has been emitted (or there were none)
    Exhausted,
}

impl PlaybackState {
    /// Check if running
    pub fn is_running(&self) -> bool {
        matches!(self, PlaybackState::Running)
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }

    /// Check if exhausted
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PlaybackState::Exhausted)
    }

    /// Display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            PlaybackState::Running => "Running",
            PlaybackState::Paused => "Paused",
            PlaybackState::Exhausted => "Exhausted",
        }
    }

    /// Label for a pause/resume control in this state
    pub fn toggle_label(&self) -> &'static str {
        match self {
            PlaybackState::Running => "Pause",
            PlaybackState::Paused => "Play",
            PlaybackState::Exhausted => "Done",
        }
    }
}

/// Position and pause flag of a playback run.
///
/// `index` is the next sample to emit; `index == len` means exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackCursor {
    pub index: usize,
    pub paused: bool,
}

/// One unit of playback output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Series position of the sample
    pub index: usize,
    /// The pose being shown
    pub sample: PoseSample,
    /// Heading overlay derived from the sample's yaw
    pub heading: Heading,
    /// Text shown next to the pose
    pub annotation: String,
}

impl Frame {
    pub fn new(index: usize, sample: PoseSample) -> Self {
        Self {
            index,
            heading: sample.heading(),
            annotation: format!("TOI: {}", sample.toi),
            sample,
        }
    }
}
