//! Playback construction helpers

use crossbeam_channel::{bounded, Receiver, Sender};
use pose_playback::pipeline::{assemble_file, KeyFilter, OrderingPolicy, PoseSeries};
use pose_playback::session::PlaybackCommand;

use super::builders::CheckpointLogBuilder;
use super::PREFIX;

/// Create a command channel with default size
pub fn create_command_channel() -> (Sender<PlaybackCommand>, Receiver<PlaybackCommand>) {
    bounded(16)
}

/// Assemble a series of poses moving along X, one per TOI
pub fn create_test_series(tois: &[u64]) -> PoseSeries {
    let builder = tois.iter().fold(CheckpointLogBuilder::new(), |b, &toi| {
        b.pose(
            &format!("{}.origin", PREFIX),
            toi,
            [toi as f64, 0.0, 0.0, 0.0, 0.0, 0.0],
        )
    });
    let file = builder.write();

    let filter = KeyFilter::new(PREFIX, [".origin"]);
    assemble_file(file.path(), &filter, OrderingPolicy::Advisory)
        .unwrap()
        .series
}
