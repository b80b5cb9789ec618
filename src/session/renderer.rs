//! Renderer boundary
//!
//! Whatever draws frames implements [`FrameSink`]. The controller hands it
//! one [`Frame`] per emitting tick and knows nothing else about drawing.

use std::io::Write;

use super::types::Frame;

/// Receives playback frames
#[cfg_attr(test, mockall::automock)]
pub trait FrameSink {
    fn render(&mut self, frame: &Frame);
}

/// Collects frames in memory
impl FrameSink for Vec<Frame> {
    fn render(&mut self, frame: &Frame) {
        self.push(frame.clone());
    }
}

/// Writes one text line per frame
#[derive(Debug)]
pub struct ConsoleRenderer<W> {
    out: W,
    frames_written: usize,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for ConsoleRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let result = writeln!(
            self.out,
            "{:<16} #{:<6} pos={} heading=({:.3}, {:.3})",
            frame.annotation,
            frame.index,
            frame.sample.position,
            frame.heading.x,
            frame.heading.y
        )
        .and_then(|_| self.out.flush());

        match result {
            Ok(()) => self.frames_written += 1,
            Err(e) => tracing::warn!("Failed to write frame {}: {}", frame.index, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PoseSample, Vec3};

    #[test]
    fn test_console_renderer_line() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        let sample = PoseSample::new(77, Vec3::new(1.0, 2.0, 3.0), Vec3::default());
        renderer.render(&Frame::new(0, sample));

        assert_eq!(renderer.frames_written(), 1);
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("TOI: 77"));
        assert!(text.contains("pos=(1.0000, 2.0000, 3.0000)"));
        assert!(text.contains("heading=(1.000, 0.000)"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_vec_collects_frames() {
        let mut frames: Vec<Frame> = Vec::new();
        let sample = PoseSample::new(1, Vec3::default(), Vec3::default());
        frames.render(&Frame::new(0, sample));
        frames.render(&Frame::new(1, sample));
        assert_eq!(frames.len(), 2);
    }
}
