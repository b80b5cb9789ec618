//! Headless playback driver
//!
//! Drives a [`PlaybackController`] from a fixed-interval timer and relays
//! pause/resume requests arriving from other threads over a channel, so the
//! cursor is only ever touched by the thread running the loop.

use crossbeam_channel::{never, select, tick, Receiver};
use std::time::Duration;

use super::player::PlaybackController;
use super::renderer::FrameSink;

/// Request sent to a running playback loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Switch between running and paused
    TogglePause,
    /// Stop the loop
    Quit,
}

/// Why a playback loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every frame was emitted
    Exhausted,
    /// A [`PlaybackCommand::Quit`] was received
    Quit,
    /// Paused with no command source left to resume it
    Stalled,
}

/// Timer loop around a [`PlaybackController`]
#[derive(Debug, Clone)]
pub struct PlaybackRunner {
    interval: Duration,
    exit_when_exhausted: bool,
}

impl PlaybackRunner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            exit_when_exhausted: true,
        }
    }

    /// Keep waiting for commands after the last frame instead of returning
    pub fn with_exit_when_exhausted(mut self, exit: bool) -> Self {
        self.exit_when_exhausted = exit;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run until exhausted or told to quit.
    ///
    /// When `commands` disconnects the loop keeps ticking; once the
    /// controller is exhausted with no command source left, it returns.
    /// A controller left paused by a disconnected channel can never resume,
    /// so the loop returns [`RunOutcome::Stalled`].
    pub fn run<R: FrameSink + ?Sized>(
        &self,
        controller: &mut PlaybackController,
        renderer: &mut R,
        commands: &Receiver<PlaybackCommand>,
    ) -> RunOutcome {
        let ticker = tick(self.interval);
        let closed: Receiver<PlaybackCommand> = never();
        let mut commands_open = true;

        tracing::info!(
            "Starting playback of {} frames every {:?}",
            controller.len(),
            self.interval
        );

        loop {
            if controller.is_exhausted() && (self.exit_when_exhausted || !commands_open) {
                tracing::info!("Playback finished at frame {}", controller.index());
                return RunOutcome::Exhausted;
            }

            if !commands_open && controller.is_paused() {
                tracing::warn!(
                    "Playback paused at frame {} with no command source left",
                    controller.index()
                );
                return RunOutcome::Stalled;
            }

            let command_rx = if commands_open { commands } else { &closed };

            select! {
                recv(ticker) -> _ => {
                    controller.tick(renderer);
                }
                recv(command_rx) -> msg => match msg {
                    Ok(PlaybackCommand::TogglePause) => {
                        controller.toggle_pause();
                        tracing::info!(
                            "Playback {} at frame {}",
                            controller.state().display_name(),
                            controller.index()
                        );
                    }
                    Ok(PlaybackCommand::Quit) => {
                        tracing::info!("Playback stopped at frame {}", controller.index());
                        return RunOutcome::Quit;
                    }
                    Err(_) => {
                        tracing::debug!("Command channel closed");
                        commands_open = false;
                    }
                },
            }
        }
    }
}
