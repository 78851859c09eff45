//! Frame controller
//!
//! Owns the per-frame pipeline: overload check, finger extraction,
//! classification and voting. Decisions and operator triggers go to the
//! command queue; nothing here touches the serial port.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use palmlight_core::config::ControlConfig;
use palmlight_core::gesture::classify;
use palmlight_core::hand::{extract_fingers, FingerVector, HandLandmarks};
use palmlight_core::safety::{OverloadGuard, OverloadStatus};
use palmlight_core::state::{Event, LossCause};
use palmlight_core::voter::{Decision, Observation, StabilityVoter};
use palmlight_core::PipelineError;
use palmlight_protocol::{Command, FrameRecord, HandSample, InputEvent};
use tracing::{debug, info, warn};

use crate::channels::Dispatcher;

/// Frame rate counter
#[derive(Debug, Clone)]
pub struct FrameStats {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl FrameStats {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0,
        }
    }

    /// Count a frame; returns the rate when a window closes
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.window_start) < Self::WINDOW {
            return None;
        }
        self.fps = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    /// Rate of the last completed window
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Per-frame decision pipeline
pub struct Controller<'a> {
    guard: OverloadGuard,
    voter: StabilityVoter,
    commands: &'a Dispatcher,
    stats: FrameStats,
    /// Overload state of the previous frame, for change logging
    overloaded: bool,
}

impl<'a> Controller<'a> {
    pub fn new(config: &ControlConfig, commands: &'a Dispatcher) -> Self {
        Self {
            guard: OverloadGuard::new(config.overload),
            voter: StabilityVoter::new(config.voter),
            commands,
            stats: FrameStats::new(Instant::now()),
            overloaded: false,
        }
    }

    /// Process one frame
    ///
    /// Returns the decision that was queued, if any. Malformed hand
    /// samples are logged and the frame is skipped.
    pub fn handle_frame(&mut self, frame: &FrameRecord, now: Instant) -> Option<Decision> {
        if let Some(fps) = self.stats.tick(now) {
            debug!(fps, "frame rate");
        }

        let observation = match self.read_frame(frame) {
            Ok(fingers) => Observation::Hand {
                label: classify(&fingers),
                fingers,
            },
            Err(PipelineError::NoHandDetected) => Observation::Lost(LossCause::NoHand),
            Err(PipelineError::OverloadDetected) => Observation::Lost(LossCause::Overload),
            Err(err) => {
                warn!(error = %err, "skipping malformed frame");
                return None;
            }
        };

        let decision = self.voter.observe(observation);

        for (digit, edge) in self.voter.snapshot().edges() {
            debug!(digit = digit.name(), ?edge, "digit changed");
        }

        if let Some(decision) = decision {
            match decision.event {
                Event::GestureDispatched(label) => {
                    info!(command = %decision.command, gesture = label.name(), "gesture locked")
                }
                Event::ForcedOff(reason) => {
                    info!(command = %decision.command, ?reason, "forced off")
                }
                _ => {}
            }
            self.enqueue(decision.command);
        }
        decision
    }

    /// Handle an operator trigger
    ///
    /// Breaks on [`InputEvent::Quit`].
    pub fn handle_input(&mut self, event: InputEvent) -> ControlFlow<()> {
        match event {
            InputEvent::Test => {
                info!("manual TEST");
                self.enqueue(Command::Test);
            }
            InputEvent::Reset => {
                info!("history and finger state reset");
                self.voter.reset();
            }
            InputEvent::Quit => {
                info!("quit requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Leave the actuator off before exit
    pub fn shutdown(&mut self) {
        if self.voter.last_command() != Some(Command::AllOff) {
            info!("switching LEDs off for shutdown");
            self.enqueue(Command::AllOff);
        }
    }

    pub fn voter(&self) -> &StabilityVoter {
        &self.voter
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn read_frame(&mut self, frame: &FrameRecord) -> Result<FingerVector, PipelineError> {
        let status = self.guard.update(frame.luminance);
        self.log_overload(status);
        if status.is_overloaded() {
            return Err(PipelineError::OverloadDetected);
        }

        match frame.hand.as_ref() {
            None => extract_fingers(None).map(|reading| reading.fingers),
            Some(HandSample::Landmarks(points)) => {
                let hand = HandLandmarks::from_points(points)?;
                extract_fingers(Some(&hand)).map(|reading| reading.fingers)
            }
            Some(HandSample::Digits(states)) => Ok(FingerVector::from_slice(states)?),
        }
    }

    fn log_overload(&mut self, status: OverloadStatus) {
        match (self.overloaded, status) {
            (false, OverloadStatus::Overloaded { mean }) => {
                warn!(mean, "lighting overload, ignoring detections")
            }
            (true, OverloadStatus::Normal) => info!("lighting back to normal"),
            _ => {}
        }
        self.overloaded = status.is_overloaded();
    }

    fn enqueue(&self, command: Command) {
        if let Some(evicted) = self.commands.enqueue(command) {
            warn!(%evicted, "command queue full, dropped oldest");
        }
    }
}
