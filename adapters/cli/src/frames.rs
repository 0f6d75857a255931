//! Fixed-step frame source driving a [`ManualClock`].

use std::{ops::ControlFlow, time::Duration};

use duck_hunt_core::{FrameSource, ManualClock};

/// Produces frames of a constant length as fast as the callback returns,
/// advancing the shared clock before each one.
#[derive(Clone, Debug)]
pub struct FixedStepFrames {
    step: Duration,
    max_frames: u64,
    clock: ManualClock,
}

impl FixedStepFrames {
    /// Creates a source producing at most `max_frames` frames of `step` each.
    #[must_use]
    pub fn new(step: Duration, max_frames: u64, clock: ManualClock) -> Self {
        Self {
            step,
            max_frames,
            clock,
        }
    }
}

impl FrameSource for FixedStepFrames {
    fn run<F>(self, mut on_frame: F) -> u64
    where
        F: FnMut(Duration) -> ControlFlow<()>,
    {
        let mut frames = 0;
        while frames < self.max_frames {
            self.clock.advance(self.step);
            frames += 1;
            if on_frame(self.step).is_break() {
                break;
            }
        }
        frames
    }
}
