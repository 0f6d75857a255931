//! Elapsed time of the active wave, evaluated on demand.

use std::time::Duration;

use duck_hunt_core::Clock;

/// Records when a wave started and derives elapsed time from a [`Clock`].
///
/// There are no timers to cancel: the per-frame tick polls [`Self::is_time_up`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveClock {
    started_at: Option<Duration>,
}

impl WaveClock {
    /// Creates a clock that has not been started.
    #[must_use]
    pub const fn new() -> Self {
        Self { started_at: None }
    }

    /// Records the wave start timestamp.
    pub fn start<C: Clock>(&mut self, clock: &C) {
        self.started_at = Some(clock.now());
    }

    /// Time elapsed since [`Self::start`]; zero before it.
    #[must_use]
    pub fn elapsed<C: Clock>(&self, clock: &C) -> Duration {
        self.started_at
            .map_or(Duration::ZERO, |start| clock.now().saturating_sub(start))
    }

    /// Seconds elapsed since [`Self::start`].
    #[must_use]
    pub fn elapsed_seconds<C: Clock>(&self, clock: &C) -> f32 {
        self.elapsed(clock).as_secs_f32()
    }

    /// Reports whether `limit` has elapsed. Never true before [`Self::start`].
    #[must_use]
    pub fn is_time_up<C: Clock>(&self, clock: &C, limit: Duration) -> bool {
        self.started_at.is_some() && self.elapsed(clock) >= limit
    }
}
