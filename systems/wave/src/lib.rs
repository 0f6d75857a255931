#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Lifecycle of a single wave.
//!
//! A [`WaveController`] moves through `NotStarted → Active → Ending → Done`
//! exactly once. It owns the wave's [`TargetPool`], [`AmmoTracker`] and
//! [`WaveClock`] and decides when the wave must end and why. The game
//! controller builds a fresh instance for every wave and drops it once the
//! finalized [`WaveStats`] have been collected.

pub mod ammo;
pub mod clock;

use std::time::Duration;

pub use ammo::{AmmoReading, AmmoTracker};
pub use clock::WaveClock;

use duck_hunt_core::{
    Clock, CoreError, LevelDefinition, ScreenPoint, ShotReport, Stage, TargetId,
    TargetIdSequence, WaveEndReason, WaveStats,
};
use duck_hunt_system_targets::TargetPool;

/// Lifecycle state of a [`WaveController`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveState {
    /// Constructed; no targets released yet.
    #[default]
    NotStarted,
    /// Targets are flying and shots are accepted.
    Active,
    /// Survivors are being cleared.
    Ending,
    /// Statistics are final.
    Done,
}

impl WaveState {
    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "wave not started",
            Self::Active => "wave active",
            Self::Ending => "wave ending",
            Self::Done => "wave done",
        }
    }
}

/// Result of ending a wave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveSummary {
    /// Finalized statistics.
    pub stats: WaveStats,
    /// Targets forced to escape, in release order.
    pub escaped: Vec<TargetId>,
}

/// Orchestrates one wave using its pool, magazine and clock.
#[derive(Debug, Default)]
pub struct WaveController {
    state: WaveState,
    pool: TargetPool,
    ammo: AmmoTracker,
    clock: WaveClock,
    stats: WaveStats,
    duck_count: u32,
    time_limit: Duration,
}

impl WaveController {
    /// Creates a controller in [`WaveState::NotStarted`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the magazine, starts the clock and releases the wave's ducks.
    pub fn start_wave<S: Stage, C: Clock>(
        &mut self,
        level: &LevelDefinition,
        wave_index: u32,
        ids: &mut TargetIdSequence,
        stage: &mut S,
        clock: &C,
    ) -> Result<(), CoreError> {
        self.expect_state(WaveState::NotStarted, "start_wave")?;

        self.ammo.set_ammo(level.bullets_per_wave());
        self.clock.start(clock);
        self.stats = WaveStats::new(wave_index);
        self.duck_count = level.duck_count();
        self.time_limit = level.time_limit();
        let _ = self
            .pool
            .release(level.duck_count(), level.duck_speed(), ids, stage);
        self.state = WaveState::Active;

        log::debug!(
            "wave {wave_index} of level {} started: {} ducks, {} bullets, {:.1}s",
            level.id(),
            level.duck_count(),
            level.bullets_per_wave(),
            level.time_limit_seconds()
        );
        Ok(())
    }

    /// Spends a shot at `point` and registers every target the stage reports under it.
    pub fn on_shot_fired<S: Stage>(
        &mut self,
        point: ScreenPoint,
        stage: &mut S,
    ) -> Result<ShotReport, CoreError> {
        self.expect_state(WaveState::Active, "on_shot_fired")?;

        let reading = self.ammo.consume_one()?;
        self.stats.shots_fired = self.stats.shots_fired.saturating_add(1);

        let mut report = ShotReport::default();
        for id in stage.hit_test(point) {
            if self.pool.register_hit(id).accepted {
                report.hits = report.hits.saturating_add(1);
            }
        }
        self.stats.ducks_shot = self.stats.ducks_shot.saturating_add(report.hits);

        log::debug!(
            "shot at ({:.0}, {:.0}): {} hit(s), {} bullet(s) left",
            point.x,
            point.y,
            report.hits,
            reading.remaining
        );
        Ok(report)
    }

    /// Reports whether the wave must end now.
    #[must_use]
    pub fn should_end<C: Clock>(&self, clock: &C) -> bool {
        self.end_reason(clock).is_some()
    }

    /// Resolves why the wave must end, if it must.
    ///
    /// Only an active wave can end. Simultaneous conditions resolve in the
    /// order documented on [`WaveEndReason`].
    #[must_use]
    pub fn end_reason<C: Clock>(&self, clock: &C) -> Option<WaveEndReason> {
        if self.state != WaveState::Active {
            return None;
        }

        if self.pool.is_empty() {
            Some(WaveEndReason::Eliminated)
        } else if self.clock.is_time_up(clock, self.time_limit) {
            Some(WaveEndReason::TimeExpired)
        } else if self.ammo.remaining() == 0 {
            Some(WaveEndReason::OutOfAmmo)
        } else {
            None
        }
    }

    /// Clears survivors and finalizes the wave statistics.
    pub fn end_wave(&mut self) -> Result<WaveSummary, CoreError> {
        self.expect_state(WaveState::Active, "end_wave")?;
        self.state = WaveState::Ending;

        let escaped = if self.pool.is_empty() {
            Vec::new()
        } else {
            self.pool.force_escape_all()
        };
        self.stats.ducks_missed = self.duck_count.saturating_sub(self.stats.ducks_shot);
        self.state = WaveState::Done;

        log::debug!(
            "wave {} done: {} shot, {} missed, {} shots fired",
            self.stats.wave_index,
            self.stats.ducks_shot,
            self.stats.ducks_missed,
            self.stats.shots_fired
        );
        Ok(WaveSummary {
            stats: self.stats,
            escaped,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> WaveState {
        self.state
    }

    /// Statistics gathered so far.
    #[must_use]
    pub const fn stats(&self) -> &WaveStats {
        &self.stats
    }

    /// Shots left in the magazine.
    #[must_use]
    pub const fn ammo_remaining(&self) -> u32 {
        self.ammo.remaining()
    }

    /// Ducks still flying.
    #[must_use]
    pub fn live_count(&self) -> u32 {
        self.pool.live_count()
    }

    fn expect_state(&self, expected: WaveState, operation: &'static str) -> Result<(), CoreError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CoreError::InvalidStateTransition {
                operation,
                state: self.state.label(),
            })
        }
    }
}
