#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave sequencing and pass/fail evaluation for a single level.

use duck_hunt_core::{CoreError, LevelDefinition, LevelOutcome, LevelStats, SuccessRatio, WaveStats};

/// Aggregates wave statistics for the current level and decides its outcome.
#[derive(Clone, Debug)]
pub struct LevelController {
    success_ratio: SuccessRatio,
    stats: Option<LevelStats>,
    wave_index: u32,
    wave_count: u32,
}

impl LevelController {
    /// Creates a controller that passes levels meeting `success_ratio`.
    #[must_use]
    pub const fn new(success_ratio: SuccessRatio) -> Self {
        Self {
            success_ratio,
            stats: None,
            wave_index: 0,
            wave_count: 0,
        }
    }

    /// Resets statistics and the wave index for `level`.
    pub fn start_level(&mut self, level: &LevelDefinition) {
        self.stats = Some(LevelStats::new(level.id(), level.total_ducks()));
        self.wave_index = 0;
        self.wave_count = level.wave_count();
    }

    /// Moves to the next wave.
    ///
    /// Returns the one-based index of the wave to start, or `None` once every
    /// wave of the level has been played.
    pub fn advance_wave(&mut self) -> Option<u32> {
        if self.stats.is_none() || self.wave_index >= self.wave_count {
            return None;
        }
        self.wave_index += 1;
        Some(self.wave_index)
    }

    /// Folds a finalized wave into the level statistics.
    pub fn record_wave(&mut self, wave: &WaveStats) -> Result<(), CoreError> {
        let stats = self.stats.as_mut().ok_or(CoreError::InvalidStateTransition {
            operation: "record_wave",
            state: "no level started",
        })?;
        stats.fold(wave);
        Ok(())
    }

    /// Reports whether `wave_index` is the last wave of a level with `wave_count` waves.
    #[must_use]
    pub const fn is_complete(wave_index: u32, wave_count: u32) -> bool {
        wave_index == wave_count
    }

    /// Reports whether the current wave is the level's last.
    #[must_use]
    pub fn is_level_complete(&self) -> bool {
        self.stats.is_some() && Self::is_complete(self.wave_index, self.wave_count)
    }

    /// Derives the outcome of the level from its statistics.
    pub fn evaluate(&self) -> Result<LevelOutcome, CoreError> {
        let stats = self.stats.as_ref().ok_or(CoreError::InvalidStateTransition {
            operation: "evaluate",
            state: "no level started",
        })?;

        let outcome = if self.success_ratio.is_met_by(stats) {
            LevelOutcome::Pass
        } else {
            LevelOutcome::Fail
        };
        log::info!(
            "level {} evaluated: {}/{} ducks ({:.0}%), needed {:.0}% -> {:?}",
            stats.level_id(),
            stats.ducks_killed(),
            stats.total_ducks(),
            stats.kill_ratio() * 100.0,
            self.success_ratio.get() * 100.0,
            outcome
        );
        Ok(outcome)
    }

    /// Statistics of the current level, if one was started.
    #[must_use]
    pub const fn stats(&self) -> Option<&LevelStats> {
        self.stats.as_ref()
    }

    /// One-based index of the current wave, `0` before the first.
    #[must_use]
    pub const fn wave_index(&self) -> u32 {
        self.wave_index
    }

    /// Number of waves in the current level.
    #[must_use]
    pub const fn wave_count(&self) -> u32 {
        self.wave_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_record_before_start() {
        let mut controller = LevelController::new(SuccessRatio::DEFAULT);

        assert!(controller.record_wave(&WaveStats::new(1)).is_err());
        assert!(controller.evaluate().is_err());
        assert!(controller.advance_wave().is_none());
        assert!(!controller.is_level_complete());
    }

    #[test]
    fn completion_matches_wave_count() {
        assert!(LevelController::is_complete(3, 3));
        assert!(!LevelController::is_complete(2, 3));
    }
}
