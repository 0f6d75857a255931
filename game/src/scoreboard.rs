//! Running tallies shown on the HUD.

/// Accumulates shots, kills, escapes and score.
///
/// Kill and escape counts restart with every level; score and shot totals
/// span the whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u64,
    shots_fired: u32,
    ducks_shot_total: u32,
    ducks_shot: u32,
    ducks_missed: u32,
}

impl ScoreBoard {
    /// Creates an empty scoreboard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            shots_fired: 0,
            ducks_shot_total: 0,
            ducks_shot: 0,
            ducks_missed: 0,
        }
    }

    /// Clears the per-level tallies.
    pub fn begin_level(&mut self) {
        self.ducks_shot = 0;
        self.ducks_missed = 0;
    }

    /// Records a shot that eliminated `hits` ducks worth `points_per_duck` each.
    pub fn record_shot(&mut self, hits: u32, points_per_duck: u32) {
        self.shots_fired = self.shots_fired.saturating_add(1);
        self.ducks_shot = self.ducks_shot.saturating_add(hits);
        self.ducks_shot_total = self.ducks_shot_total.saturating_add(hits);
        self.score = self
            .score
            .saturating_add(u64::from(hits) * u64::from(points_per_duck));
    }

    /// Records ducks that escaped at the end of a wave.
    pub fn record_missed(&mut self, missed: u32) {
        self.ducks_missed = self.ducks_missed.saturating_add(missed);
    }

    /// Score accumulated over the run.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Shots fired over the run.
    #[must_use]
    pub const fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Ducks shot over the run.
    #[must_use]
    pub const fn ducks_shot_total(&self) -> u32 {
        self.ducks_shot_total
    }

    /// Ducks shot during the current level.
    #[must_use]
    pub const fn ducks_shot(&self) -> u32 {
        self.ducks_shot
    }

    /// Ducks escaped during the current level.
    #[must_use]
    pub const fn ducks_missed(&self) -> u32 {
        self.ducks_missed
    }
}
