//! Simulated player aiming at the ducks on a [`SimulatedStage`].

use anyhow::{ensure, Context, Result};
use duck_hunt_core::ScreenPoint;
use glam::Vec2;
use rand::{seq::IteratorRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::stage::{SimulatedStage, HIT_RADIUS};

/// Decorrelates the shooter's stream from the stage's when both share a seed.
const SEED_SALT: u64 = 0x5eed_d0c5;

/// Fires at a randomly chosen flying duck every few frames, missing by a
/// normally distributed offset that shrinks as accuracy grows.
#[derive(Debug)]
pub struct Shooter {
    rng: ChaCha8Rng,
    jitter: Normal<f32>,
    interval_frames: u32,
    cooldown: u32,
}

impl Shooter {
    /// Creates a shooter with `accuracy` in `[0, 1]` firing every `interval_frames` frames.
    pub fn new(seed: u64, accuracy: f32, interval_frames: u32) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&accuracy),
            "accuracy {accuracy} must lie in [0, 1]"
        );
        ensure!(interval_frames > 0, "shot interval must be at least one frame");

        let spread = HIT_RADIUS * 4.0 * (1.0 - accuracy) + 1.0;
        let jitter = Normal::new(0.0, spread).context("invalid aim spread")?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ SEED_SALT),
            jitter,
            interval_frames,
            cooldown: interval_frames,
        })
    }

    /// Called once per active frame; returns where to shoot when the shooter fires.
    ///
    /// Holds fire while nothing is flying.
    pub fn aim(&mut self, stage: &SimulatedStage) -> Option<ScreenPoint> {
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 {
            return None;
        }

        let target = stage.flying().choose(&mut self.rng)?;
        self.cooldown = self.interval_frames;
        let offset = Vec2::new(
            self.jitter.sample(&mut self.rng),
            self.jitter.sample(&mut self.rng),
        );
        Some(target + offset)
    }
}
