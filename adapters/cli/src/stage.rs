//! Headless stand-in for the rendered sky.

use std::time::Duration;

use duck_hunt_core::{
    LevelDefinition, ScreenPoint, Stage, Target, TargetId, Transition, TransitionToken,
};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Width of the simulated sky in screen units.
pub const FIELD_WIDTH: f32 = 800.0;
/// Height of the simulated sky in screen units.
pub const FIELD_HEIGHT: f32 = 600.0;
/// Distance from a duck's centre within which a shot hits it.
pub const HIT_RADIUS: f32 = 24.0;

/// Screen units per second contributed by one point of level speed.
const SPEED_SCALE: f32 = 40.0;
const ESCAPE_SPEED: f32 = 600.0;
const FALL_FRAMES: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq)]
struct SimDuck {
    id: TargetId,
    position: Vec2,
    velocity: Vec2,
    escaping: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Sequence {
    token: TransitionToken,
    frames_left: u32,
}

/// Stage that moves ducks around a bounded field and resolves shots by distance.
///
/// Level intros and escape flights last a fixed number of frames and are
/// reported back through [`SimulatedStage::advance`].
#[derive(Debug)]
pub struct SimulatedStage {
    rng: ChaCha8Rng,
    ducks: Vec<SimDuck>,
    falling: Vec<(TargetId, u32)>,
    sequence: Option<Sequence>,
    animation_frames: u32,
}

impl SimulatedStage {
    /// Creates an empty sky. Sequences last `animation_frames` frames; zero
    /// makes them complete synchronously.
    #[must_use]
    pub fn new(seed: u64, animation_frames: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ducks: Vec::new(),
            falling: Vec::new(),
            sequence: None,
            animation_frames,
        }
    }

    /// Moves every duck by `dt` and steps running sequences.
    ///
    /// Returns the token of a sequence that finished during this frame.
    pub fn advance(&mut self, dt: Duration) -> Option<TransitionToken> {
        let seconds = dt.as_secs_f32();
        for duck in &mut self.ducks {
            duck.position += duck.velocity * seconds;
            if duck.escaping {
                continue;
            }
            if !(0.0..=FIELD_WIDTH).contains(&duck.position.x) {
                duck.velocity.x = -duck.velocity.x;
                duck.position.x = duck.position.x.clamp(0.0, FIELD_WIDTH);
            }
            if !(0.0..=FIELD_HEIGHT).contains(&duck.position.y) {
                duck.velocity.y = -duck.velocity.y;
                duck.position.y = duck.position.y.clamp(0.0, FIELD_HEIGHT);
            }
        }

        self.falling.retain_mut(|(_, frames)| {
            *frames = frames.saturating_sub(1);
            *frames > 0
        });

        let sequence = self.sequence.as_mut()?;
        sequence.frames_left = sequence.frames_left.saturating_sub(1);
        if sequence.frames_left > 0 {
            return None;
        }
        let finished = self.sequence.take()?;
        self.ducks.retain(|duck| !duck.escaping);
        Some(finished.token)
    }

    /// Positions of the ducks a shooter can still aim at.
    pub fn flying(&self) -> impl Iterator<Item = ScreenPoint> + '_ {
        self.ducks
            .iter()
            .filter(|duck| !duck.escaping)
            .map(|duck| duck.position)
    }

    /// Number of ducks still shown, escaping ones included.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.ducks.len()
    }

    fn begin_sequence(&mut self, token: TransitionToken) -> Transition {
        if self.animation_frames == 0 {
            return Transition::Complete;
        }
        self.sequence = Some(Sequence {
            token,
            frames_left: self.animation_frames,
        });
        Transition::Pending
    }
}

impl Stage for SimulatedStage {
    fn release_targets(&mut self, targets: &[Target], speed: u32) {
        let magnitude = speed as f32 * SPEED_SCALE;
        for target in targets {
            let position = Vec2::new(
                self.rng.gen_range(0.0..FIELD_WIDTH),
                self.rng.gen_range(FIELD_HEIGHT * 0.5..FIELD_HEIGHT),
            );
            let heading = self
                .rng
                .gen_range(std::f32::consts::PI..std::f32::consts::TAU);
            self.ducks.push(SimDuck {
                id: target.id(),
                position,
                velocity: Vec2::from_angle(heading) * magnitude,
                escaping: false,
            });
        }
    }

    fn hit_test(&mut self, point: ScreenPoint) -> Vec<TargetId> {
        let radius_squared = HIT_RADIUS * HIT_RADIUS;
        let mut hits = Vec::new();
        self.ducks.retain(|duck| {
            let hit = !duck.escaping && duck.position.distance_squared(point) <= radius_squared;
            if hit {
                hits.push(duck.id);
            }
            !hit
        });
        self.falling
            .extend(hits.iter().map(|&id| (id, FALL_FRAMES)));
        hits
    }

    fn play_level_intro(&mut self, level: &LevelDefinition, token: TransitionToken) -> Transition {
        log::debug!("intro card: {}", level.title());
        self.begin_sequence(token)
    }

    fn play_escape_animation(&mut self, escaped: &[TargetId], token: TransitionToken) -> Transition {
        for duck in &mut self.ducks {
            if escaped.contains(&duck.id) {
                duck.escaping = true;
                duck.velocity = Vec2::new(0.0, -ESCAPE_SPEED);
            }
        }
        let transition = self.begin_sequence(token);
        if transition == Transition::Complete {
            self.ducks.retain(|duck| !duck.escaping);
        }
        transition
    }

    fn clear_targets(&mut self) {
        self.ducks.clear();
        self.falling.clear();
    }

    fn animation_in_flight(&self) -> bool {
        !self.falling.is_empty()
    }
}
