#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless driver for the Duck Hunt engine.
//!
//! A [`SimulatedStage`] stands in for rendering, a [`Shooter`] for the player
//! and [`FixedStepFrames`] for the display refresh. Given the same seed and
//! settings a run is fully deterministic.

pub mod frames;
pub mod shooter;
pub mod sinks;
pub mod stage;

use std::{ops::ControlFlow, time::Duration};

use anyhow::{ensure, Result};
use duck_hunt_catalog::LevelCatalog;
use duck_hunt_core::{FrameSource, GamePhase, GameState, HudFrame, LevelStats, ManualClock};
use duck_hunt_game::{Collaborators, GameConfig, GameController};

pub use frames::FixedStepFrames;
pub use shooter::Shooter;
pub use sinks::{LogAudio, LogHud};
pub use stage::SimulatedStage;

/// Knobs of a simulated run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationSettings {
    /// Seed shared by the stage and the shooter.
    pub seed: u64,
    /// Shooter accuracy in `[0, 1]`.
    pub accuracy: f32,
    /// Length of one frame.
    pub frame_step: Duration,
    /// Frames after which the run is abandoned.
    pub max_frames: u64,
    /// Automatic retries granted after a defeat.
    pub retries: u32,
    /// Frames between two shots.
    pub shot_interval_frames: u32,
    /// Frames that intro cards and escape flights last.
    pub animation_frames: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            accuracy: 0.75,
            frame_step: Duration::from_millis(16),
            max_frames: 250_000,
            retries: 0,
            shot_interval_frames: 24,
            animation_frames: 45,
        }
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every level was passed.
    Victory,
    /// A level was failed with no retries left.
    Defeat,
    /// The frame budget ran out first.
    Unfinished,
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    /// Terminal result.
    pub outcome: RunOutcome,
    /// Frames simulated.
    pub frames: u64,
    /// Retries consumed.
    pub retries_used: u32,
    /// Final game snapshot.
    pub state: GameState,
    /// Shots fired over the whole run.
    pub shots_fired: u32,
    /// Ducks shot over the whole run.
    pub ducks_shot: u32,
    /// Statistics of every passed level.
    pub history: Vec<LevelStats>,
    /// Last values pushed to the HUD.
    pub hud: Option<HudFrame>,
    /// Updates the HUD received over the run.
    pub hud_updates: u64,
}

type SimulatedGame = GameController<SimulatedStage, LogHud, LogAudio, ManualClock>;

/// Plays `catalog` from the first level until victory, final defeat or the frame budget.
pub fn run_simulation(
    catalog: LevelCatalog,
    config: GameConfig,
    settings: &SimulationSettings,
) -> Result<SimulationReport> {
    ensure!(!settings.frame_step.is_zero(), "frame step must be positive");

    let clock = ManualClock::new();
    let mut shooter = Shooter::new(
        settings.seed,
        settings.accuracy,
        settings.shot_interval_frames,
    )?;
    let mut game: SimulatedGame = GameController::new(
        catalog,
        config,
        Collaborators {
            stage: SimulatedStage::new(settings.seed, settings.animation_frames),
            hud: LogHud::default(),
            audio: LogAudio,
            clock: clock.clone(),
        },
    );

    log::info!(
        "simulating with seed {} at accuracy {:.2}",
        settings.seed,
        settings.accuracy
    );
    game.start();

    let mut retries_used = 0;
    let frames = FixedStepFrames::new(settings.frame_step, settings.max_frames, clock).run(|dt| {
        if let Some(token) = game.stage_mut().advance(dt) {
            game.complete_transition(token);
        }
        if game.phase() == GamePhase::WaveActive {
            if let Some(point) = shooter.aim(game.stage()) {
                let _ = game.on_shot(point);
            }
        }
        let _ = game.tick();

        match game.phase() {
            GamePhase::Victory => ControlFlow::Break(()),
            GamePhase::Defeat if retries_used < settings.retries => {
                retries_used += 1;
                game.retry();
                ControlFlow::Continue(())
            }
            GamePhase::Defeat => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });

    let outcome = match game.phase() {
        GamePhase::Victory => RunOutcome::Victory,
        GamePhase::Defeat => RunOutcome::Defeat,
        _ => RunOutcome::Unfinished,
    };
    log::info!("run finished after {frames} frames: {outcome:?}");

    Ok(SimulationReport {
        outcome,
        frames,
        retries_used,
        state: game.state(),
        shots_fired: game.scoreboard().shots_fired(),
        ducks_shot: game.scoreboard().ducks_shot_total(),
        history: game.level_history().to_vec(),
        hud: game.hud().latest().cloned(),
        hud_updates: game.hud().updates(),
    })
}
