#![allow(dead_code)]

use duck_hunt_catalog::LevelCatalog;
use duck_hunt_core::{
    Audio, AudioCue, Hud, HudFrame, LevelDefinition, LevelId, ManualClock, ScreenPoint,
    ShotReport, Stage, SuccessRatio, Target, TargetId, Transition, TransitionToken,
};
use duck_hunt_game::{Collaborators, GameConfig, GameController};

/// Stage whose hit-test resolves the target whose id equals the shot's x coordinate.
#[derive(Debug)]
pub struct ScriptedStage {
    pub releases: Vec<Vec<TargetId>>,
    pub intro_mode: Transition,
    pub escape_mode: Transition,
    pub intros: Vec<TransitionToken>,
    pub escapes: Vec<(Vec<TargetId>, TransitionToken)>,
    pub cleared: u32,
    pub animating: bool,
}

impl ScriptedStage {
    pub fn immediate() -> Self {
        Self::with_modes(Transition::Complete, Transition::Complete)
    }

    pub fn with_modes(intro_mode: Transition, escape_mode: Transition) -> Self {
        Self {
            releases: Vec::new(),
            intro_mode,
            escape_mode,
            intros: Vec::new(),
            escapes: Vec::new(),
            cleared: 0,
            animating: false,
        }
    }

    pub fn latest_release(&self) -> &[TargetId] {
        self.releases.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Stage for ScriptedStage {
    fn release_targets(&mut self, targets: &[Target], _speed: u32) {
        self.releases
            .push(targets.iter().map(Target::id).collect());
    }

    fn hit_test(&mut self, point: ScreenPoint) -> Vec<TargetId> {
        if point.x <= 0.0 {
            return Vec::new();
        }
        vec![TargetId::new(point.x as u32)]
    }

    fn play_level_intro(&mut self, _level: &LevelDefinition, token: TransitionToken) -> Transition {
        self.intros.push(token);
        self.intro_mode
    }

    fn play_escape_animation(&mut self, escaped: &[TargetId], token: TransitionToken) -> Transition {
        self.escapes.push((escaped.to_vec(), token));
        self.escape_mode
    }

    fn clear_targets(&mut self) {
        self.cleared += 1;
    }

    fn animation_in_flight(&self) -> bool {
        self.animating
    }
}

#[derive(Debug, Default)]
pub struct RecordingHud {
    pub initialized: u32,
    pub frames: Vec<HudFrame>,
}

impl RecordingHud {
    pub fn latest(&self) -> &HudFrame {
        self.frames.last().expect("at least one HUD update")
    }
}

impl Hud for RecordingHud {
    fn initialize(&mut self, _frame: &HudFrame) {
        self.initialized += 1;
    }

    fn update(&mut self, frame: &HudFrame) {
        self.frames.push(frame.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<AudioCue>,
    pub stopped: Vec<AudioCue>,
}

impl Audio for RecordingAudio {
    fn play(&mut self, cue: AudioCue) {
        self.played.push(cue);
    }

    fn stop(&mut self, cue: AudioCue) {
        self.stopped.push(cue);
    }
}

pub type TestGame = GameController<ScriptedStage, RecordingHud, RecordingAudio, ManualClock>;

pub fn level(id: u32, ducks: u32, waves: u32, bullets: u32, seconds: f32) -> LevelDefinition {
    LevelDefinition::new(
        LevelId::new(id),
        format!("Level {id}"),
        ducks,
        waves,
        5,
        seconds,
        bullets,
        100,
    )
}

pub fn game_with_stage(
    levels: Vec<LevelDefinition>,
    ratio: f32,
    stage: ScriptedStage,
) -> (TestGame, ManualClock) {
    let catalog = LevelCatalog::from_levels(levels).expect("valid catalog");
    let config = GameConfig::new(SuccessRatio::new(ratio).expect("valid ratio"));
    let clock = ManualClock::new();
    let game = GameController::new(
        catalog,
        config,
        Collaborators {
            stage,
            hud: RecordingHud::default(),
            audio: RecordingAudio::default(),
            clock: clock.clone(),
        },
    );
    (game, clock)
}

pub fn started_game(levels: Vec<LevelDefinition>, ratio: f32) -> (TestGame, ManualClock) {
    let (mut game, clock) = game_with_stage(levels, ratio, ScriptedStage::immediate());
    game.start();
    (game, clock)
}

/// Shoots the `index`-th duck of the most recent release.
pub fn shoot_duck(game: &mut TestGame, index: usize) -> ShotReport {
    let id = game.stage().latest_release()[index];
    game.on_shot(ScreenPoint::new(id.get() as f32, 0.0))
}

pub fn miss(game: &mut TestGame) -> ShotReport {
    game.on_shot(ScreenPoint::new(-10.0, -10.0))
}
