#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Duck Hunt.
//!
//! [`GameController`] owns level progression and exposes the three entry
//! points the presentation layer drives: [`GameController::tick`] once per
//! frame, [`GameController::on_shot`] for every normalized shot, and
//! [`GameController::complete_transition`] when a deferred presentation
//! sequence finishes. Each call runs to completion before the next one starts,
//! so wave-end races are resolved inside a single tick.

pub mod config;
pub mod scoreboard;

pub use config::{ConfigError, GameConfig};
pub use scoreboard::ScoreBoard;

use duck_hunt_catalog::LevelCatalog;
use duck_hunt_core::{
    Audio, AudioCue, Clock, CoreError, GamePhase, GameState, GameStatus, Hud, HudFrame,
    LevelDefinition, LevelOutcome, LevelStats, ScreenPoint, ShotReport, Stage, TargetIdSequence,
    Transition, TransitionKind, TransitionToken, WaveEndReason, WaveStats,
};
use duck_hunt_system_level::LevelController;
use duck_hunt_system_wave::WaveController;

/// External services injected into a [`GameController`].
#[derive(Debug)]
pub struct Collaborators<S, H, A, C> {
    /// Renders ducks and performs hit-testing.
    pub stage: S,
    /// Displays score, bullets, wave and status.
    pub hud: H,
    /// Plays sound cues.
    pub audio: A,
    /// Monotonic time source for wave timing.
    pub clock: C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingTransition {
    LevelIntro(TransitionToken),
    WaveEscape(TransitionToken, WaveStats),
}

impl PendingTransition {
    const fn token(&self) -> TransitionToken {
        match self {
            Self::LevelIntro(token) | Self::WaveEscape(token, _) => *token,
        }
    }
}

/// Top-level state machine driving levels and waves.
#[derive(Debug)]
pub struct GameController<S, H, A, C> {
    catalog: LevelCatalog,
    stage: S,
    hud: H,
    audio: A,
    clock: C,
    level: LevelController,
    wave: Option<WaveController>,
    scoreboard: ScoreBoard,
    ids: TargetIdSequence,
    phase: GamePhase,
    current_level_index: usize,
    generation: u64,
    pending: Option<PendingTransition>,
    input_bound: bool,
    hud_initialized: bool,
    status: GameStatus,
    last_end_reason: Option<WaveEndReason>,
    history: Vec<LevelStats>,
}

impl<S, H, A, C> GameController<S, H, A, C>
where
    S: Stage,
    H: Hud,
    A: Audio,
    C: Clock,
{
    /// Creates an idle controller. Nothing happens until [`Self::start`].
    #[must_use]
    pub fn new(
        catalog: LevelCatalog,
        config: GameConfig,
        collaborators: Collaborators<S, H, A, C>,
    ) -> Self {
        let Collaborators {
            stage,
            hud,
            audio,
            clock,
        } = collaborators;

        Self {
            catalog,
            stage,
            hud,
            audio,
            clock,
            level: LevelController::new(config.success_ratio()),
            wave: None,
            scoreboard: ScoreBoard::new(),
            ids: TargetIdSequence::new(),
            phase: GamePhase::Idle,
            current_level_index: 0,
            generation: 0,
            pending: None,
            input_bound: false,
            hud_initialized: false,
            status: GameStatus::Blank,
            last_end_reason: None,
            history: Vec::new(),
        }
    }

    /// Builds the HUD and starts the first level.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            report_misuse(&self.misuse("start"));
            return;
        }

        let frame = self.hud_frame();
        self.hud.initialize(&frame);
        self.hud_initialized = true;
        self.start_level();
    }

    /// Per-frame entry point. Ends the active wave once any end condition holds.
    ///
    /// Returns the reason when this tick ended a wave.
    pub fn tick(&mut self) -> Option<WaveEndReason> {
        if self.phase != GamePhase::WaveActive || self.stage.animation_in_flight() {
            return None;
        }

        let wave = self.wave.as_mut()?;
        let reason = wave.end_reason(&self.clock)?;

        self.input_bound = false;
        let summary = match wave.end_wave() {
            Ok(summary) => summary,
            Err(error) => {
                report_misuse(&error);
                return None;
            }
        };

        log::debug!(
            "wave {} ended: {reason:?}",
            summary.stats.wave_index
        );
        self.last_end_reason = Some(reason);
        self.phase = GamePhase::WaveEnding;
        self.audio.stop(AudioCue::WaveStart);
        self.scoreboard.record_missed(summary.stats.ducks_missed);
        self.push_hud();

        if summary.escaped.is_empty() {
            self.stage.clear_targets();
            self.on_wave_done(summary.stats);
            return Some(reason);
        }

        self.audio.play(AudioCue::WaveLost);
        let token = TransitionToken::new(self.generation, TransitionKind::WaveEscape);
        match self.stage.play_escape_animation(&summary.escaped, token) {
            Transition::Complete => self.on_wave_done(summary.stats),
            Transition::Pending => {
                self.pending = Some(PendingTransition::WaveEscape(token, summary.stats));
            }
        }
        Some(reason)
    }

    /// Input entry point for a shot fired at `point`.
    ///
    /// Ignored unless a wave is active and the magazine is not empty.
    pub fn on_shot(&mut self, point: ScreenPoint) -> ShotReport {
        if self.phase != GamePhase::WaveActive || !self.input_bound {
            report_misuse(&self.misuse("on_shot"));
            return ShotReport::default();
        }
        let Some(points_per_duck) = self
            .catalog
            .get(self.current_level_index)
            .map(LevelDefinition::points_per_duck)
        else {
            return ShotReport::default();
        };
        let Some(wave) = self.wave.as_mut() else {
            return ShotReport::default();
        };
        if wave.ammo_remaining() == 0 {
            log::debug!("shot ignored: {}", CoreError::NoAmmo);
            return ShotReport::default();
        }

        self.audio.play(AudioCue::ShotFired);
        match wave.on_shot_fired(point, &mut self.stage) {
            Ok(report) => {
                self.scoreboard.record_shot(report.hits, points_per_duck);
                self.push_hud();
                report
            }
            Err(error) => {
                report_misuse(&error);
                ShotReport::default()
            }
        }
    }

    /// Callback for a deferred presentation sequence identified by `token`.
    ///
    /// Tokens from an earlier generation, or that do not match the pending
    /// sequence, are ignored.
    pub fn complete_transition(&mut self, token: TransitionToken) {
        match self.pending.take() {
            Some(PendingTransition::LevelIntro(pending)) if pending == token => {
                self.finish_intro();
            }
            Some(PendingTransition::WaveEscape(pending, stats)) if pending == token => {
                self.on_wave_done(stats);
            }
            other => {
                log::trace!(
                    "ignoring stale transition {token:?} (pending {:?})",
                    other.map(|pending| pending.token())
                );
                self.pending = other;
            }
        }
    }

    /// Restarts the current level after a defeat.
    pub fn retry(&mut self) {
        if self.phase != GamePhase::Defeat {
            report_misuse(&self.misuse("retry"));
            return;
        }

        log::info!("retrying level {}", self.current_level_index + 1);
        self.status = GameStatus::Blank;
        self.start_level();
    }

    /// Snapshot of the running game.
    #[must_use]
    pub fn state(&self) -> GameState {
        GameState {
            current_level_index: self.current_level_index,
            current_wave_index: self.level.wave_index(),
            ammo_remaining: self.ammo_remaining(),
            score: self.scoreboard.score(),
            phase: self.phase,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Reports whether shot input is currently bound.
    #[must_use]
    pub const fn is_input_bound(&self) -> bool {
        self.input_bound
    }

    /// Running tallies.
    #[must_use]
    pub const fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    /// Statistics of the level in progress.
    #[must_use]
    pub const fn level_stats(&self) -> Option<&LevelStats> {
        self.level.stats()
    }

    /// Final statistics of every passed level, in play order.
    #[must_use]
    pub fn level_history(&self) -> &[LevelStats] {
        &self.history
    }

    /// Reason the most recent wave ended.
    #[must_use]
    pub const fn last_end_reason(&self) -> Option<WaveEndReason> {
        self.last_end_reason
    }

    /// Definition of the level in progress.
    #[must_use]
    pub fn current_level(&self) -> Option<&LevelDefinition> {
        self.catalog.get(self.current_level_index)
    }

    /// Values currently shown on the HUD.
    #[must_use]
    pub fn hud_frame(&self) -> HudFrame {
        HudFrame {
            score: self.scoreboard.score(),
            bullets: self.ammo_remaining(),
            wave: self.level.wave_index(),
            wave_count: self.level.wave_count(),
            ducks_shot: self.scoreboard.ducks_shot(),
            ducks_missed: self.scoreboard.ducks_missed(),
            status: self.status.clone(),
        }
    }

    /// Injected stage.
    #[must_use]
    pub const fn stage(&self) -> &S {
        &self.stage
    }

    /// Injected stage, mutably.
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// Injected HUD.
    #[must_use]
    pub const fn hud(&self) -> &H {
        &self.hud
    }

    /// Injected audio sink.
    #[must_use]
    pub const fn audio(&self) -> &A {
        &self.audio
    }

    fn start_level(&mut self) {
        let Some(level) = self.catalog.get(self.current_level_index) else {
            self.declare_victory();
            return;
        };

        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.wave = None;
        self.input_bound = false;
        self.level.start_level(level);
        self.scoreboard.begin_level();
        self.status = GameStatus::LevelTitle(level.title().to_owned());
        self.phase = GamePhase::LevelTransition;
        log::info!(
            "starting {} ({} waves of {} ducks)",
            level.title(),
            level.wave_count(),
            level.duck_count()
        );

        let token = TransitionToken::new(self.generation, TransitionKind::LevelIntro);
        let transition = self.stage.play_level_intro(level, token);
        self.push_hud();
        match transition {
            Transition::Complete => self.finish_intro(),
            Transition::Pending => self.pending = Some(PendingTransition::LevelIntro(token)),
        }
    }

    fn finish_intro(&mut self) {
        self.status = GameStatus::Blank;
        self.next_wave();
    }

    fn next_wave(&mut self) {
        let Some(wave_index) = self.level.advance_wave() else {
            self.finish_level();
            return;
        };
        let Some(level) = self.catalog.get(self.current_level_index) else {
            self.declare_victory();
            return;
        };

        self.generation = self.generation.wrapping_add(1);
        let mut wave = WaveController::new();
        if let Err(error) =
            wave.start_wave(level, wave_index, &mut self.ids, &mut self.stage, &self.clock)
        {
            report_misuse(&error);
            return;
        }

        self.wave = Some(wave);
        self.phase = GamePhase::WaveActive;
        self.input_bound = true;
        self.audio.play(AudioCue::WaveStart);
        self.push_hud();
    }

    fn on_wave_done(&mut self, stats: WaveStats) {
        self.wave = None;
        self.phase = GamePhase::LevelTransition;
        if let Err(error) = self.level.record_wave(&stats) {
            report_misuse(&error);
        }

        if self.level.is_level_complete() {
            self.finish_level();
        } else {
            self.next_wave();
        }
    }

    fn finish_level(&mut self) {
        let outcome = match self.level.evaluate() {
            Ok(outcome) => outcome,
            Err(error) => {
                report_misuse(&error);
                return;
            }
        };

        match outcome {
            LevelOutcome::Fail => self.declare_defeat(),
            LevelOutcome::Pass => {
                if let Some(stats) = self.level.stats() {
                    self.history.push(*stats);
                }
                self.current_level_index += 1;
                if self.current_level_index < self.catalog.len() {
                    self.start_level();
                } else {
                    self.declare_victory();
                }
            }
        }
    }

    fn declare_victory(&mut self) {
        // Keep pointing at the final level so queries stay valid.
        self.current_level_index = self
            .current_level_index
            .min(self.catalog.len().saturating_sub(1));
        self.phase = GamePhase::Victory;
        self.status = GameStatus::Victory;
        self.input_bound = false;
        self.audio.play(AudioCue::LevelWin);
        self.push_hud();
        log::info!("victory with {} points", self.scoreboard.score());
    }

    fn declare_defeat(&mut self) {
        self.phase = GamePhase::Defeat;
        self.status = GameStatus::Defeat;
        self.input_bound = false;
        self.audio.play(AudioCue::LevelLose);
        self.push_hud();
        log::info!(
            "defeat on level {} with {} points",
            self.current_level_index + 1,
            self.scoreboard.score()
        );
    }

    fn ammo_remaining(&self) -> u32 {
        match (&self.wave, self.phase) {
            (Some(wave), GamePhase::WaveActive) => wave.ammo_remaining(),
            _ => 0,
        }
    }

    fn push_hud(&mut self) {
        if !self.hud_initialized {
            return;
        }
        let frame = self.hud_frame();
        self.hud.update(&frame);
    }

    fn misuse(&self, operation: &'static str) -> CoreError {
        CoreError::InvalidStateTransition {
            operation,
            state: self.phase.label(),
        }
    }
}

fn report_misuse(error: &CoreError) {
    if cfg!(debug_assertions) {
        log::warn!("{error}");
    } else {
        log::debug!("{error}");
    }
}
