#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Duck Hunt engine.
//!
//! This crate defines the vocabulary that connects the level catalog, the pure
//! wave and level systems, and the authoritative game controller. Presentation
//! concerns are reached exclusively through the collaborator traits declared
//! here ([`Stage`], [`Hud`], [`Audio`], [`Clock`] and [`FrameSource`]) so the
//! engine never depends on a renderer, an audio backend or an input device.

use std::{
    cell::Cell,
    fmt,
    ops::ControlFlow,
    rc::Rc,
    time::{Duration, Instant},
};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Duck Hunt.";

/// Normalized screen coordinate at which a shot was fired.
pub type ScreenPoint = Vec2;

/// Unique identifier assigned to a level definition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier assigned to a target. Never reused within a run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TargetId(u32);

impl TargetId {
    /// Creates a new target identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`TargetId`] values spanning an entire run.
///
/// Wave controllers are discarded after every wave, so the sequence lives with
/// the game controller and is lent to each new wave.
#[derive(Clone, Debug, Default)]
pub struct TargetIdSequence {
    issued: u32,
}

impl TargetIdSequence {
    /// Creates a sequence whose first identifier is `#1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Allocates the next identifier.
    pub fn next_id(&mut self) -> TargetId {
        self.issued = self.issued.wrapping_add(1);
        TargetId::new(self.issued)
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u32 {
        self.issued
    }
}

/// Sprite family assigned to a duck when it is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuckVariant {
    /// Assigned to ducks released at an even index.
    A,
    /// Assigned to ducks released at an odd index.
    B,
}

impl DuckVariant {
    /// Resolves the variant for the duck released at `index` within a wave.
    #[must_use]
    pub const fn for_release_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::A
        } else {
            Self::B
        }
    }
}

/// Lifecycle state of a single target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetState {
    /// Released and still in the air.
    Flying,
    /// Eliminated by a shot.
    Hit,
    /// Survived until the wave cleared the sky.
    Escaped,
}

impl TargetState {
    /// Reports whether the state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Flying)
    }
}

/// A single duck owned by the target pool of the active wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    id: TargetId,
    variant: DuckVariant,
    state: TargetState,
}

impl Target {
    /// Creates a freshly released target in the [`TargetState::Flying`] state.
    #[must_use]
    pub const fn flying(id: TargetId, variant: DuckVariant) -> Self {
        Self {
            id,
            variant,
            state: TargetState::Flying,
        }
    }

    /// Identifier of the target.
    #[must_use]
    pub const fn id(&self) -> TargetId {
        self.id
    }

    /// Sprite family of the target.
    #[must_use]
    pub const fn variant(&self) -> DuckVariant {
        self.variant
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TargetState {
        self.state
    }

    /// Transitions a flying target to [`TargetState::Hit`].
    ///
    /// Returns `false` and leaves the target untouched when it is already terminal.
    pub fn hit(&mut self) -> bool {
        self.transition(TargetState::Hit)
    }

    /// Transitions a flying target to [`TargetState::Escaped`].
    ///
    /// Returns `false` and leaves the target untouched when it is already terminal.
    pub fn escape(&mut self) -> bool {
        self.transition(TargetState::Escaped)
    }

    fn transition(&mut self, next: TargetState) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = next;
        true
    }
}

/// Immutable description of a level loaded from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelDefinition {
    id: LevelId,
    title: String,
    #[serde(rename = "ducks")]
    duck_count: u32,
    #[serde(rename = "waves")]
    wave_count: u32,
    #[serde(rename = "speed")]
    duck_speed: u32,
    #[serde(rename = "time")]
    time_limit_seconds: f32,
    #[serde(rename = "bullets")]
    bullets_per_wave: u32,
    points_per_duck: u32,
}

impl LevelDefinition {
    /// Creates a new level definition.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: LevelId,
        title: impl Into<String>,
        duck_count: u32,
        wave_count: u32,
        duck_speed: u32,
        time_limit_seconds: f32,
        bullets_per_wave: u32,
        points_per_duck: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            duck_count,
            wave_count,
            duck_speed,
            time_limit_seconds,
            bullets_per_wave,
            points_per_duck,
        }
    }

    /// Identifier of the level.
    #[must_use]
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// Title announced before the first wave.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of ducks released by every wave.
    #[must_use]
    pub const fn duck_count(&self) -> u32 {
        self.duck_count
    }

    /// Number of waves composing the level.
    #[must_use]
    pub const fn wave_count(&self) -> u32 {
        self.wave_count
    }

    /// Flight speed handed to the presentation layer.
    #[must_use]
    pub const fn duck_speed(&self) -> u32 {
        self.duck_speed
    }

    /// Time limit of each wave, in seconds.
    #[must_use]
    pub const fn time_limit_seconds(&self) -> f32 {
        self.time_limit_seconds
    }

    /// Time limit of each wave.
    ///
    /// Negative or non-finite limits collapse to zero.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f32(self.time_limit_seconds).unwrap_or(Duration::ZERO)
    }

    /// Shots available at the start of each wave.
    #[must_use]
    pub const fn bullets_per_wave(&self) -> u32 {
        self.bullets_per_wave
    }

    /// Score awarded for each duck shot.
    #[must_use]
    pub const fn points_per_duck(&self) -> u32 {
        self.points_per_duck
    }

    /// Total number of ducks released across all waves of the level.
    #[must_use]
    pub const fn total_ducks(&self) -> u32 {
        self.duck_count.saturating_mul(self.wave_count)
    }
}

/// Statistics gathered during a single wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveStats {
    /// One-based index of the wave within its level.
    pub wave_index: u32,
    /// Shots fired during the wave.
    pub shots_fired: u32,
    /// Ducks eliminated during the wave.
    pub ducks_shot: u32,
    /// Ducks that escaped when the wave ended.
    pub ducks_missed: u32,
}

impl WaveStats {
    /// Creates empty statistics for the provided wave.
    #[must_use]
    pub const fn new(wave_index: u32) -> Self {
        Self {
            wave_index,
            shots_fired: 0,
            ducks_shot: 0,
            ducks_missed: 0,
        }
    }
}

/// Statistics accumulated across every wave of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelStats {
    level_id: LevelId,
    total_ducks: u32,
    ducks_killed: u32,
    ducks_missed: u32,
    shots_fired: u32,
}

impl LevelStats {
    /// Creates zeroed statistics for a level releasing `total_ducks` ducks.
    #[must_use]
    pub const fn new(level_id: LevelId, total_ducks: u32) -> Self {
        Self {
            level_id,
            total_ducks,
            ducks_killed: 0,
            ducks_missed: 0,
            shots_fired: 0,
        }
    }

    /// Folds a finalized wave into the level totals.
    ///
    /// Kills and escapes together never exceed `total_ducks`; kills are
    /// counted first.
    pub fn fold(&mut self, wave: &WaveStats) {
        self.shots_fired = self.shots_fired.saturating_add(wave.shots_fired);
        self.ducks_killed = self
            .ducks_killed
            .saturating_add(wave.ducks_shot)
            .min(self.total_ducks);
        self.ducks_missed = self
            .ducks_missed
            .saturating_add(wave.ducks_missed)
            .min(self.total_ducks - self.ducks_killed);
    }

    /// Level the statistics belong to.
    #[must_use]
    pub const fn level_id(&self) -> LevelId {
        self.level_id
    }

    /// Ducks released across the whole level.
    #[must_use]
    pub const fn total_ducks(&self) -> u32 {
        self.total_ducks
    }

    /// Ducks eliminated so far.
    #[must_use]
    pub const fn ducks_killed(&self) -> u32 {
        self.ducks_killed
    }

    /// Ducks that escaped so far.
    #[must_use]
    pub const fn ducks_missed(&self) -> u32 {
        self.ducks_missed
    }

    /// Shots fired so far.
    #[must_use]
    pub const fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Fraction of the level's ducks eliminated, in `0.0..=1.0`.
    ///
    /// A level without ducks reports `0.0`.
    #[must_use]
    pub fn kill_ratio(&self) -> f32 {
        if self.total_ducks == 0 {
            return 0.0;
        }
        self.ducks_killed as f32 / self.total_ducks as f32
    }
}

/// Fraction of a level's ducks that must be eliminated to pass it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SuccessRatio(f32);

impl SuccessRatio {
    /// Ratio applied when no configuration overrides it.
    pub const DEFAULT: Self = Self(0.6);

    const PARTS: u32 = 1_000_000;

    /// Validates a ratio, accepting values in `(0.0, 1.0]`.
    #[must_use]
    pub fn new(value: f32) -> Option<Self> {
        (value.is_finite() && value > 0.0 && value <= 1.0).then_some(Self(value))
    }

    /// Retrieves the raw ratio.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }

    /// Reports whether `killed / total >= ratio` holds for the level statistics.
    ///
    /// The ratio is resolved to parts per million so the comparison runs in
    /// integers and `0.6` means exactly six tenths.
    #[must_use]
    pub fn is_met_by(&self, stats: &LevelStats) -> bool {
        if stats.total_ducks() == 0 {
            return false;
        }
        let required = u64::from(self.parts_per_million()) * u64::from(stats.total_ducks());
        u64::from(stats.ducks_killed()) * u64::from(Self::PARTS) >= required
    }

    fn parts_per_million(self) -> u32 {
        // `new` keeps the ratio within (0, 1], so the product fits.
        (f64::from(self.0) * f64::from(Self::PARTS)).round() as u32
    }
}

impl Default for SuccessRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of evaluating a completed level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelOutcome {
    /// The success ratio was met; the game may advance.
    Pass,
    /// The success ratio was missed; the game ends in defeat.
    Fail,
}

/// Reason recorded when a wave ends.
///
/// When several conditions hold on the same tick the reason is resolved in
/// declaration order: [`Self::Eliminated`] first, then [`Self::TimeExpired`],
/// then [`Self::OutOfAmmo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveEndReason {
    /// Every released duck was shot.
    Eliminated,
    /// The wave's time limit elapsed.
    TimeExpired,
    /// The last shot was spent while ducks were still flying.
    OutOfAmmo,
}

/// Outcome of processing a single shot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShotReport {
    /// Number of ducks eliminated by the shot.
    pub hits: u32,
}

impl ShotReport {
    /// Reports whether the shot eliminated at least one duck.
    #[must_use]
    pub const fn hit(&self) -> bool {
        self.hits > 0
    }
}

/// Outcome of reporting a hit against the target pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitResult {
    /// Whether the hit transitioned a live target.
    pub accepted: bool,
}

/// Top-level phase of a running game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Constructed but not yet started.
    #[default]
    Idle,
    /// Between waves or levels while a presentation sequence plays.
    LevelTransition,
    /// A wave is in flight and accepting shots.
    WaveActive,
    /// A wave ended and its survivors are flying away.
    WaveEnding,
    /// Every level was passed.
    Victory,
    /// A level was failed. Recoverable through retry.
    Defeat,
}

impl GamePhase {
    /// Reports whether the phase ends the run until a retry.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::LevelTransition => "level transition",
            Self::WaveActive => "wave active",
            Self::WaveEnding => "wave ending",
            Self::Victory => "victory",
            Self::Defeat => "defeat",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only snapshot of the running game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Zero-based index of the current level within the catalog.
    pub current_level_index: usize,
    /// One-based index of the current wave, `0` before the first wave.
    pub current_wave_index: u32,
    /// Shots left in the active wave.
    pub ammo_remaining: u32,
    /// Score accumulated over the run.
    pub score: u64,
    /// Current phase.
    pub phase: GamePhase,
}

/// Banner shown in the HUD status box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    /// Nothing is shown.
    #[default]
    Blank,
    /// The title of the level about to start.
    LevelTitle(String),
    /// Every level was passed.
    Victory,
    /// A level was failed.
    Defeat,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::LevelTitle(title) => f.write_str(title),
            Self::Victory => f.write_str("You Win!"),
            Self::Defeat => f.write_str("You Lose!"),
        }
    }
}

/// Values pushed to the HUD whenever any of them change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HudFrame {
    /// Score accumulated over the run.
    pub score: u64,
    /// Shots left in the active wave.
    pub bullets: u32,
    /// One-based index of the current wave, `0` outside waves.
    pub wave: u32,
    /// Number of waves in the current level.
    pub wave_count: u32,
    /// Ducks shot during the current level.
    pub ducks_shot: u32,
    /// Ducks escaped during the current level.
    pub ducks_missed: u32,
    /// Status banner.
    pub status: GameStatus,
}

impl HudFrame {
    /// Text shown in the wave box, e.g. `Wave 2 of 5`.
    #[must_use]
    pub fn wave_label(&self) -> String {
        if self.wave == 0 {
            return String::new();
        }
        format!("Wave {} of {}", self.wave, self.wave_count)
    }
}

/// Fire-and-forget sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Looping quack played while a wave is active.
    WaveStart,
    /// Gunshot.
    ShotFired,
    /// Played when survivors fly away.
    WaveLost,
    /// Played when the final level is passed.
    LevelWin,
    /// Played when a level is failed.
    LevelLose,
}

/// Presentation sequence the controller may wait on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Title card shown before the first wave of a level.
    LevelIntro,
    /// Survivors flying away at the end of a wave.
    WaveEscape,
}

/// Handle identifying a deferred presentation sequence.
///
/// Stages keep the token and hand it back once the sequence finishes. Tokens
/// carry the generation that issued them so a sequence finishing after the
/// game has moved on is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionToken {
    generation: u64,
    kind: TransitionKind,
}

impl TransitionToken {
    /// Creates a token for the provided generation.
    #[must_use]
    pub const fn new(generation: u64, kind: TransitionKind) -> Self {
        Self { generation, kind }
    }

    /// Generation that issued the token.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Sequence the token belongs to.
    #[must_use]
    pub const fn kind(&self) -> TransitionKind {
        self.kind
    }
}

/// Completion status reported by a stage when asked to play a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to wait for; the controller continues immediately.
    Complete,
    /// The stage will call back with the token once the sequence finishes.
    Pending,
}

/// Presentation collaborator that renders ducks and performs hit-testing.
pub trait Stage {
    /// Starts rendering newly released targets flying at `speed`.
    fn release_targets(&mut self, targets: &[Target], speed: u32);

    /// Returns the identifiers of rendered targets under `point`.
    fn hit_test(&mut self, point: ScreenPoint) -> Vec<TargetId>;

    /// Shows the level title card.
    fn play_level_intro(&mut self, level: &LevelDefinition, token: TransitionToken) -> Transition;

    /// Makes the listed survivors fly away.
    fn play_escape_animation(&mut self, escaped: &[TargetId], token: TransitionToken)
        -> Transition;

    /// Removes every remaining sprite without animation.
    fn clear_targets(&mut self);

    /// While `true`, wave-end evaluation is deferred.
    fn animation_in_flight(&self) -> bool {
        false
    }
}

/// Sink receiving HUD values. Never read back by the engine.
pub trait Hud {
    /// Builds the HUD widgets once, before any update.
    fn initialize(&mut self, frame: &HudFrame);

    /// Pushes new values to existing widgets.
    fn update(&mut self, frame: &HudFrame);
}

/// Fire-and-forget audio sink.
pub trait Audio {
    /// Starts playing a cue.
    fn play(&mut self, cue: AudioCue);

    /// Stops a looping cue.
    fn stop(&mut self, _cue: AudioCue) {}
}

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is the moment of construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// [`Clock`] advanced explicitly by its owner.
///
/// Clones share the same reading, so a test can keep a handle while the game
/// controller owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(dt));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }
}

/// Drives the per-frame cadence of the engine.
pub trait FrameSource {
    /// Invokes `on_frame` with the frame delta until it breaks or the source is exhausted.
    ///
    /// Returns the number of frames produced.
    fn run<F>(self, on_frame: F) -> u64
    where
        F: FnMut(Duration) -> ControlFlow<()>;
}

/// Errors raised when an engine operation is misused.
///
/// None of these are fatal; the game controller degrades each to a no-op.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An operation was invoked outside the state that admits it.
    #[error("`{operation}` is not valid while {state}")]
    InvalidStateTransition {
        /// Operation that was rejected.
        operation: &'static str,
        /// State the component was in.
        state: &'static str,
    },
    /// A shot was requested with an empty magazine.
    #[error("no ammunition remaining")]
    NoAmmo,
    /// A hit referenced a target that is not live.
    #[error("target {0} is not live")]
    UnknownTarget(TargetId),
}
