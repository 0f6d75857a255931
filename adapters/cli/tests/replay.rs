use duck_hunt_catalog::LevelCatalog;
use duck_hunt_cli::{run_simulation, RunOutcome, SimulationSettings};
use duck_hunt_core::{GamePhase, LevelDefinition, LevelId};
use duck_hunt_game::GameConfig;

fn level(id: u32, ducks: u32, bullets: u32, seconds: f32) -> LevelDefinition {
    LevelDefinition::new(
        LevelId::new(id),
        format!("Level {id}"),
        ducks,
        1,
        5,
        seconds,
        bullets,
        100,
    )
}

fn catalog(levels: Vec<LevelDefinition>) -> LevelCatalog {
    LevelCatalog::from_levels(levels).expect("valid catalog")
}

fn settings(seed: u64, accuracy: f32) -> SimulationSettings {
    SimulationSettings {
        seed,
        accuracy,
        max_frames: 20_000,
        animation_frames: 5,
        ..SimulationSettings::default()
    }
}

#[test]
fn same_seed_replays_identically() {
    let settings = settings(42, 0.6);

    let first = run_simulation(
        LevelCatalog::builtin().expect("builtin levels"),
        GameConfig::default(),
        &settings,
    )
    .expect("first run");
    let second = run_simulation(
        LevelCatalog::builtin().expect("builtin levels"),
        GameConfig::default(),
        &settings,
    )
    .expect("second run");

    assert_eq!(first, second);
    assert!(first.frames > 0);
}

#[test]
fn sharp_shooter_clears_an_easy_table() {
    let report = run_simulation(
        catalog(vec![level(1, 2, 5, 10.0), level(2, 2, 5, 10.0)]),
        GameConfig::default(),
        &settings(7, 1.0),
    )
    .expect("run");

    assert_eq!(report.outcome, RunOutcome::Victory);
    assert_eq!(report.state.phase, GamePhase::Victory);
    assert_eq!(report.ducks_shot, 4);
    assert!(report.shots_fired <= 4);
    assert_eq!(report.state.score, 400);
    assert_eq!(report.history.len(), 2);
    assert_eq!(report.retries_used, 0);
    assert!(report.hud_updates >= 4, "every hit reaches the HUD");
    assert_eq!(
        report.hud.map(|frame| frame.status.to_string()),
        Some("You Win!".to_owned())
    );
}

#[test]
fn hopeless_level_exhausts_retries() {
    let report = run_simulation(
        catalog(vec![level(1, 3, 3, 0.05)]),
        GameConfig::default(),
        &SimulationSettings {
            retries: 2,
            ..settings(3, 1.0)
        },
    )
    .expect("run");

    assert_eq!(report.outcome, RunOutcome::Defeat);
    assert_eq!(report.retries_used, 2);
    assert_eq!(report.shots_fired, 0);
    assert_eq!(report.state.score, 0);
    assert!(report.history.is_empty());
}

#[test]
fn frame_budget_bounds_the_run() {
    let report = run_simulation(
        LevelCatalog::builtin().expect("builtin levels"),
        GameConfig::default(),
        &SimulationSettings {
            max_frames: 3,
            ..settings(1, 0.5)
        },
    )
    .expect("run");

    assert_eq!(report.outcome, RunOutcome::Unfinished);
    assert_eq!(report.frames, 3);
}

#[test]
fn rejects_invalid_accuracy() {
    let result = run_simulation(
        LevelCatalog::builtin().expect("builtin levels"),
        GameConfig::default(),
        &settings(0, 1.5),
    );

    assert!(result.is_err());
}
