use duck_hunt_core::{LevelDefinition, LevelId, LevelOutcome, SuccessRatio, WaveStats};
use duck_hunt_system_level::LevelController;
use proptest::prelude::*;

fn level(ducks: u32, waves: u32) -> LevelDefinition {
    LevelDefinition::new(LevelId::new(1), "Test", ducks, waves, 5, 20.0, 10, 100)
}

fn wave(index: u32, shot: u32, missed: u32, fired: u32) -> WaveStats {
    WaveStats {
        wave_index: index,
        shots_fired: fired,
        ducks_shot: shot,
        ducks_missed: missed,
    }
}

fn ratio(value: f32) -> SuccessRatio {
    SuccessRatio::new(value).expect("valid ratio")
}

fn play(controller: &mut LevelController, waves: &[WaveStats]) {
    for stats in waves {
        assert!(controller.advance_wave().is_some(), "wave available");
        controller.record_wave(stats).expect("level started");
    }
}

#[test]
fn strong_level_passes() {
    let mut controller = LevelController::new(ratio(0.6));
    controller.start_level(&level(5, 2));

    play(&mut controller, &[wave(1, 5, 0, 6), wave(2, 3, 2, 10)]);

    assert!(controller.is_level_complete());
    let stats = controller.stats().expect("stats");
    assert_eq!(stats.ducks_killed(), 8);
    assert_eq!(stats.total_ducks(), 10);
    assert_eq!(stats.shots_fired(), 16);
    assert_eq!(controller.evaluate(), Ok(LevelOutcome::Pass));
}

#[test]
fn weak_level_fails_and_restart_clears_stats() {
    let definition = level(5, 2);
    let mut controller = LevelController::new(ratio(0.6));
    controller.start_level(&definition);
    play(&mut controller, &[wave(1, 3, 2, 10), wave(2, 2, 3, 10)]);

    assert_eq!(controller.evaluate(), Ok(LevelOutcome::Fail));

    controller.start_level(&definition);
    let stats = controller.stats().expect("stats");
    assert_eq!(controller.wave_index(), 0);
    assert_eq!(stats.ducks_killed(), 0);
    assert_eq!(stats.shots_fired(), 0);
    assert_eq!(stats.total_ducks(), 10);
}

#[test]
fn threshold_is_configurable() {
    let waves = [wave(1, 4, 1, 5), wave(2, 3, 2, 5)];

    let mut lenient = LevelController::new(ratio(0.6));
    lenient.start_level(&level(5, 2));
    play(&mut lenient, &waves);

    let mut strict = LevelController::new(ratio(0.7));
    strict.start_level(&level(5, 2));
    play(&mut strict, &waves);

    assert_eq!(lenient.evaluate(), Ok(LevelOutcome::Pass));
    assert_eq!(strict.evaluate(), Ok(LevelOutcome::Pass));

    let mut stricter = LevelController::new(ratio(0.8));
    stricter.start_level(&level(5, 2));
    play(&mut stricter, &waves);
    assert_eq!(stricter.evaluate(), Ok(LevelOutcome::Fail));
}

#[test]
fn advancing_past_last_wave_yields_none() {
    let mut controller = LevelController::new(SuccessRatio::DEFAULT);
    controller.start_level(&level(2, 2));

    assert_eq!(controller.advance_wave(), Some(1));
    assert!(!controller.is_level_complete());
    assert_eq!(controller.advance_wave(), Some(2));
    assert!(controller.is_level_complete());
    assert_eq!(controller.advance_wave(), None);
    assert_eq!(controller.wave_index(), 2);
}

proptest! {
    #[test]
    fn total_ducks_is_product_of_ducks_and_waves(ducks in 1u32..50, waves in 1u32..50) {
        let mut controller = LevelController::new(SuccessRatio::DEFAULT);
        controller.start_level(&level(ducks, waves));

        let stats = controller.stats().expect("stats");
        prop_assert_eq!(stats.total_ducks(), ducks * waves);
        prop_assert_eq!(stats.ducks_killed(), 0);
    }

    #[test]
    fn wave_totals_sum_to_level_totals(shots in proptest::collection::vec(0u32..=4, 1..8)) {
        let ducks = 4;
        let waves = shots.len() as u32;
        let mut controller = LevelController::new(SuccessRatio::DEFAULT);
        controller.start_level(&level(ducks, waves));

        for (index, shot) in shots.iter().enumerate() {
            prop_assert!(controller.advance_wave().is_some());
            controller
                .record_wave(&wave(index as u32 + 1, *shot, ducks - shot, *shot))
                .expect("level started");
        }

        let stats = controller.stats().expect("stats");
        prop_assert!(controller.is_level_complete());
        prop_assert_eq!(stats.ducks_killed(), shots.iter().sum::<u32>());
        prop_assert_eq!(stats.ducks_killed() + stats.ducks_missed(), stats.total_ducks());
    }
}
