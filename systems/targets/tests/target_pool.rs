use duck_hunt_core::{
    DuckVariant, LevelDefinition, ScreenPoint, Stage, Target, TargetId, TargetIdSequence,
    TargetState, Transition, TransitionToken,
};
use duck_hunt_system_targets::TargetPool;
use proptest::prelude::*;

struct HeadlessStage;

impl Stage for HeadlessStage {
    fn release_targets(&mut self, _targets: &[Target], _speed: u32) {}

    fn hit_test(&mut self, _point: ScreenPoint) -> Vec<TargetId> {
        Vec::new()
    }

    fn play_level_intro(&mut self, _level: &LevelDefinition, _token: TransitionToken) -> Transition {
        Transition::Complete
    }

    fn play_escape_animation(
        &mut self,
        _escaped: &[TargetId],
        _token: TransitionToken,
    ) -> Transition {
        Transition::Complete
    }

    fn clear_targets(&mut self) {}
}

#[test]
fn released_targets_alternate_variants_and_start_flying() {
    let mut pool = TargetPool::new();
    let mut ids = TargetIdSequence::new();

    let released = pool.release(4, 5, &mut ids, &mut HeadlessStage);

    let variants: Vec<DuckVariant> = released.iter().map(Target::variant).collect();
    assert_eq!(
        variants,
        vec![DuckVariant::A, DuckVariant::B, DuckVariant::A, DuckVariant::B]
    );
    assert!(released
        .iter()
        .all(|target| target.state() == TargetState::Flying));
}

#[test]
fn duplicate_hit_is_rejected() {
    let mut pool = TargetPool::new();
    let mut ids = TargetIdSequence::new();
    let released = pool.release(2, 5, &mut ids, &mut HeadlessStage);
    let id = released[0].id();

    assert!(pool.register_hit(id).accepted);
    assert!(!pool.register_hit(id).accepted);
    assert_eq!(pool.live_count(), 1);
    assert!(!pool.contains(id));
}

#[test]
fn unknown_identifier_is_rejected() {
    let mut pool = TargetPool::new();
    let mut ids = TargetIdSequence::new();
    let _ = pool.release(1, 5, &mut ids, &mut HeadlessStage);

    assert!(!pool.register_hit(TargetId::new(99)).accepted);
    assert_eq!(pool.live_count(), 1);
}

#[test]
fn last_hit_empties_pool_synchronously() {
    let mut pool = TargetPool::new();
    let mut ids = TargetIdSequence::new();
    let released = pool.release(2, 5, &mut ids, &mut HeadlessStage);

    assert!(pool.register_hit(released[1].id()).accepted);
    assert!(!pool.is_empty());
    assert!(pool.register_hit(released[0].id()).accepted);
    assert!(pool.is_empty());
}

#[test]
fn escaped_targets_cannot_be_hit() {
    let mut pool = TargetPool::new();
    let mut ids = TargetIdSequence::new();
    let released = pool.release(2, 5, &mut ids, &mut HeadlessStage);

    let escaped = pool.force_escape_all();

    assert_eq!(escaped.len(), 2);
    assert!(!pool.register_hit(released[0].id()).accepted);
}

#[test]
fn identifiers_are_unique_across_pools_sharing_a_sequence() {
    let mut ids = TargetIdSequence::new();
    let first = TargetPool::new().release(3, 5, &mut ids, &mut HeadlessStage);
    let second = TargetPool::new().release(3, 5, &mut ids, &mut HeadlessStage);

    let mut all: Vec<TargetId> = first.iter().chain(second.iter()).map(Target::id).collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 6);
}

proptest! {
    #[test]
    fn every_released_target_is_accounted_for(
        count in 0u32..12,
        hits in proptest::collection::vec(0u32..16, 0..24),
    ) {
        let mut pool = TargetPool::new();
        let mut ids = TargetIdSequence::new();
        let _ = pool.release(count, 5, &mut ids, &mut HeadlessStage);

        let mut accepted = 0u32;
        for raw in hits {
            if pool.register_hit(TargetId::new(raw)).accepted {
                accepted += 1;
            }
        }
        let escaped = pool.force_escape_all();

        prop_assert_eq!(accepted + escaped.len() as u32, count);
        prop_assert_eq!(pool.hit_count(), accepted);
        prop_assert!(pool.is_empty());
    }
}
