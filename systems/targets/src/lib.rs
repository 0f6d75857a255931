#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ownership of the ducks released by a single wave.
//!
//! The pool never drives animation. It hands freshly released targets to the
//! [`Stage`] and afterwards only tracks which of them are still live.

use duck_hunt_core::{
    CoreError, DuckVariant, HitResult, Stage, Target, TargetId, TargetIdSequence,
};

/// Live set of targets for the active wave.
#[derive(Debug, Default)]
pub struct TargetPool {
    live: Vec<Target>,
    hit: u32,
    escaped: u32,
}

impl TargetPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases `count` flying targets and schedules them with the stage.
    ///
    /// Variants alternate by release index, starting with [`DuckVariant::A`].
    pub fn release<S: Stage>(
        &mut self,
        count: u32,
        speed: u32,
        ids: &mut TargetIdSequence,
        stage: &mut S,
    ) -> Vec<Target> {
        let released: Vec<Target> = (0..count as usize)
            .map(|index| Target::flying(ids.next_id(), DuckVariant::for_release_index(index)))
            .collect();

        self.live.extend_from_slice(&released);
        stage.release_targets(&released, speed);
        released
    }

    /// Marks a live target as hit and removes it from the pool.
    ///
    /// Unknown or already terminal identifiers are rejected, which absorbs
    /// duplicate and late hit notifications.
    pub fn register_hit(&mut self, id: TargetId) -> HitResult {
        let Some(index) = self.live.iter().position(|target| target.id() == id) else {
            log::trace!("{}", CoreError::UnknownTarget(id));
            return HitResult { accepted: false };
        };

        let mut target = self.live.remove(index);
        let accepted = target.hit();
        if accepted {
            self.hit = self.hit.saturating_add(1);
        }
        HitResult { accepted }
    }

    /// Marks every remaining target as escaped and empties the pool.
    ///
    /// Returns the identifiers of the escapees in release order.
    pub fn force_escape_all(&mut self) -> Vec<TargetId> {
        let mut escaped = Vec::with_capacity(self.live.len());
        for mut target in self.live.drain(..) {
            if target.escape() {
                escaped.push(target.id());
            }
        }
        self.escaped = self
            .escaped
            .saturating_add(u32::try_from(escaped.len()).unwrap_or(u32::MAX));
        escaped
    }

    /// Number of targets still flying.
    #[must_use]
    pub fn live_count(&self) -> u32 {
        u32::try_from(self.live.len()).unwrap_or(u32::MAX)
    }

    /// Reports whether no target is flying.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Reports whether the identified target is still flying.
    #[must_use]
    pub fn contains(&self, id: TargetId) -> bool {
        self.live.iter().any(|target| target.id() == id)
    }

    /// Targets eliminated over the pool's lifetime.
    #[must_use]
    pub const fn hit_count(&self) -> u32 {
        self.hit
    }

    /// Targets that escaped over the pool's lifetime.
    #[must_use]
    pub const fn escaped_count(&self) -> u32 {
        self.escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_hunt_core::{LevelDefinition, ScreenPoint, Transition, TransitionToken};

    #[derive(Default)]
    struct NullStage {
        released: Vec<(Vec<TargetId>, u32)>,
    }

    impl Stage for NullStage {
        fn release_targets(&mut self, targets: &[Target], speed: u32) {
            self.released
                .push((targets.iter().map(Target::id).collect(), speed));
        }

        fn hit_test(&mut self, _point: ScreenPoint) -> Vec<TargetId> {
            Vec::new()
        }

        fn play_level_intro(
            &mut self,
            _level: &LevelDefinition,
            _token: TransitionToken,
        ) -> Transition {
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
    fn release_hands_targets_to_stage() {
        let mut pool = TargetPool::new();
        let mut ids = TargetIdSequence::new();
        let mut stage = NullStage::default();

        let released = pool.release(3, 7, &mut ids, &mut stage);

        assert_eq!(released.len(), 3);
        assert_eq!(
            stage.released,
            vec![(
                vec![TargetId::new(1), TargetId::new(2), TargetId::new(3)],
                7
            )]
        );
        assert_eq!(pool.live_count(), 3);
    }

    #[test]
    fn force_escape_reports_survivors_only() {
        let mut pool = TargetPool::new();
        let mut ids = TargetIdSequence::new();
        let mut stage = NullStage::default();
        let _ = pool.release(3, 1, &mut ids, &mut stage);
        assert!(pool.register_hit(TargetId::new(2)).accepted);

        let escaped = pool.force_escape_all();

        assert_eq!(escaped, vec![TargetId::new(1), TargetId::new(3)]);
        assert!(pool.is_empty());
        assert_eq!(pool.escaped_count(), 2);
        assert_eq!(pool.hit_count(), 1);
    }
}
