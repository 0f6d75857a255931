//! Shots remaining in the active wave.

use duck_hunt_core::CoreError;

/// Reading taken after a shot was spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmmoReading {
    /// Shots left after the spend.
    pub remaining: u32,
    /// Whether the magazine is now empty.
    pub depleted: bool,
}

/// Magazine for a single wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmmoTracker {
    remaining: u32,
}

impl AmmoTracker {
    /// Creates an empty magazine.
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Refills the magazine at wave start.
    pub fn set_ammo(&mut self, shots: u32) {
        self.remaining = shots;
    }

    /// Spends one shot.
    ///
    /// Fails with [`CoreError::NoAmmo`] when the magazine is already empty;
    /// callers are expected to check [`Self::remaining`] first.
    pub fn consume_one(&mut self) -> Result<AmmoReading, CoreError> {
        let Some(remaining) = self.remaining.checked_sub(1) else {
            return Err(CoreError::NoAmmo);
        };
        self.remaining = remaining;
        Ok(AmmoReading {
            remaining,
            depleted: remaining == 0,
        })
    }

    /// Shots left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn last_shot_reports_depletion() {
        let mut ammo = AmmoTracker::new();
        ammo.set_ammo(2);

        assert_eq!(
            ammo.consume_one(),
            Ok(AmmoReading {
                remaining: 1,
                depleted: false
            })
        );
        assert_eq!(
            ammo.consume_one(),
            Ok(AmmoReading {
                remaining: 0,
                depleted: true
            })
        );
    }

    #[test]
    fn empty_magazine_rejects_spend() {
        let mut ammo = AmmoTracker::new();

        assert_eq!(ammo.consume_one(), Err(CoreError::NoAmmo));
        assert_eq!(ammo.remaining(), 0);
    }

    proptest! {
        #[test]
        fn remaining_never_underflows(loaded in 0u32..32, attempts in 0usize..64) {
            let mut ammo = AmmoTracker::new();
            ammo.set_ammo(loaded);

            let mut spent = 0u32;
            for _ in 0..attempts {
                if ammo.consume_one().is_ok() {
                    spent += 1;
                }
            }

            prop_assert_eq!(spent, loaded.min(attempts as u32));
            prop_assert_eq!(ammo.remaining(), loaded - spent);
        }
    }
}
