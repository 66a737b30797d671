//! Weapon attack cadence.

use serde::{Deserialize, Serialize};

/// Accumulating attack timer.
///
/// The timer starts half-way through the attack interval, so the first
/// attack comes sooner than the ones after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    pub timer: f32,
    primed: bool,
}

impl Cadence {
    /// Seed the timer to half of `attack_interval`.
    pub fn prime(&mut self, attack_interval: f32) {
        self.timer = attack_interval * 0.5;
        self.primed = true;
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Forget the seed; the next `prime` seeds again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accumulate `dt`. Returns true (and restarts the timer) once `interval` elapsed.
    pub fn tick(&mut self, dt: f32, interval: f32) -> bool {
        self.timer += dt;
        if self.timer >= interval {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }
}

/// Seconds between attacks after the attack-speed deduction.
pub fn effective_interval(attack_rate: f32, deduction: f32) -> f32 {
    (attack_rate - deduction).max(0.0)
}

/// Tornadoes spawned per attack.
pub fn spawn_count(count: u32, bonus_projectile_count: u32) -> u32 {
    count.saturating_add(bonus_projectile_count)
}
