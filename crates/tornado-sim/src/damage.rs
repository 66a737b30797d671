//! Damage resolution and delivery.
//!
//! [`DamageResolver`] turns a base damage value into the final per-application
//! damage (critical roll included). [`DamageCollider`] is the per-instance
//! delivery surface: it holds the damage payload and gates applications to
//! the targets the host reports as overlapping.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tornado_core::components::DamageArgs;
use tornado_core::constants::{DEFAULT_CRIT_CHANCE, DEFAULT_CRIT_MULTIPLIER};
use tornado_core::enums::StatusEffect;
use tornado_core::events::DamageDealt;
use tornado_core::stats::StatusEffectArgs;
use tornado_core::types::{InstanceId, TargetId};

/// Computes final damage for a spawn.
pub trait DamageResolver: Send {
    /// Decide whether this spawn is a critical strike.
    fn roll_critical(&self, rng: &mut ChaCha8Rng) -> bool;
    /// Final damage for `base` (already scaled by the weapon multiplier).
    fn final_damage(&self, base: f32, is_critical: bool) -> f32;
}

/// Flat-chance critical strike resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalStrike {
    /// Probability of a critical strike (0.0 - 1.0).
    pub chance: f32,
    pub multiplier: f32,
}

impl Default for CriticalStrike {
    fn default() -> Self {
        Self {
            chance: DEFAULT_CRIT_CHANCE,
            multiplier: DEFAULT_CRIT_MULTIPLIER,
        }
    }
}

impl DamageResolver for CriticalStrike {
    fn roll_critical(&self, rng: &mut ChaCha8Rng) -> bool {
        let chance = self.chance.clamp(0.0, 1.0);
        chance > 0.0 && rng.gen::<f32>() < chance
    }

    fn final_damage(&self, base: f32, is_critical: bool) -> f32 {
        if is_critical {
            base * self.multiplier
        } else {
            base
        }
    }
}

/// Damage delivery attached to every tornado instance.
#[derive(Debug, Clone, Default)]
pub struct DamageCollider {
    pub args: DamageArgs,
    /// Re-apply every `interval` seconds while a target stays inside.
    /// When false, damage is applied once per entry.
    pub on_stay: bool,
    pub interval: f32,
    pub status_effect: Option<StatusEffectArgs>,
    /// Seconds until the next application, per overlapping target.
    cooldowns: BTreeMap<TargetId, f32>,
    /// Targets overlapping last tick (entry mode).
    touching: BTreeSet<TargetId>,
}

impl DamageCollider {
    pub fn set_damage_per_application(&mut self, amount: f32, is_critical: bool) {
        self.args.damage = amount;
        self.args.is_critical = is_critical;
    }

    pub fn set_application_mode(&mut self, on_stay: bool, interval: f32) {
        self.on_stay = on_stay;
        self.interval = interval.max(0.0);
    }

    /// `StatusEffect::None` clears the effect.
    pub fn set_status_effect(&mut self, args: StatusEffectArgs) {
        self.status_effect = match args.effect {
            StatusEffect::None => None,
            _ => Some(args),
        };
    }

    /// Apply damage to the targets overlapping this tick.
    ///
    /// Targets absent from `contacts` are forgotten, so re-entering applies
    /// damage immediately.
    pub fn apply_contacts(
        &mut self,
        instance: InstanceId,
        dt: f32,
        contacts: &[TargetId],
    ) -> Vec<DamageDealt> {
        let current: BTreeSet<TargetId> = contacts.iter().copied().collect();
        let mut hits = Vec::new();

        if self.on_stay {
            let mut next = BTreeMap::new();
            for &target in &current {
                let remaining = match self.cooldowns.get(&target) {
                    None => 0.0,
                    Some(&cooldown) => cooldown - dt,
                };
                if remaining <= 0.0 {
                    hits.push(self.hit(instance, target));
                    next.insert(target, self.interval);
                } else {
                    next.insert(target, remaining);
                }
            }
            self.cooldowns = next;
        } else {
            for &target in current.difference(&self.touching) {
                hits.push(self.hit(instance, target));
            }
            self.touching = current;
        }
        hits
    }

    /// Back to a freshly constructed collider.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn hit(&self, instance: InstanceId, target: TargetId) -> DamageDealt {
        DamageDealt {
            instance,
            target,
            amount: self.args.damage,
            is_critical: self.args.is_critical,
            source: self.args.source,
            status_effect: self.status_effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const ME: InstanceId = InstanceId(1);

    fn collider(on_stay: bool, interval: f32) -> DamageCollider {
        let mut collider = DamageCollider::default();
        collider.set_damage_per_application(10.0, false);
        collider.set_application_mode(on_stay, interval);
        collider
    }

    #[test]
    fn test_on_stay_gated_by_interval() {
        let mut c = collider(true, 0.5);
        let target = [TargetId(7)];
        let mut hits = 0;
        // 2 seconds in 0.25s ticks: hits at 0, 0.5, 1.0, 1.5
        for _ in 0..8 {
            hits += c.apply_contacts(ME, 0.25, &target).len();
        }
        assert_eq!(hits, 4);
    }

    #[test]
    fn test_on_stay_reentry_hits_immediately() {
        let mut c = collider(true, 10.0);
        assert_eq!(c.apply_contacts(ME, 0.1, &[TargetId(1)]).len(), 1);
        assert_eq!(c.apply_contacts(ME, 0.1, &[TargetId(1)]).len(), 0);
        assert_eq!(c.apply_contacts(ME, 0.1, &[]).len(), 0);
        assert_eq!(c.apply_contacts(ME, 0.1, &[TargetId(1)]).len(), 1);
    }

    #[test]
    fn test_on_enter_hits_once_per_entry() {
        let mut c = collider(false, 0.0);
        let both = [TargetId(1), TargetId(2)];
        assert_eq!(c.apply_contacts(ME, 0.1, &both).len(), 2);
        assert_eq!(c.apply_contacts(ME, 0.1, &both).len(), 0);
        assert_eq!(c.apply_contacts(ME, 0.1, &[TargetId(2)]).len(), 0);
        assert_eq!(c.apply_contacts(ME, 0.1, &both).len(), 1);
    }

    #[test]
    fn test_duplicate_contacts_hit_once() {
        let mut c = collider(true, 1.0);
        let hits = c.apply_contacts(ME, 0.1, &[TargetId(3), TargetId(3)]);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_hit_carries_payload_and_status() {
        let mut c = collider(true, 1.0);
        c.set_damage_per_application(12.5, true);
        c.set_status_effect(StatusEffectArgs {
            effect: StatusEffect::Shock,
            duration_secs: 1.0,
            potency: 0.25,
        });
        let hit = c.apply_contacts(ME, 0.1, &[TargetId(9)])[0];
        assert_eq!(hit.amount, 12.5);
        assert!(hit.is_critical);
        assert_eq!(hit.instance, ME);
        assert_eq!(hit.status_effect.map(|s| s.effect), Some(StatusEffect::Shock));

        c.set_status_effect(StatusEffectArgs::default());
        assert!(c.status_effect.is_none());
    }

    #[test]
    fn test_reset_forgets_targets() {
        let mut c = collider(true, 5.0);
        c.apply_contacts(ME, 0.1, &[TargetId(1)]);
        c.reset();
        assert_eq!(c.args, DamageArgs::default());
        c.set_application_mode(true, 5.0);
        assert_eq!(c.apply_contacts(ME, 0.1, &[TargetId(1)]).len(), 1);
    }

    #[test]
    fn test_critical_strike_resolution() {
        let crit = CriticalStrike {
            chance: 0.0,
            multiplier: 3.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..100).all(|_| !crit.roll_critical(&mut rng)));
        assert_eq!(crit.final_damage(4.0, true), 12.0);
        assert_eq!(crit.final_damage(4.0, false), 4.0);

        let always = CriticalStrike {
            chance: 1.0,
            multiplier: 2.0,
        };
        assert!((0..100).all(|_| always.roll_critical(&mut rng)));
    }
}
