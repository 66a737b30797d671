//! The tornado weapon: level and augment state plus the attack cadence.
//!
//! The weapon never touches projectiles directly. Each tick it reports how
//! many tornadoes to spawn, and for every spawn it resolves a
//! [`SpawnParams`] record that the spawner applies to a pooled instance.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use tornado_core::events::UpgradeEvent;
use tornado_core::settings::TornadoUpgradeSettings;
use tornado_core::state::WeaponView;
use tornado_core::stats::{MovementStats, StatusEffectArgs, TornadoColor, TornadoStats};
use tornado_core::types::SubscriptionId;

use crate::augments::AugmentSet;
use crate::bus::UpgradeBus;
use crate::cadence::{self, Cadence};
use crate::damage::DamageResolver;

/// Everything a freshly acquired tornado is configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub stats: TornadoStats,
    pub movement: MovementStats,
    pub bonus_size: f32,
    pub final_damage: f32,
    pub is_critical: bool,
    pub status_effect: StatusEffectArgs,
    pub color: TornadoColor,
    /// Initial value of the projectile's speed resample timer.
    pub speed_timer_seed: f32,
}

pub struct TornadoWeapon {
    settings: Option<Arc<TornadoUpgradeSettings>>,
    level: u32,
    /// `None` while no per-level stats could be resolved.
    stats: Option<TornadoStats>,
    status_effect: StatusEffectArgs,
    color: TornadoColor,
    augments: AugmentSet,
    base_damage_multiplier: f32,
    cadence: Cadence,
    subscription: Option<SubscriptionId>,
}

impl TornadoWeapon {
    pub fn new(settings: Option<Arc<TornadoUpgradeSettings>>) -> Self {
        Self {
            settings,
            level: 0,
            stats: None,
            status_effect: StatusEffectArgs::default(),
            color: TornadoColor::default(),
            augments: AugmentSet::default(),
            base_damage_multiplier: 1.0,
            cadence: Cadence::default(),
            subscription: None,
        }
    }

    /// Subscribe to upgrades and seed the attack timer. The level is kept.
    pub fn activate(&mut self, bus: &mut UpgradeBus) {
        if self.subscription.is_none() {
            self.subscription = Some(bus.subscribe());
        }
        if let Some(stats) = self.stats {
            if !self.cadence.is_primed() {
                self.cadence.prime(stats.attack_interval);
            }
        }
        info!(level = self.level, configured = self.stats.is_some(), "Tornado weapon activated");
    }

    /// Unsubscribe from upgrades and stop firing until reactivated.
    pub fn deactivate(&mut self, bus: &mut UpgradeBus) {
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
        self.cadence.reset();
        info!("Tornado weapon deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn set_base_level(&mut self) {
        self.level = 0;
        self.set_level_stats();
    }

    pub fn increase_level(&mut self) {
        self.level = self.level.saturating_add(1);
        self.set_level_stats();
    }

    /// Resolve stats, status effect and color for the current level.
    fn set_level_stats(&mut self) {
        let Some(settings) = self.settings.as_ref() else {
            warn!(level = self.level, "Tornado upgrade settings missing; weapon stays idle");
            return;
        };

        let index = self.level as usize;
        self.stats = settings.per_level_settings.get_clamped(index).copied();
        if self.stats.is_none() {
            warn!(level = self.level, "Tornado per-level table is empty; weapon stays idle");
        }
        self.status_effect = settings
            .status_effect_args_per_level
            .get_clamped(index)
            .copied()
            .unwrap_or_default();
        self.color = settings
            .color_for(self.status_effect.effect)
            .unwrap_or_default();

        if let Some(stats) = self.stats {
            // Stats may arrive after activation; seed the timer the first time they do.
            if self.is_active() && !self.cadence.is_primed() {
                self.cadence.prime(stats.attack_interval);
            }
            debug!(
                level = self.level,
                damage = stats.damage,
                count = stats.count,
                status = ?self.status_effect.effect,
                "Tornado level stats set"
            );
        }
    }

    pub fn set_base_weapon_damage_multiplier(&mut self, multiplier: f32) {
        self.base_damage_multiplier = multiplier;
    }

    /// React to a player upgrade. Only the matching augment category changes.
    pub fn on_player_upgraded(&mut self, event: &UpgradeEvent) {
        let Some(settings) = self.settings.as_ref() else {
            warn!(upgrade_type = ?event.upgrade_type, "Tornado upgrade settings missing; upgrade ignored");
            return;
        };
        match self.augments.apply_upgrade(settings, event) {
            Ok(augment) => debug!(augment = ?augment, level = event.level, "Tornado augment applied"),
            Err(reason) => warn!(
                upgrade_type = ?event.upgrade_type,
                level = event.level,
                %reason,
                "Tornado upgrade ignored"
            ),
        }
    }

    /// Apply every upgrade published since the last poll.
    pub fn poll_upgrades(&mut self, bus: &mut UpgradeBus) {
        let Some(id) = self.subscription else {
            return;
        };
        for event in bus.drain(id) {
            self.on_player_upgraded(&event);
        }
    }

    /// Seconds between attacks after augments, if configured.
    pub fn attack_interval(&self) -> Option<f32> {
        self.stats
            .map(|stats| cadence::effective_interval(stats.attack_rate, self.augments.interval_deduction()))
    }

    /// Tornadoes per attack after augments, if configured.
    pub fn projectiles_per_attack(&self) -> Option<u32> {
        self.stats
            .map(|stats| cadence::spawn_count(stats.count, self.augments.bonus_projectile_count()))
    }

    /// Advance the attack timer. Returns the number of tornadoes to spawn now.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.is_active() {
            return 0;
        }
        let (Some(interval), Some(count)) = (self.attack_interval(), self.projectiles_per_attack())
        else {
            return 0;
        };
        if self.cadence.tick(dt, interval) {
            count
        } else {
            0
        }
    }

    /// Resolve the parameters of one spawn, rolling for a critical strike.
    ///
    /// Final damage is the resolver's damage for `damage × multiplier`,
    /// reduced by the spread multiplier when the spread adds projectiles.
    pub fn spawn_params(&self, rng: &mut ChaCha8Rng, resolver: &dyn DamageResolver) -> Option<SpawnParams> {
        let stats = self.stats?;
        let settings = self.settings.as_ref()?;

        let is_critical = resolver.roll_critical(rng);
        let base = stats.damage * self.base_damage_multiplier;
        let final_damage =
            resolver.final_damage(base, is_critical) * self.augments.spread_damage_multiplier();

        Some(SpawnParams {
            stats,
            movement: settings.movement_stats,
            bonus_size: self.augments.bonus_size(),
            final_damage,
            is_critical,
            status_effect: self.status_effect,
            color: self.color,
            speed_timer_seed: stats.attack_interval * 0.5,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn augments(&self) -> &AugmentSet {
        &self.augments
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            level: self.level,
            attack_interval: self.attack_interval().unwrap_or(0.0),
            projectiles_per_attack: self.projectiles_per_attack().unwrap_or(0),
            attack_timer: self.cadence.timer,
            configured: self.stats.is_some(),
        }
    }
}
