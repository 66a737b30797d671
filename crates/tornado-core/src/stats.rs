//! Stat records: per-level weapon stats, movement tuning and augments.
//!
//! All records are plain, immutable-once-resolved data. They are resolved
//! from [`crate::settings::TornadoUpgradeSettings`] by the weapon and copied
//! into each projectile at spawn.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::StatusEffect;

/// Per-level tornado stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TornadoStats {
    /// Damage per application.
    pub damage: f32,
    /// Seconds between applications while a target stays inside.
    pub damage_interval: f32,
    /// Seconds a tornado stays at full size.
    pub duration: f32,
    /// Target uniform scale after scaling up.
    pub scale: f32,
    /// Seconds between attacks.
    pub attack_rate: f32,
    /// Interval used to pre-seed the attack timer (half of it) on activation.
    pub attack_interval: f32,
    /// Tornadoes spawned per attack.
    pub count: u32,
}

impl Default for TornadoStats {
    fn default() -> Self {
        Self {
            damage: BASE_DAMAGE,
            damage_interval: BASE_DAMAGE_INTERVAL_SECS,
            duration: BASE_DURATION_SECS,
            scale: BASE_SCALE,
            attack_rate: BASE_ATTACK_RATE_SECS,
            attack_interval: BASE_ATTACK_RATE_SECS,
            count: 1,
        }
    }
}

/// Movement and scale-ramp tuning shared by every tornado of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementStats {
    pub min_speed: f32,
    pub max_speed: f32,
    /// Rate at which current speed eases toward the target speed.
    pub speed_change_rate: f32,
    /// Carried with the tuning data; heading noise is sampled unscaled.
    pub noise_scale: f32,
    /// Multiplier on simulation time along the noise sample axis.
    pub noise_speed: f32,
    /// Sway amplitude in degrees.
    pub sway_amplitude: f32,
    /// Sway angular frequency (radians per second).
    pub sway_frequency: f32,
    pub scale_up_time: f32,
    pub scale_down_time: f32,
}

impl Default for MovementStats {
    fn default() -> Self {
        Self {
            min_speed: 2.0,
            max_speed: 5.0,
            speed_change_rate: 0.5,
            noise_scale: 1.0,
            noise_speed: 1.0,
            sway_amplitude: 0.0,
            sway_frequency: 0.0,
            scale_up_time: 1.0,
            scale_down_time: 1.0,
        }
    }
}

/// Size augment: extra target scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeAugment {
    pub bonus_size: f32,
}

/// Spread augment: extra tornadoes per attack, each dealing reduced damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadAugment {
    pub bonus_projectile_count: u32,
    /// Applied to final damage whenever `bonus_projectile_count > 0`.
    pub spread_damage_multiplier: f32,
}

impl Default for SpreadAugment {
    fn default() -> Self {
        Self {
            bonus_projectile_count: 0,
            spread_damage_multiplier: 1.0,
        }
    }
}

/// Attack-speed augment: seconds removed from the attack rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackSpeedAugment {
    pub shoot_interval_deduction: f32,
}

/// Status effect payload attached to a tornado's damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusEffectArgs {
    pub effect: StatusEffect,
    /// Seconds the effect lasts on a target.
    pub duration_secs: f32,
    /// Effect-specific strength (damage per second, slow fraction, ...).
    pub potency: f32,
}

/// Main and secondary RGBA colors of a tornado.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TornadoColor {
    pub main: Vec4,
    pub secondary: Vec4,
}

impl Default for TornadoColor {
    fn default() -> Self {
        Self {
            main: Vec4::new(0.85, 0.85, 0.9, 1.0),
            secondary: Vec4::new(0.6, 0.65, 0.7, 1.0),
        }
    }
}
