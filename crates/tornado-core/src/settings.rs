//! Upgrade settings for the tornado weapon, loadable from TOML.
//!
//! [`TornadoUpgradeSettings`] is the single configuration record a weapon
//! resolves its per-level stats, movement tuning, augments and status
//! effects from. It is loaded once and shared (`Arc`) by every consumer.
//!
//! Every field is `#[serde(default)]`, so a TOML file only needs the keys it
//! overrides; anything missing falls back to the built-in tuning below.

use std::fs;
use std::path::Path;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AugmentType, StatusEffect};
use crate::error::{ConfigError, ConfigResult};
use crate::stats::*;
use crate::table::ClampedTable;

/// Color assigned to tornadoes carrying a given status effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectColor {
    pub effect: StatusEffect,
    pub color: TornadoColor,
}

/// Complete upgrade data for the tornado weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TornadoUpgradeSettings {
    /// Whether player upgrades may change this weapon's augments at all.
    pub accepts_augments: bool,
    /// Augment categories this weapon reacts to.
    pub supported_augments: Vec<AugmentType>,
    pub per_level_settings: ClampedTable<TornadoStats>,
    pub movement_stats: MovementStats,
    pub size_augment_settings: ClampedTable<SizeAugment>,
    pub spread_augment_settings: ClampedTable<SpreadAugment>,
    pub attack_speed_augment_settings: ClampedTable<AttackSpeedAugment>,
    pub status_effect_args_per_level: ClampedTable<StatusEffectArgs>,
    pub status_effect_colors: Vec<StatusEffectColor>,
}

impl Default for TornadoUpgradeSettings {
    fn default() -> Self {
        Self {
            accepts_augments: true,
            supported_augments: vec![
                AugmentType::Size,
                AugmentType::Spread,
                AugmentType::AttackSpeed,
            ],
            per_level_settings: default_level_table(),
            movement_stats: MovementStats::default(),
            size_augment_settings: ClampedTable::new(vec![
                SizeAugment { bonus_size: 0.25 },
                SizeAugment { bonus_size: 0.5 },
                SizeAugment { bonus_size: 0.75 },
            ]),
            spread_augment_settings: ClampedTable::new(vec![
                SpreadAugment {
                    bonus_projectile_count: 1,
                    spread_damage_multiplier: 0.8,
                },
                SpreadAugment {
                    bonus_projectile_count: 2,
                    spread_damage_multiplier: 0.7,
                },
                SpreadAugment {
                    bonus_projectile_count: 3,
                    spread_damage_multiplier: 0.6,
                },
            ]),
            attack_speed_augment_settings: ClampedTable::new(vec![
                AttackSpeedAugment {
                    shoot_interval_deduction: 0.25,
                },
                AttackSpeedAugment {
                    shoot_interval_deduction: 0.5,
                },
                AttackSpeedAugment {
                    shoot_interval_deduction: 0.75,
                },
            ]),
            status_effect_args_per_level: ClampedTable::new(vec![
                StatusEffectArgs::default(),
                StatusEffectArgs::default(),
                StatusEffectArgs {
                    effect: StatusEffect::Shock,
                    duration_secs: 1.0,
                    potency: 0.25,
                },
                StatusEffectArgs {
                    effect: StatusEffect::Shock,
                    duration_secs: 1.5,
                    potency: 0.4,
                },
            ]),
            status_effect_colors: default_status_colors(),
        }
    }
}

/// Four levels of escalating stats starting from the base constants.
fn default_level_table() -> ClampedTable<TornadoStats> {
    let levels = (0..4u32)
        .map(|level| {
            let l = level as f32;
            let attack_rate = BASE_ATTACK_RATE_SECS - 0.25 * l;
            TornadoStats {
                damage: BASE_DAMAGE + DAMAGE_PER_LEVEL * l,
                damage_interval: BASE_DAMAGE_INTERVAL_SECS,
                duration: BASE_DURATION_SECS + 0.5 * l,
                scale: BASE_SCALE + 0.25 * l,
                attack_rate,
                attack_interval: attack_rate,
                count: 1 + level / 2,
            }
        })
        .collect();
    ClampedTable::new(levels)
}

fn default_status_colors() -> Vec<StatusEffectColor> {
    vec![
        StatusEffectColor {
            effect: StatusEffect::None,
            color: TornadoColor::default(),
        },
        StatusEffectColor {
            effect: StatusEffect::Burn,
            color: TornadoColor {
                main: Vec4::new(1.0, 0.45, 0.1, 1.0),
                secondary: Vec4::new(0.9, 0.2, 0.05, 1.0),
            },
        },
        StatusEffectColor {
            effect: StatusEffect::Freeze,
            color: TornadoColor {
                main: Vec4::new(0.55, 0.85, 1.0, 1.0),
                secondary: Vec4::new(0.3, 0.6, 0.95, 1.0),
            },
        },
        StatusEffectColor {
            effect: StatusEffect::Poison,
            color: TornadoColor {
                main: Vec4::new(0.45, 0.9, 0.3, 1.0),
                secondary: Vec4::new(0.25, 0.6, 0.15, 1.0),
            },
        },
        StatusEffectColor {
            effect: StatusEffect::Shock,
            color: TornadoColor {
                main: Vec4::new(0.95, 0.95, 0.4, 1.0),
                secondary: Vec4::new(0.6, 0.5, 1.0, 1.0),
            },
        },
    ]
}

impl TornadoUpgradeSettings {
    /// Whether upgrades of the given augment category are handled.
    pub fn has_augment_support(&self, augment: AugmentType) -> bool {
        self.supported_augments.contains(&augment)
    }

    /// Color configured for a status effect, if any.
    pub fn color_for(&self, effect: StatusEffect) -> Option<TornadoColor> {
        self.status_effect_colors
            .iter()
            .find(|entry| entry.effect == effect)
            .map(|entry| entry.color)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a TOML settings file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Empty tables are accepted here: a weapon with no per-level stats
    /// simply never fires.
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.movement_stats;
        check_speed("movement_stats.min_speed", m.min_speed)?;
        check_speed("movement_stats.max_speed", m.max_speed)?;
        check_non_negative("movement_stats.speed_change_rate", m.speed_change_rate)?;
        check_non_negative("movement_stats.noise_speed", m.noise_speed)?;
        check_non_negative("movement_stats.scale_up_time", m.scale_up_time)?;
        check_non_negative("movement_stats.scale_down_time", m.scale_down_time)?;

        for stats in self.per_level_settings.iter() {
            check_non_negative("per_level_settings.damage", stats.damage)?;
            check_non_negative("per_level_settings.damage_interval", stats.damage_interval)?;
            check_non_negative("per_level_settings.duration", stats.duration)?;
            check_non_negative("per_level_settings.scale", stats.scale)?;
            if !(stats.attack_rate > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "per_level_settings.attack_rate",
                    reason: format!("must be > 0, got {}", stats.attack_rate),
                });
            }
        }

        for spread in self.spread_augment_settings.iter() {
            check_non_negative(
                "spread_augment_settings.spread_damage_multiplier",
                spread.spread_damage_multiplier,
            )?;
        }
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0, got {}", value),
        })
    }
}

fn check_speed(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.abs() <= SPEED_LIMIT {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be within ±{}, got {}", SPEED_LIMIT, value),
        })
    }
}
