//! Augment resolution from player upgrade events.
//!
//! Each augment category is upgraded independently. An upgrade at level `n`
//! selects entry `n - 1` of the matching table, clamped to its last entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use tornado_core::enums::{AugmentType, UpgradeType};
use tornado_core::events::UpgradeEvent;
use tornado_core::settings::TornadoUpgradeSettings;
use tornado_core::stats::{AttackSpeedAugment, SizeAugment, SpreadAugment};

/// Currently resolved augments of one weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentSet {
    pub size: SizeAugment,
    pub spread: SpreadAugment,
    pub attack_speed: AttackSpeedAugment,
}

/// Why an upgrade event left the augments unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentRejection {
    /// The settings turn augments off entirely.
    NotAccepted,
    /// The upgrade category has no tornado augment.
    NotAnAugment(UpgradeType),
    /// The category exists but this weapon does not support it.
    Unsupported(AugmentType),
    /// The category is supported but its table has no entries.
    EmptyTable(AugmentType),
}

impl fmt::Display for AugmentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AugmentRejection::NotAccepted => write!(f, "weapon does not accept augments"),
            AugmentRejection::NotAnAugment(upgrade) => {
                write!(f, "upgrade {:?} has no tornado augment", upgrade)
            }
            AugmentRejection::Unsupported(augment) => {
                write!(f, "augment {:?} is not supported", augment)
            }
            AugmentRejection::EmptyTable(augment) => {
                write!(f, "augment table for {:?} is empty", augment)
            }
        }
    }
}

/// Table index for an upgrade level (level 1 is the first entry).
pub fn augment_index(level: u32) -> usize {
    level.saturating_sub(1) as usize
}

impl AugmentSet {
    /// Apply one upgrade event. Only the matching category changes.
    pub fn apply_upgrade(
        &mut self,
        settings: &TornadoUpgradeSettings,
        event: &UpgradeEvent,
    ) -> Result<AugmentType, AugmentRejection> {
        if !settings.accepts_augments {
            return Err(AugmentRejection::NotAccepted);
        }
        let augment = event
            .upgrade_type
            .augment()
            .ok_or(AugmentRejection::NotAnAugment(event.upgrade_type))?;
        if !settings.has_augment_support(augment) {
            return Err(AugmentRejection::Unsupported(augment));
        }

        let index = augment_index(event.level);
        let missing = AugmentRejection::EmptyTable(augment);
        match augment {
            AugmentType::Size => {
                self.size = *settings.size_augment_settings.get_clamped(index).ok_or(missing)?;
            }
            AugmentType::Spread => {
                self.spread = *settings.spread_augment_settings.get_clamped(index).ok_or(missing)?;
            }
            AugmentType::AttackSpeed => {
                self.attack_speed = *settings
                    .attack_speed_augment_settings
                    .get_clamped(index)
                    .ok_or(missing)?;
            }
        }
        Ok(augment)
    }

    pub fn bonus_size(&self) -> f32 {
        self.size.bonus_size
    }

    pub fn bonus_projectile_count(&self) -> u32 {
        self.spread.bonus_projectile_count
    }

    pub fn interval_deduction(&self) -> f32 {
        self.attack_speed.shoot_interval_deduction
    }

    /// Damage multiplier from spreading; 1.0 unless the spread adds projectiles.
    pub fn spread_damage_multiplier(&self) -> f32 {
        if self.spread.bonus_projectile_count > 0 {
            self.spread.spread_damage_multiplier
        } else {
            1.0
        }
    }
}
