//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Player upgrade categories broadcast on the upgrade bus.
///
/// Only `AttackSpeed`, `ProjectileSize` and `Spread` map to tornado augments;
/// the rest belong to other weapons or to the player and are ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeType {
    /// The tornado weapon itself (used as the upgrade-table category).
    Tornado,
    AttackSpeed,
    ProjectileSize,
    Spread,
    Damage,
    CritChance,
    MoveSpeed,
    MaxHealth,
}

/// Augment categories a weapon's upgrade settings may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AugmentType {
    Size,
    Spread,
    AttackSpeed,
}

impl UpgradeType {
    /// The augment category this upgrade feeds, if any.
    pub fn augment(self) -> Option<AugmentType> {
        match self {
            UpgradeType::AttackSpeed => Some(AugmentType::AttackSpeed),
            UpgradeType::ProjectileSize => Some(AugmentType::Size),
            UpgradeType::Spread => Some(AugmentType::Spread),
            _ => None,
        }
    }
}

/// Status effect a tornado applies alongside its damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    #[default]
    None,
    Burn,
    Freeze,
    Poison,
    Shock,
}

/// Projectile lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    /// Growing from the spawn scale to the target scale.
    #[default]
    ScalingUp,
    /// Full size, counting down the configured duration.
    Steady,
    /// Shrinking to zero before release.
    ScalingDown,
    /// Released to the pool. Terminal.
    Recycled,
}

/// Origin of a damage application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    #[default]
    Tornado,
}

/// Direction of a cosmetic wobble pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WobbleDirection {
    Up,
    Down,
}
