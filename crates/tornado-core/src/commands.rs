//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next unpaused tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::WobbleDirection;
use crate::types::InstanceId;

/// All host-initiated weapon and projectile actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WeaponCommand {
    // --- Leveling ---
    /// Reset the weapon to level 0 stats.
    SetBaseLevel,
    /// Advance the weapon one level.
    IncreaseLevel,
    /// Set the multiplier applied to base damage before crit resolution.
    SetBaseDamageMultiplier { multiplier: f32 },

    // --- Spawning ---
    /// Fire one tornado immediately, outside the attack cadence.
    SpawnNow,

    // --- Projectile control ---
    /// Start the scale-down of a live tornado early.
    Dissipate { instance: InstanceId },
    /// Trigger a cosmetic wobble on a live tornado.
    Wobble {
        instance: InstanceId,
        direction: WobbleDirection,
    },
}
