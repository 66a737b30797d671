//! Events flowing into and out of the simulation.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::enums::{DamageSource, UpgradeType};
use crate::stats::StatusEffectArgs;
use crate::types::{InstanceId, TargetId};

/// A player upgrade notification published on the upgrade bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeEvent {
    pub upgrade_type: UpgradeType,
    /// The player's current level in this upgrade (1 = first pick).
    pub level: u32,
}

/// One damage application from a tornado to a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageDealt {
    pub instance: InstanceId,
    pub target: TargetId,
    pub amount: f32,
    pub is_critical: bool,
    pub source: DamageSource,
    pub status_effect: Option<StatusEffectArgs>,
}

/// A named vector parameter pushed to the visual effect of an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualParam {
    pub instance: InstanceId,
    pub name: String,
    pub value: Vec4,
}
