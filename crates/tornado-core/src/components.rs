//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Behavior lives in the simulation crate.

use serde::{Deserialize, Serialize};

use crate::enums::DamageSource;
use crate::types::{InstanceId, PrototypeId};

/// Pool bookkeeping attached to every pooled instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSlot {
    pub prototype: PrototypeId,
    /// Handle issued by the last acquire. Never reused across acquires.
    pub instance: InstanceId,
    /// `false` while the instance sits dormant in the pool.
    pub active: bool,
}

/// Damage payload delivered on each application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageArgs {
    pub damage: f32,
    pub source: DamageSource,
    pub is_critical: bool,
}
