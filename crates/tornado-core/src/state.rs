//! Tick report: the visible simulation state handed to the host after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::LifecyclePhase;
use crate::events::{DamageDealt, VisualParam};
use crate::types::{InstanceId, SimTime};

/// Everything the host needs after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub time: SimTime,
    /// True when the tick was skipped because the pause flag was set.
    pub paused: bool,
    pub weapon: WeaponView,
    pub pool: PoolView,
    /// Tornadoes spawned this tick.
    pub spawned: u32,
    /// Tornadoes released to the pool this tick.
    pub recycled: u32,
    /// Spawn requests dropped this tick because the pool could not supply an instance.
    pub dropped: u32,
    pub damage: Vec<DamageDealt>,
    pub visual_params: Vec<VisualParam>,
    pub projectiles: Vec<ProjectileView>,
}

/// Weapon state for display/debugging.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub level: u32,
    /// Seconds between attacks after augments.
    pub attack_interval: f32,
    /// Tornadoes per attack after augments.
    pub projectiles_per_attack: u32,
    pub attack_timer: f32,
    /// False when no per-level stats are configured; the weapon never fires.
    pub configured: bool,
}

/// Pool occupancy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PoolView {
    pub live: usize,
    pub dormant: usize,
    pub capacity: usize,
}

/// A live tornado.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub instance: InstanceId,
    pub position: Vec3,
    pub scale: f32,
    pub heading_deg: f32,
    pub speed: f32,
    pub phase: LifecyclePhase,
    pub wobbling: bool,
}
