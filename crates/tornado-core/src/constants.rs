//! Simulation constants and default tuning parameters.

use crate::types::PrototypeId;

/// Host tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the host tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Motion ---

/// Seconds between target-speed resamples.
pub const CHANGE_SPEED_INTERVAL_SECS: f32 = 2.0;

/// Maximum heading turn rate from noise (degrees per second at |noise| = 1).
pub const MAX_NOISE_TURN_DEG: f32 = 45.0;

/// Upper bound (exclusive) of the per-spawn noise time offset.
pub const NOISE_OFFSET_RANGE: f32 = 999.0;

/// Upper bound (exclusive) of the random initial heading (degrees).
pub const INITIAL_HEADING_RANGE_DEG: f32 = 360.0;

/// Hard limit on configured speeds (either sign).
pub const SPEED_LIMIT: f32 = 50.0;

// --- Lifecycle ---

/// Uniform scale every instance starts its scale-up ramp from.
pub const SPAWN_SCALE: f32 = 0.5;

// --- Pooling ---

/// Prototype identifier of the tornado projectile.
pub const TORNADO_PROTOTYPE: PrototypeId = PrototypeId(1);

/// Default number of live instances a pool will hand out per prototype.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

// --- Damage ---

/// Default critical strike chance (0.0 - 1.0).
pub const DEFAULT_CRIT_CHANCE: f32 = 0.1;

/// Default critical strike damage multiplier.
pub const DEFAULT_CRIT_MULTIPLIER: f32 = 2.0;

// --- Visual parameters ---

pub const VFX_PRIMARY_COLOR: &str = "Primary Tornado Color";
pub const VFX_BASE_COLOR: &str = "Tornado Base Color";
pub const VFX_SECONDARY_COLOR: &str = "Secondary Tornado Color";

// --- Default per-level tuning ---

/// Base damage per application at level 0.
pub const BASE_DAMAGE: f32 = 8.0;

/// Extra damage per level.
pub const DAMAGE_PER_LEVEL: f32 = 4.0;

/// Seconds between damage applications while a target stays inside.
pub const BASE_DAMAGE_INTERVAL_SECS: f32 = 0.5;

/// Steady-state lifetime in seconds at level 0.
pub const BASE_DURATION_SECS: f32 = 4.0;

/// Target scale at level 0.
pub const BASE_SCALE: f32 = 1.0;

/// Seconds between attacks at level 0.
pub const BASE_ATTACK_RATE_SECS: f32 = 3.0;
