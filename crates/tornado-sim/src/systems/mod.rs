//! ECS systems that operate on the pooled tornado instances each tick.
//!
//! Systems are free functions over `&mut World` (or the pool that owns it).
//! They hold no state of their own; all state lives in components.

pub mod damage;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
