//! Simulation engine for the tornado weapon.
//!
//! Owns the hecs ECS world through the instance pool, runs the weapon's
//! attack cadence and every projectile's lifecycle and motion, and produces
//! a `TickReport` for the host after each tick.

pub mod augments;
pub mod bus;
pub mod cadence;
pub mod damage;
pub mod engine;
pub mod lifecycle;
pub mod motion;
pub mod noise;
pub mod pause;
pub mod pool;
pub mod projectile;
pub mod systems;
pub mod upgrades;
pub mod weapon;

pub use engine::{SimConfig, SimulationEngine};
pub use tornado_core as core;

#[cfg(test)]
mod tests;
