//! Snapshot system: builds the TickReport from the world and this tick's events.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use tornado_core::components::PoolSlot;
use tornado_core::events::{DamageDealt, VisualParam};
use tornado_core::state::{PoolView, ProjectileView, TickReport, WeaponView};
use tornado_core::types::{SimTime, Transform};

use crate::projectile::TornadoProjectile;

/// Events collected while running the systems of one tick.
#[derive(Debug, Default)]
pub struct TickEvents {
    pub spawned: u32,
    pub recycled: u32,
    pub dropped: u32,
    pub damage: Vec<DamageDealt>,
    pub visual_params: Vec<VisualParam>,
}

/// Build the report handed to the host after a tick.
pub fn build_report(
    world: &World,
    time: SimTime,
    paused: bool,
    weapon: WeaponView,
    pool: PoolView,
    events: TickEvents,
) -> TickReport {
    TickReport {
        time,
        paused,
        weapon,
        pool,
        spawned: events.spawned,
        recycled: events.recycled,
        dropped: events.dropped,
        damage: events.damage,
        visual_params: events.visual_params,
        projectiles: build_projectiles(world),
    }
}

/// One view per active tornado, ordered by instance id.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&PoolSlot, &Transform, &TornadoProjectile)>()
        .iter()
        .filter(|(_, (slot, _, _))| slot.active)
        .map(|(_, (slot, transform, projectile))| ProjectileView {
            instance: slot.instance,
            position: transform.position,
            scale: transform.scale.x,
            heading_deg: projectile.motion.heading_deg,
            speed: projectile.motion.current_speed,
            phase: projectile.lifecycle.phase,
            wobbling: projectile.is_wobbling(),
        })
        .collect();
    views.sort_by_key(|view| view.instance);
    views
}
