//! Projectile system: lifecycle and motion for every live tornado.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::error;

use tornado_core::components::PoolSlot;
use tornado_core::enums::LifecyclePhase;
use tornado_core::types::{InstanceId, Transform};

use crate::damage::DamageCollider;
use crate::pool::InstancePool;
use crate::projectile::TornadoProjectile;

/// Tick every active tornado. Instances that finish scaling down are reset
/// and collected into `recycle_buffer` for release.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    sim_time: f32,
    dt: f32,
    recycle_buffer: &mut Vec<InstanceId>,
) {
    recycle_buffer.clear();

    for (_, (slot, transform, projectile, collider)) in world.query_mut::<(
        &PoolSlot,
        &mut Transform,
        &mut TornadoProjectile,
        &mut DamageCollider,
    )>() {
        if !slot.active {
            continue;
        }
        if projectile.tick(rng, sim_time, dt, transform) == Some(LifecyclePhase::Recycled) {
            projectile.on_despawn();
            collider.reset();
            recycle_buffer.push(slot.instance);
        }
    }
}

/// Release collected instances back to the pool. Returns how many were released.
pub fn release_recycled(pool: &mut InstancePool, recycle_buffer: &mut Vec<InstanceId>) -> u32 {
    let mut released = 0;
    for instance in recycle_buffer.drain(..) {
        match pool.release(instance) {
            Ok(()) => released += 1,
            Err(err) => error!(
                instance = instance.0,
                error = %err,
                "Failed to release tornado"
            ),
        }
    }
    released
}
