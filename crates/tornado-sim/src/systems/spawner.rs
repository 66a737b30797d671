//! Spawner system: turns spawn requests into configured tornado instances.

use glam::{Quat, Vec3};
use rand_chacha::ChaCha8Rng;
use tracing::{error, warn};

use tornado_core::constants::SPAWN_SCALE;
use tornado_core::types::{PrototypeId, Transform};

use crate::damage::{DamageCollider, DamageResolver};
use crate::pool::InstancePool;
use crate::projectile::TornadoProjectile;
use crate::systems::snapshot::TickEvents;
use crate::weapon::TornadoWeapon;

/// Acquire and configure `requests` tornadoes at `origin`.
///
/// A request the pool cannot serve is logged and dropped; the weapon's next
/// attack is the retry.
#[allow(clippy::too_many_arguments)]
pub fn run(
    pool: &mut InstancePool,
    prototype: PrototypeId,
    weapon: &TornadoWeapon,
    resolver: &dyn DamageResolver,
    rng: &mut ChaCha8Rng,
    origin: Vec3,
    requests: u32,
    events: &mut TickEvents,
) {
    for _ in 0..requests {
        let Some(params) = weapon.spawn_params(rng, resolver) else {
            warn!(level = weapon.level(), "Tornado spawn requested without level stats; dropped");
            events.dropped += 1;
            continue;
        };

        let instance = match pool.acquire(prototype, origin, Quat::IDENTITY) {
            Ok(instance) => instance,
            Err(err) => {
                error!(error = %err, "Tornado spawn dropped");
                events.dropped += 1;
                continue;
            }
        };
        let Some(entity) = pool.entity(instance) else {
            error!(instance = instance.0, "Acquired tornado has no entity; spawn dropped");
            if let Err(err) = pool.release(instance) {
                error!(error = %err, "Failed to return tornado to the pool");
            }
            events.dropped += 1;
            continue;
        };
        let world = pool.world();

        // Stats first: the spawn hook reads the target scale from them.
        if let Ok(mut projectile) = world.get::<&mut TornadoProjectile>(entity) {
            projectile.set_tornado_stats(params.stats, params.movement, params.bonus_size);
            projectile.on_spawn(rng, params.speed_timer_seed);
            events
                .visual_params
                .extend(projectile.set_tornado_color(instance, params.color));
        }
        if let Ok(mut collider) = world.get::<&mut DamageCollider>(entity) {
            collider.set_application_mode(true, params.stats.damage_interval);
            collider.set_damage_per_application(params.final_damage, params.is_critical);
            collider.set_status_effect(params.status_effect);
        }
        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            transform.scale = Vec3::splat(SPAWN_SCALE);
        }
        events.spawned += 1;
    }
}
