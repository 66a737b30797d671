//! Damage system: applies each tornado's collider to the targets it overlaps.

use std::collections::BTreeMap;

use hecs::World;

use tornado_core::components::PoolSlot;
use tornado_core::events::DamageDealt;
use tornado_core::types::{InstanceId, TargetId};

use crate::damage::DamageCollider;
use crate::projectile::TornadoProjectile;

/// Run every active collider against this tick's reported contacts.
///
/// Contacts are matched by live handle, so contacts reported for a tornado
/// that has since been released are dropped. Colliders without contacts
/// still run, so targets that left are forgotten.
pub fn run(
    world: &mut World,
    contacts: &BTreeMap<InstanceId, Vec<TargetId>>,
    dt: f32,
) -> Vec<DamageDealt> {
    let mut dealt = Vec::new();
    for (_, (slot, projectile, collider)) in
        world.query_mut::<(&PoolSlot, &TornadoProjectile, &mut DamageCollider)>()
    {
        if !slot.active || projectile.lifecycle.is_recycled() {
            continue;
        }
        let instance = slot.instance;
        let touching = contacts.get(&instance).map(Vec::as_slice).unwrap_or(&[]);
        dealt.extend(collider.apply_contacts(instance, dt, touching));
    }
    dealt
}
