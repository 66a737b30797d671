//! Instance pool backed by the hecs world.
//!
//! Every pooled entity carries a `PoolSlot` and a `Transform`, plus the
//! components its prototype bundle adds. Released entities stay in the world
//! as dormant instances and are rebuilt from the prototype bundle, so an
//! acquired instance is always indistinguishable from a brand-new one.
//!
//! Each acquire issues a new [`InstanceId`], even when a dormant entity is
//! reused. Handles of released instances never resolve again.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use hecs::{Entity, EntityBuilder, World};

use tornado_core::components::PoolSlot;
use tornado_core::error::PoolError;
use tornado_core::state::PoolView;
use tornado_core::types::{InstanceId, PrototypeId, Transform};

/// Builds the prototype-specific components of a fresh instance.
pub type PrototypeBundle = fn() -> EntityBuilder;

pub struct InstancePool {
    world: World,
    /// Maximum live instances per prototype.
    capacity: usize,
    prototypes: BTreeMap<PrototypeId, PrototypeBundle>,
    dormant: BTreeMap<PrototypeId, Vec<Entity>>,
    live: BTreeMap<PrototypeId, usize>,
    /// Live handles only.
    handles: BTreeMap<InstanceId, Entity>,
    next_instance: u64,
}

impl InstancePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            world: World::new(),
            capacity,
            prototypes: BTreeMap::new(),
            dormant: BTreeMap::new(),
            live: BTreeMap::new(),
            handles: BTreeMap::new(),
            next_instance: 1,
        }
    }

    pub fn register_prototype(&mut self, prototype: PrototypeId, bundle: PrototypeBundle) {
        self.prototypes.insert(prototype, bundle);
    }

    /// Hand out an active instance at `position`/`rotation`, reusing a dormant one if possible.
    pub fn acquire(
        &mut self,
        prototype: PrototypeId,
        position: Vec3,
        rotation: Quat,
    ) -> Result<InstanceId, PoolError> {
        let bundle = *self
            .prototypes
            .get(&prototype)
            .ok_or(PoolError::UnknownPrototype(prototype))?;

        let live = self.live.get(&prototype).copied().unwrap_or(0);
        if live >= self.capacity {
            return Err(PoolError::Exhausted {
                prototype,
                capacity: self.capacity,
            });
        }

        let instance = InstanceId(self.next_instance);
        self.next_instance += 1;
        let transform = Transform::new(position, rotation);
        let slot = PoolSlot {
            prototype,
            instance,
            active: true,
        };

        let reused = self.dormant.get_mut(&prototype).and_then(Vec::pop);
        let entity = match reused {
            Some(entity) if self.world.insert(entity, (transform, slot)).is_ok() => entity,
            _ => {
                let mut builder = bundle();
                builder.add(transform).add(slot);
                self.world.spawn(builder.build())
            }
        };

        *self.live.entry(prototype).or_insert(0) += 1;
        self.handles.insert(instance, entity);
        Ok(instance)
    }

    /// Return an instance to the pool.
    ///
    /// The prototype components are rebuilt from scratch and the slot goes
    /// dormant. Releasing a handle twice, or one this pool never issued, is
    /// an error.
    pub fn release(&mut self, instance: InstanceId) -> Result<(), PoolError> {
        let Some(entity) = self.handles.get(&instance).copied() else {
            return Err(if instance.0 > 0 && instance.0 < self.next_instance {
                PoolError::AlreadyReleased(instance)
            } else {
                PoolError::UnknownInstance(instance)
            });
        };
        let slot = *self
            .world
            .get::<&PoolSlot>(entity)
            .map_err(|_| PoolError::UnknownInstance(instance))?;
        let bundle = *self
            .prototypes
            .get(&slot.prototype)
            .ok_or(PoolError::UnknownPrototype(slot.prototype))?;

        let mut builder = bundle();
        builder.add(Transform::default()).add(PoolSlot {
            active: false,
            ..slot
        });
        self.world
            .insert(entity, builder.build())
            .map_err(|_| PoolError::UnknownInstance(instance))?;

        self.handles.remove(&instance);
        if let Some(live) = self.live.get_mut(&slot.prototype) {
            *live = live.saturating_sub(1);
        }
        self.dormant.entry(slot.prototype).or_default().push(entity);
        Ok(())
    }

    /// Resolve a handle to its entity while the instance is live.
    pub fn entity(&self, instance: InstanceId) -> Option<Entity> {
        self.handles.get(&instance).copied()
    }

    /// Whether `instance` is currently live.
    pub fn is_live(&self, instance: InstanceId) -> bool {
        self.handles.contains_key(&instance)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn live_count(&self) -> usize {
        self.live.values().sum()
    }

    pub fn dormant_count(&self) -> usize {
        self.dormant.values().map(Vec::len).sum()
    }

    pub fn view(&self) -> PoolView {
        PoolView {
            live: self.live_count(),
            dormant: self.dormant_count(),
            capacity: self.capacity,
        }
    }
}
