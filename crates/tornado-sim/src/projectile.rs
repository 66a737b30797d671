//! Tornado projectile behavior.
//!
//! A `TornadoProjectile` component drives one pooled instance: it owns the
//! instance's lifecycle and motion state and the stats it was spawned with.
//! The damage payload lives next to it in a [`DamageCollider`].

use glam::Vec3;
use hecs::EntityBuilder;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use tornado_core::constants::{VFX_BASE_COLOR, VFX_PRIMARY_COLOR, VFX_SECONDARY_COLOR};
use tornado_core::enums::{LifecyclePhase, WobbleDirection};
use tornado_core::events::VisualParam;
use tornado_core::stats::{MovementStats, TornadoColor, TornadoStats};
use tornado_core::types::{InstanceId, Transform};

use crate::damage::DamageCollider;
use crate::lifecycle::{Lifecycle, LifecycleTiming};
use crate::motion::MotionState;

/// Cosmetic wobble pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    pub direction: WobbleDirection,
    /// Seconds until the wobble clears.
    pub remaining: f32,
}

/// Per-instance tornado state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TornadoProjectile {
    pub stats: TornadoStats,
    pub movement: MovementStats,
    pub bonus_size: f32,
    pub color: TornadoColor,
    pub lifecycle: Lifecycle,
    pub motion: MotionState,
    pub wobble: Option<Wobble>,
}

impl TornadoProjectile {
    pub fn set_tornado_stats(&mut self, stats: TornadoStats, movement: MovementStats, bonus_size: f32) {
        self.stats = stats;
        self.movement = movement;
        self.bonus_size = bonus_size;
    }

    /// Store the color and return the visual parameters to push for it.
    pub fn set_tornado_color(&mut self, instance: InstanceId, color: TornadoColor) -> Vec<VisualParam> {
        self.color = color;
        [
            (VFX_PRIMARY_COLOR, color.main),
            (VFX_BASE_COLOR, color.main),
            (VFX_SECONDARY_COLOR, color.secondary),
        ]
        .into_iter()
        .map(|(name, value)| VisualParam {
            instance,
            name: name.to_string(),
            value,
        })
        .collect()
    }

    /// Scale the instance grows to after spawning.
    pub fn target_scale(&self) -> f32 {
        self.stats.scale + self.bonus_size
    }

    /// Start a fresh lifecycle and randomize motion. Call after `set_tornado_stats`.
    pub fn on_spawn(&mut self, rng: &mut ChaCha8Rng, speed_timer_seed: f32) {
        self.lifecycle = Lifecycle::spawn(self.target_scale());
        self.motion = MotionState::spawn(rng, speed_timer_seed);
        self.wobble = None;
    }

    /// Return every field to its freshly constructed value.
    pub fn on_despawn(&mut self) {
        *self = Self::default();
    }

    /// Cut the lifetime short. Returns false once scale-down has begun.
    pub fn dissipate(&mut self) -> bool {
        self.lifecycle.begin_scale_down()
    }

    /// Start a wobble; a new wobble replaces a running one.
    pub fn wobble(&mut self, direction: WobbleDirection) {
        let remaining = match direction {
            WobbleDirection::Up => self.movement.scale_up_time,
            WobbleDirection::Down => self.movement.scale_down_time,
        };
        self.wobble = Some(Wobble {
            direction,
            remaining,
        });
    }

    pub fn is_wobbling(&self) -> bool {
        self.wobble.is_some()
    }

    fn timing(&self) -> LifecycleTiming {
        LifecycleTiming {
            duration: self.stats.duration,
            scale_up_time: self.movement.scale_up_time,
            scale_down_time: self.movement.scale_down_time,
        }
    }

    /// Advance lifecycle, then motion. Returns the lifecycle transition, if any.
    ///
    /// Once recycled the instance is left untouched.
    pub fn tick(
        &mut self,
        rng: &mut ChaCha8Rng,
        sim_time: f32,
        dt: f32,
        transform: &mut Transform,
    ) -> Option<LifecyclePhase> {
        if self.lifecycle.is_recycled() {
            return None;
        }

        let transition = self.lifecycle.step(dt, &self.timing());
        transform.scale = Vec3::splat(self.lifecycle.current_scale);
        if self.lifecycle.is_recycled() {
            self.wobble = None;
            return transition;
        }

        let movement = self.movement;
        transform.position += self.motion.step(rng, sim_time, dt, transform.scale.x, &movement);

        if let Some(wobble) = self.wobble.as_mut() {
            wobble.remaining -= dt;
            if wobble.remaining <= 0.0 {
                self.wobble = None;
            }
        }
        transition
    }
}

/// Components a fresh tornado instance is built from.
pub fn tornado_bundle() -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    builder
        .add(TornadoProjectile::default())
        .add(DamageCollider::default());
    builder
}
