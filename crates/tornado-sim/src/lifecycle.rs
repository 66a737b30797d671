//! Projectile lifecycle: ScalingUp → Steady → ScalingDown → Recycled.
//!
//! Scale-up grows the instance from `SPAWN_SCALE` to its target scale. Only
//! time spent Steady counts toward the configured duration. Scale-down
//! shrinks from whatever scale the instance had to zero, after which the
//! instance is released exactly once.

use serde::{Deserialize, Serialize};

use tornado_core::constants::SPAWN_SCALE;
use tornado_core::enums::LifecyclePhase;

/// Per-instance lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub phase: LifecyclePhase,
    /// Uniform scale applied to the instance transform.
    pub current_scale: f32,
    /// Scale at the start of the active ramp.
    pub ramp_from: f32,
    /// Scale at the end of the active ramp.
    pub ramp_to: f32,
    /// Seconds into the active ramp.
    pub ramp_elapsed: f32,
    /// Seconds spent Steady.
    pub lifetime: f32,
}

/// Timing inputs for one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleTiming {
    pub duration: f32,
    pub scale_up_time: f32,
    pub scale_down_time: f32,
}

impl Lifecycle {
    /// Lifecycle of a freshly spawned instance growing toward `target_scale`.
    pub fn spawn(target_scale: f32) -> Self {
        Self {
            phase: LifecyclePhase::ScalingUp,
            current_scale: SPAWN_SCALE,
            ramp_from: SPAWN_SCALE,
            ramp_to: target_scale,
            ramp_elapsed: 0.0,
            lifetime: 0.0,
        }
    }

    /// Advance by `dt`. Returns the new phase when a transition happened.
    pub fn step(&mut self, dt: f32, timing: &LifecycleTiming) -> Option<LifecyclePhase> {
        match self.phase {
            LifecyclePhase::ScalingUp => {
                self.ramp_elapsed += dt;
                if self.ramp_elapsed >= timing.scale_up_time {
                    self.current_scale = self.ramp_to;
                    self.lifetime = 0.0;
                    self.phase = LifecyclePhase::Steady;
                    return Some(LifecyclePhase::Steady);
                }
                self.current_scale = self.ramp_scale(timing.scale_up_time);
                None
            }
            LifecyclePhase::Steady => {
                self.lifetime += dt;
                if self.lifetime >= timing.duration {
                    self.enter_scale_down();
                    return Some(LifecyclePhase::ScalingDown);
                }
                None
            }
            LifecyclePhase::ScalingDown => {
                self.ramp_elapsed += dt;
                if self.ramp_elapsed >= timing.scale_down_time {
                    self.current_scale = 0.0;
                    self.phase = LifecyclePhase::Recycled;
                    return Some(LifecyclePhase::Recycled);
                }
                self.current_scale = self.ramp_scale(timing.scale_down_time);
                None
            }
            LifecyclePhase::Recycled => None,
        }
    }

    /// Start scaling down early. Returns false once scale-down has begun.
    pub fn begin_scale_down(&mut self) -> bool {
        match self.phase {
            LifecyclePhase::ScalingUp | LifecyclePhase::Steady => {
                self.enter_scale_down();
                true
            }
            LifecyclePhase::ScalingDown | LifecyclePhase::Recycled => false,
        }
    }

    pub fn is_recycled(&self) -> bool {
        self.phase == LifecyclePhase::Recycled
    }

    /// Zero every timer and scale. Calling it repeatedly is the same as once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn enter_scale_down(&mut self) {
        self.ramp_from = self.current_scale;
        self.ramp_to = 0.0;
        self.ramp_elapsed = 0.0;
        self.phase = LifecyclePhase::ScalingDown;
    }

    fn ramp_scale(&self, ramp_time: f32) -> f32 {
        let t = ramp_fraction(self.ramp_elapsed, ramp_time);
        self.ramp_from + (self.ramp_to - self.ramp_from) * t
    }
}

/// Progress through a ramp of `ramp_time` seconds, clamped to `[0, 1]`.
/// A non-positive ramp time completes immediately.
pub fn ramp_fraction(elapsed: f32, ramp_time: f32) -> f32 {
    if ramp_time <= 0.0 {
        return 1.0;
    }
    (elapsed / ramp_time).clamp(0.0, 1.0)
}
