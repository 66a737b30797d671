//! Procedural tornado motion.
//!
//! Each tick a tornado:
//! 1. resamples its target speed every `CHANGE_SPEED_INTERVAL_SECS`,
//! 2. eases its current speed toward the target,
//! 3. turns by a noise-driven rate (±45°/s),
//! 4. adds a per-frame sinusoidal sway on top of the heading,
//! 5. moves along the resulting direction, scaled by its own size.
//!
//! Pure numeric transform over `MotionState`; no ECS access.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use tornado_core::constants::*;
use tornado_core::stats::MovementStats;

use crate::noise;

/// Per-instance motion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Integrated heading in degrees, wrapped to `[0, 360)`. Excludes sway.
    pub heading_deg: f32,
    pub current_speed: f32,
    pub target_speed: f32,
    /// Seconds since the target speed was last resampled.
    pub speed_timer: f32,
    /// Noise sample row; randomized per spawn so instances decorrelate.
    pub noise_offset: f32,
}

impl MotionState {
    /// Fresh state for a newly spawned instance.
    ///
    /// `speed_timer_seed` starts the resample timer part-way through its
    /// interval; speed stays zero until the first resample.
    pub fn spawn(rng: &mut ChaCha8Rng, speed_timer_seed: f32) -> Self {
        Self {
            heading_deg: rng.gen_range(0.0..INITIAL_HEADING_RANGE_DEG),
            current_speed: 0.0,
            target_speed: 0.0,
            speed_timer: speed_timer_seed,
            noise_offset: rng.gen_range(0.0..NOISE_OFFSET_RANGE),
        }
    }

    /// Advance one tick and return the displacement to apply to the position.
    pub fn step(
        &mut self,
        rng: &mut ChaCha8Rng,
        sim_time: f32,
        dt: f32,
        scale_x: f32,
        stats: &MovementStats,
    ) -> Vec3 {
        self.speed_timer += dt;
        if self.speed_timer > CHANGE_SPEED_INTERVAL_SECS {
            self.target_speed = sample_speed(rng, stats.min_speed, stats.max_speed);
            self.speed_timer = 0.0;
        }

        self.current_speed = ease_speed(
            self.current_speed,
            self.target_speed,
            dt,
            stats.speed_change_rate,
        );

        let sample = noise::perlin(self.noise_offset, sim_time * stats.noise_speed);
        self.heading_deg = (self.heading_deg + noise_turn_rate(sample) * dt).rem_euclid(360.0);

        let direction = heading_direction(self.heading_deg + sway_deg(sim_time, stats));
        direction.normalize_or_zero() * (self.current_speed * dt * scale_x)
    }
}

/// Uniform draw from `[min, max]`; bounds may be given in either order.
pub fn sample_speed(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    lo + (hi - lo) * rng.gen::<f32>()
}

/// Move `current` toward `target` by the fraction `dt * rate`, clamped to `[0, 1]`.
///
/// Frame-rate dependent by construction; never overshoots the target.
pub fn ease_speed(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    let t = (dt * rate).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Map a `[0, 1]` noise sample onto `[-1, 1]`.
pub fn remap_noise(sample: f32) -> f32 {
    sample.clamp(0.0, 1.0) * 2.0 - 1.0
}

/// Heading turn rate in degrees per second for a noise sample.
pub fn noise_turn_rate(sample: f32) -> f32 {
    remap_noise(sample) * MAX_NOISE_TURN_DEG
}

/// Sway offset in degrees at `sim_time`. Applied per frame, never accumulated.
pub fn sway_deg(sim_time: f32, stats: &MovementStats) -> f32 {
    (sim_time * stats.sway_frequency).sin() * stats.sway_amplitude
}

/// Unit direction on the horizontal (x/z) plane for a heading in degrees.
pub fn heading_direction(heading_deg: f32) -> Vec3 {
    let radians = heading_deg.to_radians();
    Vec3::new(radians.cos(), 0.0, radians.sin())
}
