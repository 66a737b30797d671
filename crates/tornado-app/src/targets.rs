//! Stationary dummy targets standing in for enemies in the headless host.
//!
//! The engine has no physics; the host decides overlaps and reports them.
//! A tornado touches a target when the target lies strictly inside its current
//! scale radius on the ground plane.

use glam::{Vec2, Vec3};

use tornado_core::state::TickReport;
use tornado_core::types::{InstanceId, TargetId};

/// A ring of dummy targets around a center point.
#[derive(Debug, Clone)]
pub struct TargetField {
    targets: Vec<(TargetId, Vec3)>,
}

impl TargetField {
    /// Place `count` targets evenly on a circle of `radius` around `center`.
    pub fn ring(center: Vec3, radius: f32, count: u32) -> Self {
        let targets = (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count.max(1) as f32;
                let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * radius;
                (TargetId(i), center + offset)
            })
            .collect();
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Overlaps for every projectile in the report that touches something.
    pub fn contacts(&self, report: &TickReport) -> Vec<(InstanceId, Vec<TargetId>)> {
        report
            .projectiles
            .iter()
            .filter_map(|projectile| {
                let center = ground(projectile.position);
                let touching: Vec<TargetId> = self
                    .targets
                    .iter()
                    .filter(|(_, position)| {
                        ground(*position).distance(center) < projectile.scale
                    })
                    .map(|(id, _)| *id)
                    .collect();
                (!touching.is_empty()).then_some((projectile.instance, touching))
            })
            .collect()
    }
}

fn ground(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}
