// Ground check: one short downward ray from the bottom of a collider

use glam::Vec3;

use crate::engine::physics::{Bounds, CollisionLayer, PhysicsHost, RayHit};

/// How far above the collider's lowest point the ray starts
pub const EXTRA_HEIGHT: f32 = 0.1;

/// Ray length; reaches just past the collider's lowest point
pub const MAX_DISTANCE: f32 = 0.11;

/// Detail of one ground probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub origin: Vec3,
    pub hit: Option<RayHit>,
}

impl GroundProbe {
    /// Standing on terrain
    pub fn grounded(&self) -> bool {
        self.hit.is_some_and(|hit| hit.layer == CollisionLayer::Terrain)
    }

    /// Gap between the collider's lowest point and the surface below, if any
    pub fn clearance(&self) -> Option<f32> {
        self.hit.map(|hit| hit.distance - EXTRA_HEIGHT)
    }
}

/// Cast the ground ray and report what it found
pub fn probe<P: PhysicsHost + ?Sized>(
    physics: &P,
    position: Vec3,
    bounds: Bounds,
    exclude: CollisionLayer,
) -> GroundProbe {
    let origin = Vec3::new(position.x, bounds.min.y + EXTRA_HEIGHT, position.z);
    GroundProbe {
        origin,
        hit: physics.cast_ray(origin, Vec3::NEG_Y, MAX_DISTANCE, exclude),
    }
}

/// True iff the first surface within reach below `bounds` is terrain
pub fn is_grounded<P: PhysicsHost + ?Sized>(
    physics: &P,
    position: Vec3,
    bounds: Bounds,
    exclude: CollisionLayer,
) -> bool {
    probe(physics, position, bounds, exclude).grounded()
}
