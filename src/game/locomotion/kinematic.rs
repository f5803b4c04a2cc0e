// Character-controller movement: velocity kept here, body moved directly
//
// Rapier does not stop kinematic bodies against terrain, so landing is
// resolved here: a descent is swept against the surface below and feet
// that end up inside the probe window are snapped onto it.

use glam::{Vec2, Vec3};

use crate::core::math::{horizontal_2d, move_towards};
use crate::engine::physics::{CollisionLayer, PhysicsHost, RigidBodyHandle};
use crate::game::config::MovementConfig;
use crate::game::ground::{GroundProbe, EXTRA_HEIGHT};

#[derive(Debug, Clone)]
pub struct KinematicMover {
    body: RigidBodyHandle,
    layer: CollisionLayer,
    velocity: Vec3,
}

impl KinematicMover {
    /// `layer` is the mover's own layer, skipped by the landing sweep
    pub fn new(body: RigidBodyHandle, layer: CollisionLayer) -> Self {
        Self {
            body,
            layer,
            velocity: Vec3::ZERO,
        }
    }

    /// Step the velocity for one frame and move the body by it
    ///
    /// Horizontal velocity approaches `direction * max_speed` by at most
    /// `acceleration * dt`. Vertical velocity falls at `gravity` while
    /// airborne, is zeroed on landing and set to `jump_force` by a jump.
    pub fn update<P: PhysicsHost + ?Sized>(
        &mut self,
        physics: &mut P,
        config: &MovementConfig,
        direction: Vec3,
        ground: &GroundProbe,
        jump: bool,
        dt: f32,
    ) {
        let target = horizontal_2d(direction) * config.max_speed;
        let current = Vec2::new(self.velocity.x, self.velocity.z);
        let planar = move_towards(current, target, config.acceleration * dt);

        let mut vertical = self.velocity.y;
        let rise = if ground.grounded() {
            if jump {
                vertical = config.jump_force;
            }
            if vertical > 0.0 {
                vertical * dt
            } else {
                vertical = 0.0;
                -ground.clearance().unwrap_or(0.0)
            }
        } else {
            vertical -= config.gravity * dt;
            let fall = vertical * dt;
            match self.landing_gap(&*physics, ground.origin, fall) {
                Some(gap) => {
                    vertical = 0.0;
                    -gap
                }
                None => fall,
            }
        };

        self.velocity = Vec3::new(planar.x, vertical, planar.y);
        physics.translate(self.body, Vec3::new(planar.x * dt, rise, planar.y * dt));
    }

    /// Distance to terrain the feet would reach this frame, if any
    fn landing_gap<P: PhysicsHost + ?Sized>(&self, physics: &P, origin: Vec3, fall: f32) -> Option<f32> {
        if fall >= 0.0 {
            return None;
        }
        physics
            .cast_ray(origin, Vec3::NEG_Y, EXTRA_HEIGHT - fall, self.layer)
            .filter(|hit| hit.layer == CollisionLayer::Terrain)
            .map(|hit| (hit.distance - EXTRA_HEIGHT).max(0.0))
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn horizontal_speed(&self) -> f32 {
        horizontal_2d(self.velocity).length()
    }
}
