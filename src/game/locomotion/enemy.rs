// Enemy locomotion: ground check, airborne gravity and drag

use super::{drag, gravity_force};
use crate::engine::physics::{ColliderHandle, CollisionLayer, PhysicsHost, RigidBodyHandle};
use crate::game::config::EnemyConfig;
use crate::game::ground;

#[derive(Debug, Clone)]
pub struct EnemyLocomotion {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    gravity: f32,
    ground_drag: f32,
    air_drag: f32,
    grounded: bool,
}

impl EnemyLocomotion {
    pub fn new(config: &EnemyConfig, body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            body,
            collider,
            gravity: config.gravity,
            ground_drag: config.ground_drag,
            air_drag: config.air_drag,
            grounded: false,
        }
    }

    pub fn update<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P) {
        let (Some(position), Some(velocity)) =
            (physics.position(self.body), physics.linear_velocity(self.body))
        else {
            return;
        };

        // Enemies stand on each other's heads without counting it as ground
        self.grounded = physics
            .collider_bounds(self.collider)
            .is_some_and(|bounds| ground::is_grounded(&*physics, position, bounds, CollisionLayer::Enemy));

        physics.add_force(self.body, gravity_force(self.grounded, velocity.y, self.gravity));
        physics.set_linear_damping(self.body, drag(self.grounded, self.ground_drag, self.air_drag));
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }
}
