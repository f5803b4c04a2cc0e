// In-memory physics host for component tests
//
// Semi-implicit Euler with rapier-style damping. Ground is a set of
// infinite horizontal planes, each tagged with a layer.

use glam::{Quat, Vec3};

use crate::engine::physics::{Bounds, ColliderHandle, CollisionLayer, PhysicsHost, RayHit, RigidBodyHandle};

#[derive(Debug, Clone)]
pub struct FakeBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub mass: f32,
    pub damping: f32,
    /// Force accumulated for the next `integrate`
    pub force: Vec3,
}

#[derive(Debug, Clone)]
struct FakeCollider {
    bounds: Bounds,
    enabled: bool,
    toggles: u32,
}

#[derive(Debug, Clone)]
struct Plane {
    height: f32,
    layer: CollisionLayer,
    collider: ColliderHandle,
}

#[derive(Debug, Default)]
pub struct FakePhysics {
    bodies: Vec<FakeBody>,
    colliders: Vec<FakeCollider>,
    planes: Vec<Plane>,
}

impl FakePhysics {
    pub fn add_body(&mut self, position: Vec3, mass: f32) -> RigidBodyHandle {
        self.bodies.push(FakeBody {
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mass,
            damping: 0.0,
            force: Vec3::ZERO,
        });
        RigidBodyHandle::from_raw_parts(self.bodies.len() as u32 - 1, 0)
    }

    pub fn add_collider(&mut self, bounds: Bounds, enabled: bool) -> ColliderHandle {
        self.colliders.push(FakeCollider {
            bounds,
            enabled,
            toggles: 0,
        });
        ColliderHandle::from_raw_parts(self.colliders.len() as u32 - 1, 0)
    }

    /// Add an infinite horizontal surface at `height`
    pub fn add_ground(&mut self, height: f32, layer: CollisionLayer) -> ColliderHandle {
        let collider = self.add_collider(
            Bounds::new(Vec3::new(f32::MIN, height, f32::MIN), Vec3::new(f32::MAX, height, f32::MAX)),
            true,
        );
        self.planes.push(Plane {
            height,
            layer,
            collider,
        });
        collider
    }

    pub fn body(&self, handle: RigidBodyHandle) -> &FakeBody {
        &self.bodies[handle.into_raw_parts().0 as usize]
    }

    /// Number of enable/disable state changes seen by a collider
    pub fn collider_toggles(&self, handle: ColliderHandle) -> u32 {
        self.collider(handle).map_or(0, |c| c.toggles)
    }

    /// Advance every body by `dt`, consuming accumulated forces
    pub fn integrate(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.velocity += body.force / body.mass * dt;
            body.velocity *= 1.0 / (1.0 + dt * body.damping);
            body.position += body.velocity * dt;
            body.force = Vec3::ZERO;
        }
    }

    fn get(&self, handle: RigidBodyHandle) -> Option<&FakeBody> {
        self.bodies.get(handle.into_raw_parts().0 as usize)
    }

    fn get_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut FakeBody> {
        self.bodies.get_mut(handle.into_raw_parts().0 as usize)
    }

    fn collider(&self, handle: ColliderHandle) -> Option<&FakeCollider> {
        self.colliders.get(handle.into_raw_parts().0 as usize)
    }

    fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut FakeCollider> {
        self.colliders.get_mut(handle.into_raw_parts().0 as usize)
    }
}

impl PhysicsHost for FakePhysics {
    fn position(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.get(body).map(|b| b.position)
    }

    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.get(body).map(|b| b.velocity)
    }

    fn add_force(&mut self, body: RigidBodyHandle, force: Vec3) {
        if let Some(b) = self.get_mut(body) {
            b.force += force;
        }
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3) {
        if let Some(b) = self.get_mut(body) {
            b.velocity += impulse / b.mass;
        }
    }

    fn set_linear_damping(&mut self, body: RigidBodyHandle, damping: f32) {
        if let Some(b) = self.get_mut(body) {
            b.damping = damping;
        }
    }

    fn translate(&mut self, body: RigidBodyHandle, delta: Vec3) {
        if let Some(b) = self.get_mut(body) {
            b.position += delta;
        }
    }

    fn set_rotation(&mut self, body: RigidBodyHandle, rotation: Quat) {
        if let Some(b) = self.get_mut(body) {
            b.rotation = rotation;
        }
    }

    fn collider_bounds(&self, collider: ColliderHandle) -> Option<Bounds> {
        self.collider(collider).map(|c| c.bounds)
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: CollisionLayer,
    ) -> Option<RayHit> {
        if direction.y >= 0.0 {
            return None;
        }
        let down = -direction.normalize().y;
        self.planes
            .iter()
            .filter(|plane| plane.layer != exclude && plane.height <= origin.y)
            .map(|plane| ((origin.y - plane.height) / down, plane))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, plane)| RayHit {
                collider: plane.collider,
                layer: plane.layer,
                distance,
            })
    }

    fn set_collider_enabled(&mut self, collider: ColliderHandle, enabled: bool) {
        if let Some(c) = self.collider_mut(collider) {
            if c.enabled != enabled {
                c.toggles += 1;
            }
            c.enabled = enabled;
        }
    }

    fn is_collider_enabled(&self, collider: ColliderHandle) -> bool {
        self.collider(collider).is_some_and(|c| c.enabled)
    }
}
