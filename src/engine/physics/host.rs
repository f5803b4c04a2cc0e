// Physics capability consumed by gameplay components
//
// Gameplay code never touches rapier directly. It talks to a `PhysicsHost`,
// which the rapier-backed `PhysicsWorld` implements and which tests replace
// with a small fake integrator.

use super::collision::CollisionLayer;
use glam::{Quat, Vec3};
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Axis-aligned bounds of a collider in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a box centred on `center`
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// First hit of a ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderHandle,
    pub layer: CollisionLayer,
    pub distance: f32,
}

/// Operations gameplay components need from the physics simulation
///
/// Methods addressing a body or collider that no longer exists are no-ops
/// (setters) or return `None` (getters).
pub trait PhysicsHost {
    /// World-space position of a body
    ///
    /// Kinematic bodies report their pending target, so moves issued between
    /// steps are already visible.
    fn position(&self, body: RigidBodyHandle) -> Option<Vec3>;

    /// Current linear velocity of a body
    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec3>;

    /// Add a continuous force for the next simulation step
    fn add_force(&mut self, body: RigidBodyHandle, force: Vec3);

    /// Apply an instantaneous impulse
    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3);

    /// Set the body's linear damping (drag)
    fn set_linear_damping(&mut self, body: RigidBodyHandle, damping: f32);

    /// Move a body directly, bypassing force integration
    fn translate(&mut self, body: RigidBodyHandle, delta: Vec3);

    /// Overwrite a body's orientation
    fn set_rotation(&mut self, body: RigidBodyHandle, rotation: Quat);

    /// World-space bounds of a collider, following `position` for kinematic parents
    fn collider_bounds(&self, collider: ColliderHandle) -> Option<Bounds>;

    /// Cast a ray and return the first hit, skipping sensors and `exclude`
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: CollisionLayer,
    ) -> Option<RayHit>;

    /// Enable or disable a collider
    fn set_collider_enabled(&mut self, collider: ColliderHandle, enabled: bool);

    /// Whether a collider exists and is enabled
    fn is_collider_enabled(&self, collider: ColliderHandle) -> bool;
}
