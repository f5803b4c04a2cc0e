use super::collision::CollisionLayer;
use crate::core::math::to_vector;
use glam::Vec3;
use rapier3d::prelude::*;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Vec3,
    gravity_scale: Real,
    linear_damping: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        let dynamic = body_type == RigidBodyType::Dynamic;
        Self {
            body_type,
            position: Vec3::ZERO,
            gravity_scale: if dynamic { 1.0 } else { 0.0 },
            linear_damping: if dynamic { 0.5 } else { 0.0 },
            can_sleep: dynamic,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic)
    }

    /// Create a new kinematic position-based body (moved directly by game code)
    pub fn new_kinematic_position_based() -> Self {
        Self::with_type(RigidBodyType::KinematicPositionBased)
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed)
    }

    /// Set the initial position of the body
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock all rotations; yaw is then driven explicitly by game code
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes |= LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .translation(to_vector(self.position))
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .angular_damping(1.0)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating tagged colliders
pub struct ColliderBuilder3D {
    shape: SharedShape,
    layer: CollisionLayer,
    offset: Vec3,
    is_sensor: bool,
    enabled: bool,
    friction: Real,
    density: Real,
}

impl ColliderBuilder3D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            layer: CollisionLayer::Default,
            offset: Vec3::ZERO,
            is_sensor: false,
            enabled: true,
            friction: 0.5,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider from half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::with_shape(SharedShape::cuboid(
            half_extents.x,
            half_extents.y,
            half_extents.z,
        ))
    }

    /// Create an upright capsule (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        Self::with_shape(SharedShape::capsule_y(half_height, radius))
    }

    /// Set the layer (collision groups and user-data tag)
    pub fn layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Offset relative to the parent body
    pub fn offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Make this a sensor (detects overlaps but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Start enabled or disabled
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let mut collider = ColliderBuilder::new(self.shape)
            .translation(to_vector(self.offset))
            .collision_groups(self.layer.to_interaction_groups())
            .user_data(self.layer.to_user_data())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        collider.set_enabled(self.enabled);
        collider
    }
}

/// Common rigid body configurations for arena objects
pub mod presets {
    use super::*;

    /// Capsule half-height for a character of the given total height and radius
    fn capsule_half_height(height: Real, radius: Real) -> Real {
        ((height / 2.0) - radius).max(0.0)
    }

    /// Player body (dynamic, rotation locked, never sleeps)
    pub fn player_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Player body moved directly by a character controller
    pub fn kinematic_player_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(position)
            .build()
    }

    /// Player collider (capsule)
    pub fn player_collider(radius: Real, height: Real) -> Collider {
        ColliderBuilder3D::capsule(capsule_half_height(height, radius), radius)
            .layer(CollisionLayer::Player)
            .friction(0.0)
            .build()
    }

    /// Enemy body (dynamic, rotation locked)
    pub fn enemy_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Enemy collider (capsule)
    pub fn enemy_collider(radius: Real, height: Real) -> Collider {
        ColliderBuilder3D::capsule(capsule_half_height(height, radius), radius)
            .layer(CollisionLayer::Enemy)
            .friction(0.2)
            .build()
    }

    /// Static terrain slab body
    pub fn terrain_body(position: Vec3) -> RigidBody {
        BodyBuilder::new_fixed().position(position).build()
    }

    /// Terrain slab collider
    pub fn terrain_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::cuboid(half_extents)
            .layer(CollisionLayer::Terrain)
            .friction(0.6)
            .build()
    }

    /// Weapon hit volume; starts disabled so it only reports overlaps during an attack
    pub fn weapon_sensor(half_extents: Vec3, offset: Vec3) -> Collider {
        ColliderBuilder3D::cuboid(half_extents)
            .layer(CollisionLayer::Weapon)
            .offset(offset)
            .sensor(true)
            .density(0.0)
            .enabled(false)
            .build()
    }
}
