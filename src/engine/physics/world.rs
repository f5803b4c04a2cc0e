use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue, CollisionLayer};
use super::host::{Bounds, PhysicsHost, RayHit};
use crate::core::math::{from_vector, to_point, to_vector};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier3d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier3d::prelude::ColliderHandle;

/// Standard gravity along -Y
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -DEFAULT_GRAVITY, 0.0))
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec3) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = crate::engine::game_loop::FIXED_TIMESTEP;

        Self {
            gravity: to_vector(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    ///
    /// Forces added through [`PhysicsHost::add_force`] act for exactly one
    /// step and are cleared afterwards.
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Layer tag of a collider
    pub fn collider_layer(&self, handle: ColliderHandle) -> Option<CollisionLayer> {
        self.collider_set.get(handle).map(CollisionLayer::of)
    }

    /// Number of live rigid bodies
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vec3 {
        from_vector(&self.gravity)
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsHost for PhysicsWorld {
    fn position(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(body).map(|b| {
            if b.is_kinematic() {
                from_vector(&b.next_position().translation.vector)
            } else {
                from_vector(b.translation())
            }
        })
    }

    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(body).map(|b| from_vector(b.linvel()))
    }

    fn add_force(&mut self, body: RigidBodyHandle, force: Vec3) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.add_force(to_vector(force), true);
        }
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.apply_impulse(to_vector(impulse), true);
        }
    }

    fn set_linear_damping(&mut self, body: RigidBodyHandle, damping: f32) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            b.set_linear_damping(damping);
        }
    }

    fn translate(&mut self, body: RigidBodyHandle, delta: Vec3) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            if b.is_kinematic() {
                // Accumulate on the pending target so frames without a step don't drop motion
                let target = b.next_position().translation.vector + to_vector(delta);
                b.set_next_kinematic_translation(target);
            } else {
                let target = b.translation() + to_vector(delta);
                b.set_translation(target, true);
            }
        }
    }

    fn set_rotation(&mut self, body: RigidBodyHandle, rotation: Quat) {
        if let Some(b) = self.rigid_body_set.get_mut(body) {
            let rotation = nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
                rotation.w, rotation.x, rotation.y, rotation.z,
            ));
            if b.is_kinematic() {
                b.set_next_kinematic_rotation(rotation);
            } else {
                b.set_rotation(rotation, true);
            }
        }
    }

    fn collider_bounds(&self, collider: ColliderHandle) -> Option<Bounds> {
        self.collider_set.get(collider).map(|c| {
            let parent = c.parent().and_then(|handle| self.rigid_body_set.get(handle));
            let aabb = match (parent, c.position_wrt_parent()) {
                // Kinematic moves land on the next step; report where the collider is headed
                (Some(body), Some(local)) if body.is_kinematic() => {
                    c.shape().compute_aabb(&(body.next_position() * local))
                }
                _ => c.compute_aabb(),
            };
            Bounds::new(from_vector(&aabb.mins.coords), from_vector(&aabb.maxs.coords))
        })
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: CollisionLayer,
    ) -> Option<RayHit> {
        let ray = Ray::new(to_point(origin), to_vector(direction));
        let not_excluded = |_: ColliderHandle, c: &Collider| CollisionLayer::of(c) != exclude;
        let filter = QueryFilter::default().exclude_sensors().predicate(&not_excluded);

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .and_then(|(handle, distance)| {
                self.collider_set.get(handle).map(|c| RayHit {
                    collider: handle,
                    layer: CollisionLayer::of(c),
                    distance,
                })
            })
    }

    fn set_collider_enabled(&mut self, collider: ColliderHandle, enabled: bool) {
        if let Some(c) = self.collider_set.get_mut(collider) {
            c.set_enabled(enabled);
        }
    }

    fn is_collider_enabled(&self, collider: ColliderHandle) -> bool {
        self.collider_set
            .get(collider)
            .map(|c| c.is_enabled())
            .unwrap_or(false)
    }
}
