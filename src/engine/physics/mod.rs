// Physics system using rapier3d

pub mod body;
mod collision;
mod host;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionLayer};
pub use host::{Bounds, PhysicsHost, RayHit};
pub use world::{PhysicsWorld, DEFAULT_GRAVITY};
