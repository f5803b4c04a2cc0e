// Gameplay: first-person locomotion, ground probing and melee combat
//
// - `ground`: downward probe that classifies a body as grounded
// - `locomotion`: player (force or kinematic) and enemy movement
// - `combat`: attack sequencing, weapon hit volume, damage and flash
// - `scene`: owns the physics world and wires the pieces together

pub mod combat;
pub mod config;
pub mod ground;
pub mod locomotion;
pub mod scene;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::SceneConfig;
pub use scene::{Scene, SceneError, SceneEvent};
