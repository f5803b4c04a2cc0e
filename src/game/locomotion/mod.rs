// Locomotion: ground-aware movement for the player and enemies
//
// Force-driven variants feed the physics integrator each frame. The
// kinematic variant keeps its own velocity and moves the body directly.

pub mod enemy;
pub mod kinematic;
pub mod look;
pub mod player;

pub use enemy::EnemyLocomotion;
pub use player::PlayerController;

use glam::Vec3;

/// Horizontal push toward the speed cap
///
/// Zero when the input is inside the deadzone or the cap is reached,
/// otherwise `min(acceleration, max_speed - speed)` along `direction`.
pub fn drive_force(
    direction: Vec3,
    input_magnitude: f32,
    deadzone: f32,
    horizontal_speed: f32,
    acceleration: f32,
    max_speed: f32,
) -> Vec3 {
    if input_magnitude <= deadzone || horizontal_speed >= max_speed {
        return Vec3::ZERO;
    }
    direction * acceleration.min(max_speed - horizontal_speed)
}

/// Extra downward force while airborne
///
/// Only applies while falling slower than `gravity`, and never exceeds it.
pub fn gravity_force(grounded: bool, vertical_speed: f32, gravity: f32) -> Vec3 {
    let fall = vertical_speed.abs();
    if grounded || fall >= gravity {
        return Vec3::ZERO;
    }
    Vec3::NEG_Y * gravity.min(gravity - fall)
}

/// Linear damping for the current ground state
pub fn drag(grounded: bool, ground_drag: f32, air_drag: f32) -> f32 {
    if grounded {
        ground_drag
    } else {
        air_drag
    }
}
