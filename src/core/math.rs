// Math utilities and helper functions

use glam::{Vec2, Vec3};
use rapier3d::prelude::{nalgebra, point, vector, Point, Real, Vector};

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to_target / distance * max_delta
    }
}

/// Drop the vertical component of a vector
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal (XZ) components packed into a 2D vector
pub fn horizontal_2d(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Convert a glam vector into rapier's nalgebra vector
pub fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

/// Convert a glam vector into a rapier point
pub fn to_point(v: Vec3) -> Point<Real> {
    point![v.x, v.y, v.z]
}

/// Convert rapier's nalgebra vector into glam
pub fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
