// Mouse look: unbounded body yaw, clamped camera pitch

use glam::{Quat, Vec2, Vec3};

use crate::game::config::LookConfig;

/// First-person camera orientation
///
/// Yaw turns the body around +Y and is never wrapped. Pitch only tilts the
/// camera and stays within the configured angle. Forward is -Z.
#[derive(Debug, Clone)]
pub struct MouseLook {
    sensitivity: f32,
    max_pitch: f32,
    eye_height: f32,
    yaw: f32,
    pitch: f32,
}

impl MouseLook {
    pub fn new(config: &LookConfig, eye_height: f32) -> Self {
        Self {
            sensitivity: config.mouse_sensitivity,
            max_pitch: config.max_look_angle.to_radians(),
            eye_height,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Turn by a pointer delta (pixels, +y up) scaled by sensitivity and frame time
    pub fn apply(&mut self, delta: Vec2, dt: f32) {
        let turn = delta * self.sensitivity * dt;
        self.yaw -= turn.x.to_radians();
        self.pitch = (self.pitch + turn.y.to_radians()).clamp(-self.max_pitch, self.max_pitch);
    }

    /// Radians, counter-clockwise seen from above
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Radians, positive looks up
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn camera_rotation(&self) -> Quat {
        self.body_rotation() * Quat::from_rotation_x(self.pitch)
    }

    /// Where the camera points, pitch included
    pub fn camera_forward(&self) -> Vec3 {
        self.camera_rotation() * Vec3::NEG_Z
    }

    pub fn eye_position(&self, body_position: Vec3) -> Vec3 {
        body_position + Vec3::Y * self.eye_height
    }
}

/// Horizontal unit basis `(forward, right)` for a yaw angle
pub fn ground_basis(yaw: f32) -> (Vec3, Vec3) {
    let rotation = Quat::from_rotation_y(yaw);
    (rotation * Vec3::NEG_Z, rotation * Vec3::X)
}

/// Camera-relative movement direction on the ground plane
///
/// `axis.x` strafes right, `axis.y` moves forward. The result is unit length
/// or zero.
pub fn movement_direction(axis: Vec2, yaw: f32) -> Vec3 {
    let (forward, right) = ground_basis(yaw);
    let direction = right * axis.x + forward * axis.y;
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn look() -> MouseLook {
        MouseLook::new(&LookConfig::default(), 0.7)
    }

    #[test]
    fn test_look_delta_scaled_by_sensitivity_and_dt() {
        let mut look = look();
        // 100 deg/px/s * 0.9 px * 0.1 s = 9 degrees up
        look.apply(Vec2::new(0.0, 0.9), 0.1);
        assert_relative_eq!(look.pitch(), 9f32.to_radians(), epsilon = 1e-5);
    }

    #[test]
    fn test_pointer_right_turns_right() {
        let mut look = look();
        look.apply(Vec2::new(0.9, 0.0), 0.01);
        assert!(look.yaw() < 0.0);
        assert!(look.camera_forward().x > 0.0);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut look = look();
        look.apply(Vec2::new(0.0, 1000.0), 1.0);
        assert_relative_eq!(look.pitch(), 80f32.to_radians());
        look.apply(Vec2::new(0.0, -5000.0), 1.0);
        assert_relative_eq!(look.pitch(), -80f32.to_radians());
    }

    #[test]
    fn test_yaw_unbounded() {
        let mut look = look();
        for _ in 0..10 {
            look.apply(Vec2::new(-5.0, 0.0), 0.1);
        }
        // 50 degrees per frame, past a full turn
        assert_relative_eq!(look.yaw(), 500f32.to_radians(), epsilon = 1e-3);
    }

    #[test]
    fn test_pitch_does_not_tilt_body() {
        let mut look = look();
        look.apply(Vec2::new(0.0, 0.5), 1.0);
        let body_forward = look.body_rotation() * Vec3::NEG_Z;
        assert_relative_eq!(body_forward.y, 0.0);
        assert!(look.camera_forward().y > 0.0);
    }

    #[test]
    fn test_movement_direction_follows_yaw() {
        let forward = movement_direction(Vec2::new(0.0, 1.0), 0.0);
        assert_relative_eq!(forward.z, -1.0);

        // Quarter turn left: forward input now moves along -X
        let turned = movement_direction(Vec2::new(0.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(turned.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(turned.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let direction = movement_direction(Vec2::new(1.0, 1.0), 0.3);
        assert_relative_eq!(direction.length(), 1.0, epsilon = 1e-6);
        assert_eq!(direction.y, 0.0);
        assert_eq!(movement_direction(Vec2::ZERO, 0.3), Vec3::ZERO);
    }

    #[test]
    fn test_eye_position() {
        let look = look();
        assert_eq!(look.eye_position(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(1.0, 1.7, 1.0));
    }
}
