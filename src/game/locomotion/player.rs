// Player locomotion: mouse look, camera-relative movement and jumping

use glam::{Quat, Vec3};
use log::debug;

use super::kinematic::KinematicMover;
use super::look::{movement_direction, MouseLook};
use super::{drag, drive_force, gravity_force};
use crate::core::math::horizontal;
use crate::engine::input::FrameInput;
use crate::engine::physics::{ColliderHandle, CollisionLayer, PhysicsHost, RigidBodyHandle};
use crate::game::config::{MovementConfig, MovementMode, PlayerConfig};
use crate::game::ground::{self, GroundProbe};

#[derive(Debug, Clone)]
enum Drive {
    Force,
    Kinematic(KinematicMover),
}

/// First-person player body
#[derive(Debug, Clone)]
pub struct PlayerController {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    movement: MovementConfig,
    look: Option<MouseLook>,
    drive: Drive,
    grounded: bool,
}

impl PlayerController {
    pub fn new(config: &PlayerConfig, body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        let drive = match config.movement.mode {
            MovementMode::Force => Drive::Force,
            MovementMode::Kinematic => {
                Drive::Kinematic(KinematicMover::new(body, CollisionLayer::Player))
            }
        };
        Self {
            body,
            collider,
            movement: config.movement.clone(),
            look: config
                .eye_height
                .map(|eye_height| MouseLook::new(&config.look, eye_height)),
            drive,
            grounded: false,
        }
    }

    /// Run one frame of locomotion
    pub fn update<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P, input: &FrameInput, dt: f32) {
        let Some(position) = physics.position(self.body) else {
            return;
        };

        let probe = physics
            .collider_bounds(self.collider)
            .map(|bounds| ground::probe(&*physics, position, bounds, CollisionLayer::Player))
            .unwrap_or(GroundProbe {
                origin: position,
                hit: None,
            });
        self.grounded = probe.grounded();

        if let Some(look) = &mut self.look {
            look.apply(input.look_delta, dt);
        }

        let wants_to_move = input.move_axis.length() > self.movement.input_deadzone;
        let direction = if wants_to_move {
            movement_direction(input.move_axis, self.yaw())
        } else {
            Vec3::ZERO
        };

        match &mut self.drive {
            Drive::Force => {
                let velocity = physics.linear_velocity(self.body).unwrap_or(Vec3::ZERO);
                let speed = horizontal(velocity).length();
                let m = &self.movement;

                let force = drive_force(
                    direction,
                    input.move_axis.length(),
                    m.input_deadzone,
                    speed,
                    m.acceleration,
                    m.max_speed,
                ) + gravity_force(self.grounded, velocity.y, m.gravity);
                physics.add_force(self.body, force);
                physics.set_linear_damping(self.body, drag(self.grounded, m.ground_drag, m.air_drag));

                if self.grounded && input.jump {
                    physics.apply_impulse(self.body, Vec3::Y * m.jump_force);
                    debug!("Jump");
                }
            }
            Drive::Kinematic(mover) => {
                mover.update(physics, &self.movement, direction, &probe, input.jump, dt);
            }
        }

        if let Some(look) = &self.look {
            physics.set_rotation(self.body, look.body_rotation());
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Body yaw in radians; stays zero without a camera
    pub fn yaw(&self) -> f32 {
        self.look.as_ref().map_or(0.0, MouseLook::yaw)
    }

    pub fn pitch(&self) -> f32 {
        self.look.as_ref().map_or(0.0, MouseLook::pitch)
    }

    /// Direction the player is looking
    pub fn facing(&self) -> Vec3 {
        self.look
            .as_ref()
            .map_or(Vec3::NEG_Z, MouseLook::camera_forward)
    }

    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw())
    }

    pub fn camera(&self) -> Option<&MouseLook> {
        self.look.as_ref()
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    pub fn mode(&self) -> MovementMode {
        match self.drive {
            Drive::Force => MovementMode::Force,
            Drive::Kinematic(_) => MovementMode::Kinematic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::Bounds;
    use crate::game::test_support::FakePhysics;
    use approx::assert_relative_eq;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn player_at(physics: &mut FakePhysics, config: &PlayerConfig, feet: f32) -> PlayerController {
        let body = physics.add_body(Vec3::new(0.0, feet + 0.9, 0.0), 1.0);
        let collider = physics.add_collider(
            Bounds::new(Vec3::new(-0.4, feet, -0.4), Vec3::new(0.4, feet + 1.8, 0.4)),
            true,
        );
        PlayerController::new(config, body, collider)
    }

    fn forward() -> FrameInput {
        FrameInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..FrameInput::default()
        }
    }

    #[test]
    fn test_speed_approaches_but_never_exceeds_cap() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut config = PlayerConfig::default();
        config.movement.max_speed = 100.0;
        config.movement.acceleration = 3.0;
        config.movement.ground_drag = 0.0;
        let mut player = player_at(&mut physics, &config, 0.0);

        let mut previous = 0.0;
        for _ in 0..3000 {
            player.update(&mut physics, &forward(), DT);
            physics.integrate(DT);
            let speed = horizontal(physics.body(player.body()).velocity).length();
            assert!(speed <= 100.0, "speed {speed} exceeded the cap");
            assert!(speed >= previous);
            previous = speed;
        }
        assert!(previous > 99.0);
    }

    #[test]
    fn test_force_capped_by_acceleration() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut player = player_at(&mut physics, &PlayerConfig::default(), 0.0);

        player.update(&mut physics, &forward(), DT);
        let force = physics.body(player.body()).force;
        assert_relative_eq!(force.z, -3.0);
        assert_relative_eq!(force.y, 0.0);
    }

    #[test]
    fn test_deadzone_input_ignored() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut player = player_at(&mut physics, &PlayerConfig::default(), 0.0);

        let nudge = FrameInput {
            move_axis: Vec2::new(0.05, 0.05),
            ..FrameInput::default()
        };
        player.update(&mut physics, &nudge, DT);
        assert_eq!(physics.body(player.body()).force, Vec3::ZERO);
    }

    #[test]
    fn test_drag_follows_ground_state() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut grounded = player_at(&mut physics, &PlayerConfig::default(), 0.0);
        let mut airborne = player_at(&mut physics, &PlayerConfig::default(), 5.0);

        grounded.update(&mut physics, &FrameInput::default(), DT);
        airborne.update(&mut physics, &FrameInput::default(), DT);

        assert!(grounded.is_grounded());
        assert!(!airborne.is_grounded());
        assert_eq!(physics.body(grounded.body()).damping, 3.0);
        assert_eq!(physics.body(airborne.body()).damping, 2.5);
        assert_relative_eq!(physics.body(airborne.body()).force.y, -9.81);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut grounded = player_at(&mut physics, &PlayerConfig::default(), 0.0);
        let mut airborne = player_at(&mut physics, &PlayerConfig::default(), 5.0);

        let jump = FrameInput {
            jump: true,
            ..FrameInput::default()
        };
        grounded.update(&mut physics, &jump, DT);
        airborne.update(&mut physics, &jump, DT);

        assert_relative_eq!(physics.body(grounded.body()).velocity.y, 10.0);
        assert_eq!(physics.body(airborne.body()).velocity.y, 0.0);
    }

    #[test]
    fn test_look_turns_body_and_movement() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut player = player_at(&mut physics, &PlayerConfig::default(), 0.0);

        // 100 deg/px/s * 9 px * 0.1 s = 90 degrees to the right
        let turn = FrameInput {
            look_delta: Vec2::new(9.0, 0.0),
            ..forward()
        };
        player.update(&mut physics, &turn, 0.1);

        let force = physics.body(player.body()).force;
        assert_relative_eq!(force.x, 3.0, epsilon = 1e-4);
        assert_relative_eq!(force.z, 0.0, epsilon = 1e-4);
        assert_eq!(physics.body(player.body()).rotation, player.body_rotation());
    }

    #[test]
    fn test_without_camera_look_is_skipped() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let config = PlayerConfig {
            eye_height: None,
            ..PlayerConfig::default()
        };
        let mut player = player_at(&mut physics, &config, 0.0);

        let turn = FrameInput {
            look_delta: Vec2::new(50.0, 50.0),
            ..forward()
        };
        player.update(&mut physics, &turn, DT);

        assert_eq!(player.yaw(), 0.0);
        assert_eq!(player.pitch(), 0.0);
        assert!(player.camera().is_none());
        assert_eq!(physics.body(player.body()).rotation, Quat::IDENTITY);
        // Movement still works along the default facing
        assert_relative_eq!(physics.body(player.body()).force.z, -3.0);
    }

    #[test]
    fn test_kinematic_mode_moves_body_directly() {
        let mut physics = FakePhysics::default();
        physics.add_ground(0.0, CollisionLayer::Terrain);
        let mut config = PlayerConfig::default();
        config.movement.mode = MovementMode::Kinematic;
        let mut player = player_at(&mut physics, &config, 0.0);
        assert_eq!(player.mode(), MovementMode::Kinematic);

        player.update(&mut physics, &forward(), 0.5);
        let body = physics.body(player.body());
        assert_eq!(body.force, Vec3::ZERO);
        // 3 m/s^2 for 0.5 s, then moved for 0.5 s
        assert_relative_eq!(body.position.z, -0.75);
    }
}
