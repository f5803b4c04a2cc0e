// Local player input state

use super::action::Action;
use glam::Vec2;
use std::collections::HashSet;

/// Everything gameplay reads from input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Movement axis: x = strafe right, y = forward. Length is at most 1.
    pub move_axis: Vec2,
    /// Raw pointer delta accumulated this frame (pixels; +x right, +y up)
    pub look_delta: Vec2,
    /// Jump was pressed this frame
    pub jump: bool,
    /// Attack was pressed this frame
    pub attack: bool,
}

/// Button and pointer state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame
    just_pressed: HashSet<Action>,

    /// Pointer motion since the last frame
    look_delta: Vec2,
}

impl PlayerInput {
    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Accumulate pointer motion (window coordinates: +y is down)
    pub(crate) fn add_pointer_motion(&mut self, dx: f32, dy: f32) {
        self.look_delta += Vec2::new(dx, -dy);
    }

    /// Clear per-frame state; call once per frame after gameplay has read it
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Reset all input state (focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Movement axis from the held direction actions, clamped to unit length
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;

        if self.is_pressed(Action::MoveLeft) {
            axis.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            axis.x += 1.0;
        }
        if self.is_pressed(Action::MoveBack) {
            axis.y -= 1.0;
        }
        if self.is_pressed(Action::MoveForward) {
            axis.y += 1.0;
        }

        axis.clamp_length_max(1.0)
    }

    /// Snapshot for gameplay
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            move_axis: self.move_axis(),
            look_delta: self.look_delta,
            jump: self.just_pressed(Action::Jump),
            attack: self.just_pressed(Action::Attack),
        }
    }
}
