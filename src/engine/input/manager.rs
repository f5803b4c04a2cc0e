// Input manager - routes window events to the local player's input state

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::{FrameInput, PlayerInput};
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Main input manager
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(
                InputSource::key(key_code),
                event.state == ElementState::Pressed,
            );
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state == ElementState::Pressed);
    }

    /// Process raw pointer motion (device event)
    pub fn process_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.player.add_pointer_motion(dx as f32, dy as f32);
    }

    /// Route a press/release of a bound source
    pub fn process_source(&mut self, source: InputSource, pressed: bool) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };
        if pressed {
            self.player.press(action);
        } else {
            self.player.release(action);
        }
    }

    /// Gameplay snapshot for this frame
    pub fn frame_input(&self) -> FrameInput {
        self.player.frame_input()
    }

    /// Check if an action was pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }

    /// Clear per-frame state; call once per frame after gameplay has run
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Drop all held state (window lost focus)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
