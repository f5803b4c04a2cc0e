// Input handling system
//
// Keyboard, mouse-button and pointer-motion events from winit are mapped to
// game actions and folded into a per-frame `FrameInput` snapshot that
// gameplay reads.
//
// - `action`: game actions and default key bindings
// - `config`: binding table
// - `player`: pressed / just-pressed state and pointer delta
// - `manager`: routes window events to the player state
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
// input.process_mouse_motion(dx, dy);
//
// // Once per frame
// scene.update(&input.frame_input(), dt);
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::Action;
pub use manager::InputManager;
pub use player::FrameInput;
