use anyhow::Result;
use glam::Vec3;
use log::{debug, info, warn};
use winit::{
    event::{DeviceEvent, ElementState, Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use game::config::EnemyConfig;
use game::{Scene, SceneConfig, SceneError, SceneEvent};

/// Flat arena with a few enemies in front of the player
fn build_arena() -> Result<Scene, SceneError> {
    let config = SceneConfig {
        spawn: Vec3::new(0.0, 0.9, 4.0),
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(&config)?;
    scene.spawn_terrain(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));

    let enemy = EnemyConfig::default();
    for position in [
        Vec3::new(-3.0, 1.0, -2.0),
        Vec3::new(0.0, 1.0, -4.0),
        Vec3::new(3.0, 1.0, -2.0),
    ] {
        scene.spawn_enemy(position, &enemy)?;
    }
    Ok(scene)
}

/// Capture the pointer for mouse look
fn grab_cursor(window: &Window, grab: bool) {
    let result = if grab {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = result {
        warn!("Cursor grab change failed: {}", e);
    }
    window.set_cursor_visible(!grab);
}

fn log_scene_event(scene: &Scene, event: SceneEvent) {
    match event {
        SceneEvent::SwingStarted => debug!("Swing"),
        SceneEvent::SwingFinished => debug!("Swing finished"),
        SceneEvent::EnemyHit { id, health } => debug!("Enemy {} at {} health", id, health),
        SceneEvent::ParticleBurst { id, position } => {
            debug!("Hit sparks on enemy {} at {}", id, position)
        }
        SceneEvent::EnemyDied { id } => {
            info!("Enemy {} defeated, {} left", id, scene.enemy_count());
            if scene.enemy_count() == 0 {
                info!("Arena cleared");
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Blade Arena...");

    let mut scene = build_arena()?;
    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();

    // The window only captures input; nothing is drawn
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Blade Arena")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .build(&event_loop)?;
    grab_cursor(&window, true);
    let mut cursor_grabbed = true;

    info!("WASD to move, mouse to look, space to jump, left click to attack");

    event_loop
        .run(move |event, elwt| match event {
            Event::NewEvents(StartCause::Init) => {
                elwt.set_control_flow(ControlFlow::Poll);
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!(
                        "Close requested after {} frames and {} physics steps ({:.0} fps), shutting down...",
                        game_loop.frame_count(),
                        game_loop.step_count(),
                        game_loop.fps()
                    );
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if !cursor_grabbed && state == ElementState::Pressed {
                        grab_cursor(&window, true);
                        cursor_grabbed = true;
                    }
                    input.process_mouse_button(button, state);
                }
                WindowEvent::Focused(false) => {
                    input.reset();
                    grab_cursor(&window, false);
                    cursor_grabbed = false;
                }
                _ => {}
            },
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => {
                if cursor_grabbed {
                    input.process_mouse_motion(delta.0, delta.1);
                }
            }
            Event::AboutToWait => {
                if input.just_pressed(Action::Pause) {
                    game_loop.toggle_pause();
                    debug!("Running at {:.0} fps", game_loop.fps());
                }
                if input.just_pressed(Action::ReleaseCursor) {
                    grab_cursor(&window, false);
                    cursor_grabbed = false;
                }

                let ticks = game_loop.begin_frame();
                if !game_loop.is_paused() {
                    scene.update(&input.frame_input(), ticks.delta);
                    for _ in 0..ticks.physics_steps {
                        scene.fixed_update();
                    }
                }
                for event in scene.drain_events() {
                    log_scene_event(&scene, event);
                }

                input.update();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
