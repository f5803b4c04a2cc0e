// Host loop timing
//
// Gameplay runs in two cadences: a variable per-frame update (look,
// movement input, timers) and a fixed-rate physics step. `GameLoop` turns
// wall-clock time into both.

use std::time::{Duration, Instant};

/// Physics step rate (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Longest frame delta handed to per-frame updates (hitches, debugger stops)
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Work scheduled for one host frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTicks {
    /// Seconds to advance per-frame logic by (0 while paused)
    pub delta: f32,
    /// Number of fixed physics steps to run
    pub physics_steps: u32,
}

/// Game loop timing state
pub struct GameLoop {
    accumulator: Duration,
    last_frame_time: Instant,
    paused: bool,
    frame_times: Vec<Duration>,
    frame_count: u64,
    step_count: u64,
    current_fps: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            step_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame using the wall clock
    pub fn begin_frame(&mut self) -> FrameTicks {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit frame duration
    pub fn advance(&mut self, elapsed: Duration) -> FrameTicks {
        self.frame_count += 1;

        self.frame_times.push(elapsed);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return FrameTicks {
                delta: 0.0,
                physics_steps: 0,
            };
        }

        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }
        // Drop backlog we refused to simulate instead of replaying it next frame
        if steps == MAX_PHYSICS_STEPS && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::warn!(
                "Frame took {:?}; dropping {:?} of simulation backlog",
                elapsed,
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.step_count += u64::from(steps);
        FrameTicks {
            delta: elapsed.as_secs_f32().min(MAX_FRAME_DELTA),
            physics_steps: steps,
        }
    }

    /// Average frames per second over the last 60 frames
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total physics steps handed out
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
