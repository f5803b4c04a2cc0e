// Per-instance tuning, set when the arena is authored
//
// Every struct has a `const` base value (used by `Default`) and a
// `validate()` that runs before anything is spawned.

use super::combat::flash::{Color, EasingCurve};
use crate::engine::physics::DEFAULT_GRAVITY;
use glam::Vec3;
use thiserror::Error;

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be a finite number greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("max look angle must be between 0 and 90 degrees (got {0})")]
    LookAngle(f32),

    #[error("starting health must be at least 1 (got {0})")]
    Health(i32),

    #[error("attack timing out of order: started at {started_at}, completed at {completed_at}, clip ends at {duration}")]
    AttackTiming {
        started_at: f32,
        completed_at: f32,
        duration: f32,
    },
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Mouse look tuning
#[derive(Debug, Clone, PartialEq)]
pub struct LookConfig {
    /// Degrees of rotation per pixel of pointer motion per second of frame time
    pub mouse_sensitivity: f32,
    /// Pitch limit in degrees, applied symmetrically up and down
    pub max_look_angle: f32,
}

pub const BASE_LOOK: LookConfig = LookConfig {
    mouse_sensitivity: 100.0,
    max_look_angle: 80.0,
};

impl Default for LookConfig {
    fn default() -> Self {
        BASE_LOOK
    }
}

impl LookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("mouse_sensitivity", self.mouse_sensitivity)?;
        if !(0.0..=90.0).contains(&self.max_look_angle) {
            return Err(ConfigError::LookAngle(self.max_look_angle));
        }
        Ok(())
    }
}

/// How the player body is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Forces and impulses through the physics integrator
    #[default]
    Force,
    /// Character controller: velocity kept in gameplay code, body moved directly
    Kinematic,
}

/// Movement tuning shared by the player variants
#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    pub mode: MovementMode,
    /// Force cap per frame (force mode) or velocity change per second (kinematic)
    pub acceleration: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Upward impulse (force mode) or take-off speed (kinematic)
    pub jump_force: f32,
    pub ground_drag: f32,
    pub air_drag: f32,
    /// Extra downward pull while airborne
    pub gravity: f32,
    /// Input magnitude below which movement input is ignored
    pub input_deadzone: f32,
}

pub const BASE_MOVEMENT: MovementConfig = MovementConfig {
    mode: MovementMode::Force,
    acceleration: 3.0,
    max_speed: 5.0,
    jump_force: 10.0,
    ground_drag: 3.0,
    air_drag: 2.5,
    gravity: DEFAULT_GRAVITY,
    input_deadzone: 0.1,
};

impl Default for MovementConfig {
    fn default() -> Self {
        BASE_MOVEMENT
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("acceleration", self.acceleration)?;
        positive("max_speed", self.max_speed)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("ground_drag", self.ground_drag)?;
        non_negative("air_drag", self.air_drag)?;
        non_negative("gravity", self.gravity)?;
        non_negative("input_deadzone", self.input_deadzone)?;
        Ok(())
    }
}

/// Player body dimensions and tuning
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub look: LookConfig,
    pub movement: MovementConfig,
    pub radius: f32,
    pub height: f32,
    /// Camera height above the body origin; `None` runs without a camera
    pub eye_height: Option<f32>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            look: LookConfig::default(),
            movement: MovementConfig::default(),
            radius: 0.4,
            height: 1.8,
            eye_height: Some(0.7),
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.look.validate()?;
        self.movement.validate()?;
        positive("radius", self.radius)?;
        positive("height", self.height)?;
        Ok(())
    }
}

/// Damage flash appearance
#[derive(Debug, Clone, PartialEq)]
pub struct FlashConfig {
    /// Seconds from hit to full restore
    pub duration: f32,
    /// Blend weight toward `color` over normalized time
    pub curve: EasingCurve,
    pub color: Color,
}

pub const BASE_FLASH: FlashConfig = FlashConfig {
    duration: 0.1,
    curve: EasingCurve::EaseInOut {
        start: 1.0,
        end: 0.0,
    },
    color: Color::WHITE,
};

impl Default for FlashConfig {
    fn default() -> Self {
        BASE_FLASH
    }
}

impl FlashConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("flash duration", self.duration)
    }
}

/// Enemy tuning
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyConfig {
    pub health: i32,
    pub flash: FlashConfig,
    /// Seconds of damage immunity after a hit
    pub damage_cooldown: f32,
    pub gravity: f32,
    pub ground_drag: f32,
    pub air_drag: f32,
    pub radius: f32,
    pub height: f32,
    /// Base material color; each enemy gets its own copy
    pub color: Color,
    pub emission: Color,
}

pub const BASE_ENEMY: EnemyConfig = EnemyConfig {
    health: 30,
    flash: BASE_FLASH,
    damage_cooldown: 1.0,
    gravity: DEFAULT_GRAVITY,
    ground_drag: 3.0,
    air_drag: 2.5,
    radius: 0.5,
    height: 2.0,
    color: Color::rgb(0.6, 0.1, 0.1),
    emission: Color::BLACK,
};

impl Default for EnemyConfig {
    fn default() -> Self {
        BASE_ENEMY
    }
}

impl EnemyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.health < 1 {
            return Err(ConfigError::Health(self.health));
        }
        self.flash.validate()?;
        non_negative("damage_cooldown", self.damage_cooldown)?;
        non_negative("gravity", self.gravity)?;
        non_negative("ground_drag", self.ground_drag)?;
        non_negative("air_drag", self.air_drag)?;
        positive("radius", self.radius)?;
        positive("height", self.height)?;
        Ok(())
    }
}

/// Where the animation events of one swing land, in seconds from its start
#[derive(Debug, Clone, PartialEq)]
pub struct AttackTiming {
    pub started_at: f32,
    pub completed_at: f32,
    pub duration: f32,
}

impl Default for AttackTiming {
    fn default() -> Self {
        Self {
            started_at: 0.05,
            completed_at: 0.3,
            duration: 0.45,
        }
    }
}

impl AttackTiming {
    /// Markers must land in order inside the clip
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.started_at <= self.completed_at && self.completed_at <= self.duration {
            Ok(())
        } else {
            Err(ConfigError::AttackTiming {
                started_at: self.started_at,
                completed_at: self.completed_at,
                duration: self.duration,
            })
        }
    }
}

/// Weapon tuning
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponConfig {
    pub damage: u32,
    pub knockback_force: f32,
    /// Hit volume half extents
    pub reach: Vec3,
    /// Hit volume centre relative to the player body (body faces -Z)
    pub offset: Vec3,
    pub timing: AttackTiming,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: 10,
            knockback_force: 5.0,
            reach: Vec3::new(0.4, 0.5, 0.6),
            offset: Vec3::new(0.0, 0.3, -1.0),
            timing: AttackTiming::default(),
        }
    }
}

impl WeaponConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("knockback_force", self.knockback_force)?;
        positive("reach.x", self.reach.x)?;
        positive("reach.y", self.reach.y)?;
        positive("reach.z", self.reach.z)?;
        non_negative("timing.started_at", self.timing.started_at)?;
        non_negative("timing.completed_at", self.timing.completed_at)?;
        positive("timing.duration", self.timing.duration)?;
        self.timing.validate()
    }
}

/// Everything needed to build a scene
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneConfig {
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub spawn: Vec3,
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()?;
        self.weapon.validate()
    }
}
