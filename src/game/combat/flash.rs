// Hit flash: material tint that eases back to the original color

use crate::core::math::lerp;
use crate::game::config::FlashConfig;

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Component-wise interpolation; `t` is not clamped
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// Multiply every channel, alpha included
    pub fn scale(self, factor: f32) -> Color {
        Color {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a * factor,
        }
    }
}

/// Scalar curve over normalized time `0..=1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingCurve {
    /// Flat value
    Constant(f32),
    /// Straight line from `start` to `end`
    Linear { start: f32, end: f32 },
    /// Smooth cubic with zero slope at both ends
    EaseInOut { start: f32, end: f32 },
}

impl EasingCurve {
    /// Sample the curve; `t` is clamped to `0..=1`
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            EasingCurve::Constant(value) => value,
            EasingCurve::Linear { start, end } => lerp(start, end, t),
            EasingCurve::EaseInOut { start, end } => {
                let eased = t * t * (3.0 - 2.0 * t);
                lerp(start, end, eased)
            }
        }
    }
}

/// Per-instance surface parameters touched by the flash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emission: Color,
}

/// Drives a material through one flash and restores it
///
/// The original colors are captured when the flash is created, not when it
/// starts, so a restart mid-flash still ends on the true original.
#[derive(Debug, Clone)]
pub struct DamageFlash {
    config: FlashConfig,
    original: Material,
    elapsed: Option<f32>,
}

impl DamageFlash {
    pub fn new(config: FlashConfig, original: Material) -> Self {
        Self {
            config,
            original,
            elapsed: None,
        }
    }

    /// Start (or restart) the flash and apply its first frame
    pub fn start(&mut self, material: &mut Material) {
        self.elapsed = Some(0.0);
        self.apply(material, 0.0);
    }

    /// Advance by one frame; restores the original exactly once time runs out
    pub fn tick(&mut self, material: &mut Material, dt: f32) {
        let Some(elapsed) = self.elapsed else {
            return;
        };

        let elapsed = elapsed + dt;
        if elapsed >= self.config.duration {
            *material = self.original;
            self.elapsed = None;
        } else {
            self.elapsed = Some(elapsed);
            self.apply(material, elapsed / self.config.duration);
        }
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    fn apply(&self, material: &mut Material, progress: f32) {
        let weight = self.config.curve.evaluate(progress);
        material.color = self.original.color.lerp(self.config.color, weight);
        material.emission = self.config.color.scale(weight);
    }
}
