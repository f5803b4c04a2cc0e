// Damage application: health, immunity window, knockback, hit feedback

use glam::Vec3;
use log::trace;

use super::flash::{DamageFlash, Material};
use crate::engine::physics::{PhysicsHost, RigidBodyHandle};
use crate::game::config::EnemyConfig;

/// One landed hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub amount: u32,
    pub knockback_force: f32,
    /// Push direction; normalized by the receiver, zero means no push
    pub knockback_direction: Vec3,
}

/// Result of a damage attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was immune or already dead; nothing changed
    Ignored,
    /// Damage applied, target survives
    Damaged { health: i32 },
    /// Damage applied and health fell below 1
    Killed { health: i32 },
}

/// Pending hit-particle bursts for the host to play
#[derive(Debug, Default)]
pub struct ParticleEmitter {
    pending: u32,
}

impl ParticleEmitter {
    pub fn play(&mut self) {
        self.pending += 1;
    }

    /// Take the bursts requested since the last call
    pub fn take_pending(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

/// Health plus hit reaction for one entity
#[derive(Debug)]
pub struct Damageable {
    health: i32,
    damage_cooldown: f32,
    immunity_remaining: f32,
    dead: bool,
    body: Option<RigidBodyHandle>,
    material: Material,
    flash: DamageFlash,
    particles: ParticleEmitter,
}

impl Damageable {
    /// Build from enemy tuning; the material is a fresh per-instance copy
    pub fn new(config: &EnemyConfig, body: Option<RigidBodyHandle>) -> Self {
        let material = Material {
            color: config.color,
            emission: config.emission,
        };
        Self {
            health: config.health,
            damage_cooldown: config.damage_cooldown,
            immunity_remaining: 0.0,
            dead: false,
            body,
            material,
            flash: DamageFlash::new(config.flash.clone(), material),
            particles: ParticleEmitter::default(),
        }
    }

    /// Apply a hit unless the immunity window is open
    ///
    /// An ignored hit has no side effects at all: no health change, no
    /// knockback, no flash restart and no particles.
    pub fn take_damage<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P, hit: Hit) -> DamageOutcome {
        if self.dead || self.is_immune() {
            trace!("Ignoring {} damage (immune or dead)", hit.amount);
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(hit.amount.min(i32::MAX as u32) as i32);

        if hit.knockback_force > 0.0 {
            if let Some(body) = self.body {
                let direction = hit.knockback_direction.normalize_or_zero();
                physics.apply_impulse(body, direction * hit.knockback_force);
            }
        }

        self.flash.start(&mut self.material);
        self.immunity_remaining = self.damage_cooldown;
        self.particles.play();

        if self.health < 1 {
            self.dead = true;
            DamageOutcome::Killed {
                health: self.health,
            }
        } else {
            DamageOutcome::Damaged {
                health: self.health,
            }
        }
    }

    /// Advance the flash and immunity countdowns by one frame
    pub fn tick(&mut self, dt: f32) {
        self.flash.tick(&mut self.material, dt);
        if self.immunity_remaining > 0.0 {
            self.immunity_remaining = (self.immunity_remaining - dt).max(0.0);
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_immune(&self) -> bool {
        self.immunity_remaining > 0.0
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_active()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn particles_mut(&mut self) -> &mut ParticleEmitter {
        &mut self.particles
    }
}
