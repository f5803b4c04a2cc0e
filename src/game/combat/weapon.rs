// Melee weapon: a sensor volume switched on for the hit window

use glam::Vec3;
use log::debug;

use super::damage::Hit;
use crate::core::math::horizontal;
use crate::engine::physics::{ColliderHandle, CollisionLayer, PhysicsHost};
use crate::game::config::WeaponConfig;

#[derive(Debug)]
pub struct Weapon {
    damage: u32,
    knockback_force: f32,
    hit_volume: ColliderHandle,
    active: bool,
    deactivations: u32,
}

impl Weapon {
    pub fn new(config: &WeaponConfig, hit_volume: ColliderHandle) -> Self {
        Self {
            damage: config.damage,
            knockback_force: config.knockback_force,
            hit_volume,
            active: false,
            deactivations: 0,
        }
    }

    /// Open the hit window
    pub fn attack<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P) {
        if self.active {
            return;
        }
        physics.set_collider_enabled(self.hit_volume, true);
        self.active = true;
        debug!("Weapon hit volume enabled");
    }

    /// Close the hit window; a second call in the same cycle does nothing
    pub fn end_attack<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P) {
        if !self.active {
            return;
        }
        physics.set_collider_enabled(self.hit_volume, false);
        self.active = false;
        self.deactivations += 1;
        debug!("Weapon hit volume disabled");
    }

    /// Turn an overlap into a hit
    ///
    /// Only Enemy-layer targets are hit, and only while the window is open.
    /// Knockback pushes along the wielder's facing, flattened onto the ground.
    pub fn on_trigger_enter(&self, target: CollisionLayer, facing: Vec3) -> Option<Hit> {
        if !self.active || target != CollisionLayer::Enemy {
            return None;
        }
        Some(Hit {
            amount: self.damage,
            knockback_force: self.knockback_force,
            knockback_direction: horizontal(facing).normalize_or_zero(),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn hit_volume(&self) -> ColliderHandle {
        self.hit_volume
    }

    /// Times the hit volume has been switched off
    pub fn deactivations(&self) -> u32 {
        self.deactivations
    }
}
