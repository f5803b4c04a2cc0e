// Melee attack: input edge -> swing clip -> sequencer -> weapon volume

use glam::Vec3;

use super::animation::{AnimationClip, AnimationEvent, AnimationPlayer, ATTACK_CLIP};
use super::attack::{AttackPhase, AttackSequencer};
use super::damage::Hit;
use super::weapon::Weapon;
use crate::engine::physics::{ColliderHandle, CollisionLayer, PhysicsHost};
use crate::game::config::WeaponConfig;

/// Keeps the weapon's hit volume in step with the swing
///
/// After every input or animation event the volume is enabled exactly when
/// the sequencer is in `AttackPhase::Attacking`.
#[derive(Debug)]
pub struct MeleeAttack {
    sequencer: AttackSequencer,
    animator: AnimationPlayer,
    weapon: Weapon,
}

impl MeleeAttack {
    pub fn new(config: &WeaponConfig, hit_volume: ColliderHandle) -> Self {
        let mut animator = AnimationPlayer::new();
        animator.add_clip(AnimationClip::attack(&config.timing));
        Self {
            sequencer: AttackSequencer::new(),
            animator,
            weapon: Weapon::new(config, hit_volume),
        }
    }

    /// React to the attack input edge; returns true if a swing began
    pub fn handle_input<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P, attack_pressed: bool) -> bool {
        if !attack_pressed || !self.sequencer.attack() {
            return false;
        }
        self.animator.play_from_start(ATTACK_CLIP);
        self.sync_weapon(physics);
        true
    }

    /// Advance the swing clip and apply its events
    pub fn update<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P, dt: f32) -> Vec<AnimationEvent> {
        let events = self.animator.update(dt);
        for event in &events {
            match event {
                AnimationEvent::AttackStarted => self.sequencer.attack_started(),
                AnimationEvent::AttackCompleted => self.sequencer.attack_completed(),
                AnimationEvent::AnimationCompleted => self.sequencer.animation_completed(),
            }
            self.sync_weapon(physics);
        }
        events
    }

    /// Overlap reported by the hit volume
    pub fn on_trigger_enter(&self, target: CollisionLayer, facing: Vec3) -> Option<Hit> {
        self.weapon.on_trigger_enter(target, facing)
    }

    pub fn phase(&self) -> AttackPhase {
        self.sequencer.phase()
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    fn sync_weapon<P: PhysicsHost + ?Sized>(&mut self, physics: &mut P) {
        if self.sequencer.phase().hit_window_open() {
            self.weapon.attack(physics);
        } else {
            self.weapon.end_attack(physics);
        }
    }
}
