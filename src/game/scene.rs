// Arena scene: owns the physics world, the player and the enemies

use glam::Vec3;
use log::{debug, info, trace};
use thiserror::Error;

use super::combat::animation::AnimationEvent;
use super::combat::{DamageOutcome, Damageable, Hit, MeleeAttack};
use super::config::{ConfigError, EnemyConfig, MovementMode, SceneConfig};
use super::locomotion::{EnemyLocomotion, PlayerController};
use crate::engine::input::FrameInput;
use crate::engine::physics::{presets, ColliderHandle, PhysicsHost, PhysicsWorld, RigidBodyHandle};

/// Unique identifier for an enemy
pub type EnemyId = u32;

/// Things that happened since the last drain, for logging, audio or effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// A swing began
    SwingStarted,
    /// The swing animation finished and the player can attack again
    SwingFinished,
    EnemyHit { id: EnemyId, health: i32 },
    /// A hit effect should play at `position`
    ParticleBurst { id: EnemyId, position: Vec3 },
    /// The enemy has been removed from the scene
    EnemyDied { id: EnemyId },
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no enemy with id {0}")]
    UnknownEnemy(EnemyId),

    #[error("rigid body {0:?} is missing from the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("collider {0:?} is missing from the physics world")]
    MissingCollider(ColliderHandle),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A live enemy
#[derive(Debug)]
pub struct Enemy {
    id: EnemyId,
    locomotion: EnemyLocomotion,
    damageable: Damageable,
}

impl Enemy {
    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn health(&self) -> i32 {
        self.damageable.health()
    }

    pub fn damageable(&self) -> &Damageable {
        &self.damageable
    }

    pub fn locomotion(&self) -> &EnemyLocomotion {
        &self.locomotion
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.locomotion.body()
    }
}

pub struct Scene {
    physics: PhysicsWorld,
    player: PlayerController,
    melee: MeleeAttack,
    enemies: Vec<Enemy>,
    next_id: EnemyId,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Build the physics world and the player with its weapon
    pub fn new(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let mut physics = PhysicsWorld::new();
        let player_config = &config.player;

        let body = match player_config.movement.mode {
            MovementMode::Force => presets::player_body(config.spawn),
            MovementMode::Kinematic => presets::kinematic_player_body(config.spawn),
        };
        let body = physics.add_rigid_body(body);
        let collider = physics.add_collider(
            presets::player_collider(player_config.radius, player_config.height),
            body,
        );
        let hit_volume = physics.add_collider(
            presets::weapon_sensor(config.weapon.reach, config.weapon.offset),
            body,
        );

        for handle in [collider, hit_volume] {
            if physics.get_collider(handle).is_none() {
                return Err(SceneError::MissingCollider(handle));
            }
        }

        info!(
            "Scene ready: player at {} ({:?} movement)",
            config.spawn, player_config.movement.mode
        );

        Ok(Self {
            physics,
            player: PlayerController::new(player_config, body, collider),
            melee: MeleeAttack::new(&config.weapon, hit_volume),
            enemies: Vec::new(),
            next_id: 0,
            events: Vec::new(),
        })
    }

    /// Add a static slab of terrain
    pub fn spawn_terrain(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let body = self.physics.add_rigid_body(presets::terrain_body(center));
        self.physics
            .add_collider(presets::terrain_collider(half_extents), body)
    }

    /// Spawn an enemy standing with its body centre at `position`
    pub fn spawn_enemy(&mut self, position: Vec3, config: &EnemyConfig) -> Result<EnemyId, SceneError> {
        config.validate()?;

        let body = self.physics.add_rigid_body(presets::enemy_body(position));
        let collider = self
            .physics
            .add_collider(presets::enemy_collider(config.radius, config.height), body);
        if self.physics.get_rigid_body(body).is_none() {
            return Err(SceneError::MissingBody(body));
        }

        let id = self.next_id;
        self.next_id += 1;

        self.enemies.push(Enemy {
            id,
            locomotion: EnemyLocomotion::new(config, body, collider),
            damageable: Damageable::new(config, Some(body)),
        });
        debug!("Spawned enemy {} at {} with {} health", id, position, config.health);

        Ok(id)
    }

    /// Per-frame update: locomotion, attack input and animation events
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        self.player.update(&mut self.physics, input, dt);

        if self.melee.handle_input(&mut self.physics, input.attack) {
            self.events.push(SceneEvent::SwingStarted);
        }
        for event in self.melee.update(&mut self.physics, dt) {
            if event == AnimationEvent::AnimationCompleted {
                self.events.push(SceneEvent::SwingFinished);
            }
        }

        for enemy in &mut self.enemies {
            enemy.locomotion.update(&mut self.physics);
            enemy.damageable.tick(dt);
        }
    }

    /// One physics step, then weapon overlaps
    pub fn fixed_update(&mut self) {
        self.physics.step();

        let hit_volume = self.melee.weapon().hit_volume();
        for event in self.physics.get_collision_events() {
            let Some(other) = event.sensor_entered(hit_volume) else {
                continue;
            };
            let Some(layer) = self.physics.collider_layer(other) else {
                continue;
            };
            let Some(hit) = self.melee.on_trigger_enter(layer, self.player.facing()) else {
                trace!("Weapon overlap with {:?} ignored", layer);
                continue;
            };
            if let Some(index) = self
                .enemies
                .iter()
                .position(|e| e.locomotion.collider() == other)
            {
                self.apply_hit(index, hit);
            }
        }
    }

    /// Damage an enemy directly
    pub fn damage_enemy(&mut self, id: EnemyId, hit: Hit) -> Result<DamageOutcome, SceneError> {
        let index = self
            .enemies
            .iter()
            .position(|e| e.id == id)
            .ok_or(SceneError::UnknownEnemy(id))?;
        Ok(self.apply_hit(index, hit))
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn apply_hit(&mut self, index: usize, hit: Hit) -> DamageOutcome {
        let enemy = &mut self.enemies[index];
        let id = enemy.id;
        let body = enemy.body();
        let outcome = enemy.damageable.take_damage(&mut self.physics, hit);

        let position = self.physics.position(body).unwrap_or(Vec3::ZERO);
        for _ in 0..enemy.damageable.particles_mut().take_pending() {
            self.events.push(SceneEvent::ParticleBurst { id, position });
        }

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Damaged { health } => {
                info!("Enemy {} hit for {}, {} health left", id, hit.amount, health);
                self.events.push(SceneEvent::EnemyHit { id, health });
            }
            DamageOutcome::Killed { health } => {
                info!("Enemy {} killed", id);
                self.events.push(SceneEvent::EnemyHit { id, health });
                self.enemies.remove(index);
                self.physics.remove_rigid_body(body);
                self.events.push(SceneEvent::EnemyDied { id });
            }
        }
        outcome
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn melee(&self) -> &MeleeAttack {
        &self.melee
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Position of a live enemy
    pub fn enemy_position(&self, id: EnemyId) -> Option<Vec3> {
        self.enemy(id).and_then(|e| self.physics.position(e.body()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FIXED_TIMESTEP;
    use crate::game::combat::attack::AttackPhase;

    fn arena() -> Scene {
        let config = SceneConfig {
            spawn: Vec3::new(0.0, 0.9, 0.0),
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(&config).expect("default scene");
        scene.spawn_terrain(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));
        scene
    }

    fn ten_damage() -> Hit {
        Hit {
            amount: 10,
            knockback_force: 0.0,
            knockback_direction: Vec3::ZERO,
        }
    }

    fn run_frames(scene: &mut Scene, input: FrameInput, frames: usize) {
        scene.update(&input, FIXED_TIMESTEP);
        scene.fixed_update();
        for _ in 1..frames {
            scene.update(&FrameInput::default(), FIXED_TIMESTEP);
            scene.fixed_update();
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SceneConfig::default();
        config.player.movement.max_speed = 0.0;
        assert!(matches!(Scene::new(&config), Err(SceneError::Config(_))));
    }

    #[test]
    fn test_invalid_enemy_rejected() {
        let mut scene = arena();
        let config = EnemyConfig {
            health: 0,
            ..EnemyConfig::default()
        };
        assert!(matches!(
            scene.spawn_enemy(Vec3::new(0.0, 1.0, -5.0), &config),
            Err(SceneError::Config(ConfigError::Health(0)))
        ));
        assert_eq!(scene.enemy_count(), 0);
    }

    #[test]
    fn test_unknown_enemy() {
        let mut scene = arena();
        assert!(matches!(
            scene.damage_enemy(7, ten_damage()),
            Err(SceneError::UnknownEnemy(7))
        ));
    }

    #[test]
    fn test_enemy_removed_after_third_hit() {
        let mut scene = arena();
        let id = scene
            .spawn_enemy(Vec3::new(0.0, 1.0, -5.0), &EnemyConfig::default())
            .expect("spawn");
        let bodies = scene.physics().body_count();

        for expected in [20, 10] {
            let outcome = scene.damage_enemy(id, ten_damage()).expect("enemy alive");
            assert_eq!(outcome, DamageOutcome::Damaged { health: expected });
            scene.update(&FrameInput::default(), 1.0);
            assert_eq!(scene.enemy_count(), 1);
        }

        let outcome = scene.damage_enemy(id, ten_damage()).expect("enemy alive");
        assert_eq!(outcome, DamageOutcome::Killed { health: 0 });
        assert_eq!(scene.enemy_count(), 0);
        assert_eq!(scene.physics().body_count(), bodies - 1);
        assert!(matches!(
            scene.damage_enemy(id, ten_damage()),
            Err(SceneError::UnknownEnemy(_))
        ));

        let deaths = scene
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SceneEvent::EnemyDied { .. }))
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_hit_during_immunity_raises_no_events() {
        let mut scene = arena();
        let id = scene
            .spawn_enemy(Vec3::new(0.0, 1.0, -5.0), &EnemyConfig::default())
            .expect("spawn");
        scene.damage_enemy(id, ten_damage()).expect("enemy alive");
        scene.drain_events();

        let outcome = scene.damage_enemy(id, ten_damage()).expect("enemy alive");
        assert_eq!(outcome, DamageOutcome::Ignored);
        assert!(scene.drain_events().is_empty());
        assert_eq!(scene.enemy(id).map(Enemy::health), Some(20));
    }

    #[test]
    fn test_enemies_flash_independently() {
        let mut scene = arena();
        let first = scene
            .spawn_enemy(Vec3::new(-3.0, 1.0, -5.0), &EnemyConfig::default())
            .expect("spawn");
        let second = scene
            .spawn_enemy(Vec3::new(3.0, 1.0, -5.0), &EnemyConfig::default())
            .expect("spawn");

        scene.damage_enemy(first, ten_damage()).expect("enemy alive");
        let flashing = |id| scene.enemy(id).map(|e| e.damageable().is_flashing());
        assert_eq!(flashing(first), Some(true));
        assert_eq!(flashing(second), Some(false));
    }

    #[test]
    fn test_swing_hits_enemy_in_front_once() {
        let mut scene = arena();
        let id = scene
            .spawn_enemy(Vec3::new(0.0, 1.0, -1.2), &EnemyConfig::default())
            .expect("spawn");

        let attack = FrameInput {
            attack: true,
            ..FrameInput::default()
        };
        run_frames(&mut scene, attack, 60);

        assert_eq!(scene.enemy(id).map(Enemy::health), Some(20));
        assert_eq!(scene.melee().phase(), AttackPhase::Idle);
        assert!(!scene
            .physics()
            .is_collider_enabled(scene.melee().weapon().hit_volume()));

        let events = scene.drain_events();
        assert_eq!(events.first(), Some(&SceneEvent::SwingStarted));
        assert!(events.contains(&SceneEvent::SwingFinished));
        let hits = events
            .iter()
            .filter(|e| matches!(e, SceneEvent::EnemyHit { .. }))
            .count();
        assert_eq!(hits, 1);

        // Knocked back along the player's facing
        let z = scene.enemy_position(id).map_or(0.0, |p| p.z);
        assert!(z < -1.2, "enemy at z = {z}");
    }

    #[test]
    fn test_no_swing_no_damage() {
        let mut scene = arena();
        let id = scene
            .spawn_enemy(Vec3::new(0.0, 1.0, -1.2), &EnemyConfig::default())
            .expect("spawn");
        run_frames(&mut scene, FrameInput::default(), 30);
        assert_eq!(scene.enemy(id).map(Enemy::health), Some(30));
    }

    #[test]
    fn test_kinematic_player_lands_on_surface_after_jump() {
        let mut config = SceneConfig {
            spawn: Vec3::new(0.0, 0.9, 0.0),
            ..SceneConfig::default()
        };
        config.player.movement.mode = MovementMode::Kinematic;
        let mut scene = Scene::new(&config).expect("kinematic scene");
        scene.spawn_terrain(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));

        run_frames(&mut scene, FrameInput::default(), 5);
        assert!(scene.player().is_grounded());

        let jump = FrameInput {
            jump: true,
            ..FrameInput::default()
        };
        run_frames(&mut scene, jump, 240);

        let feet = scene
            .physics()
            .collider_bounds(scene.player().collider())
            .map_or(f32::NAN, |b| b.min.y);
        assert!(feet.abs() < 1e-3, "feet at {feet} after landing");
        assert!(scene.player().is_grounded());
    }

    #[test]
    fn test_player_lands_on_terrain() {
        let mut scene = arena();
        run_frames(&mut scene, FrameInput::default(), 10);
        assert!(scene.player().is_grounded());
    }
}
