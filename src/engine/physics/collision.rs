use rapier3d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision layers used for filtering and for tagging colliders
///
/// Every collider we create carries its layer in `user_data`, so a raycast or
/// overlap hit can be classified without a side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Walkable ground; the only layer a ground probe accepts
    Terrain = 0b0000_0010,

    /// The first-person player body
    Player = 0b0000_0100,

    /// Damageable enemies
    Enemy = 0b0000_1000,

    /// Weapon hit volumes (sensors)
    Weapon = 0b0001_0000,
}

impl CollisionLayer {
    /// All layers, in bit order
    pub const ALL: [CollisionLayer; 5] = [
        CollisionLayer::Default,
        CollisionLayer::Terrain,
        CollisionLayer::Player,
        CollisionLayer::Enemy,
        CollisionLayer::Weapon,
    ];

    /// Layer bit as a rapier group
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Convert to rapier3d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let filter = match self {
            // Terrain blocks bodies but never reports weapon overlaps
            CollisionLayer::Terrain => {
                CollisionLayer::Default.group()
                    | CollisionLayer::Player.group()
                    | CollisionLayer::Enemy.group()
            }

            CollisionLayer::Player => {
                CollisionLayer::Default.group()
                    | CollisionLayer::Terrain.group()
                    | CollisionLayer::Enemy.group()
            }

            CollisionLayer::Enemy => {
                CollisionLayer::Default.group()
                    | CollisionLayer::Terrain.group()
                    | CollisionLayer::Player.group()
                    | CollisionLayer::Enemy.group()
                    | CollisionLayer::Weapon.group()
            }

            // Hit volumes only care about things they can damage
            CollisionLayer::Weapon => CollisionLayer::Enemy.group(),

            CollisionLayer::Default => Group::ALL,
        };

        InteractionGroups::new(self.group(), filter)
    }

    /// Encode the layer for a collider's `user_data`
    pub fn to_user_data(self) -> u128 {
        self as u128
    }

    /// Decode a layer from a collider's `user_data`
    ///
    /// Colliders without a recognised tag are treated as `Default`.
    pub fn from_user_data(data: u128) -> Self {
        Self::ALL
            .into_iter()
            .find(|layer| layer.to_user_data() == data)
            .unwrap_or(CollisionLayer::Default)
    }

    /// Layer of an existing collider
    pub fn of(collider: &Collider) -> Self {
        Self::from_user_data(collider.user_data)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or a sensor started overlapping)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
}

impl CollisionEvent {
    /// If this is a sensor overlap starting on `sensor_handle`, return the other collider
    pub fn sensor_entered(&self, sensor_handle: ColliderHandle) -> Option<ColliderHandle> {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
                sensor: true,
            } => {
                if collider1 == sensor_handle {
                    Some(collider2)
                } else if collider2 == sensor_handle {
                    Some(collider1)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier3d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier3d::prelude::CollisionEvent::Started(h1, h2, flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
            rapier3d::prelude::CollisionEvent::Stopped(h1, h2, flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
