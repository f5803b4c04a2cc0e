// Attack sequencing driven by animation events

use log::debug;

/// Where a swing is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Hit window open
    Attacking,
    /// Hit window closed, animation still playing
    Recovering,
}

impl AttackPhase {
    /// Whether the weapon's hit volume should be enabled
    pub fn hit_window_open(self) -> bool {
        self == AttackPhase::Attacking
    }
}

/// State machine for one weapon's swings
///
/// Only animation events move the phase forward. Timers are never used, so
/// a slowed or sped-up animation stretches the phases with it.
#[derive(Debug, Default)]
pub struct AttackSequencer {
    phase: AttackPhase,
    swings: u32,
}

impl AttackSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a swing; returns false (and does nothing) unless idle
    pub fn attack(&mut self) -> bool {
        if self.phase != AttackPhase::Idle {
            return false;
        }
        self.phase = AttackPhase::Attacking;
        self.swings += 1;
        debug!("Swing {} started", self.swings);
        true
    }

    /// The clip reached its hit frame; the window stays open
    pub fn attack_started(&mut self) {
        if self.phase != AttackPhase::Attacking {
            debug!("attack_started outside a swing ({:?})", self.phase);
        }
    }

    /// The hit window closes
    pub fn attack_completed(&mut self) {
        if self.phase == AttackPhase::Attacking {
            self.phase = AttackPhase::Recovering;
        }
    }

    /// The clip finished; the only way back to idle
    pub fn animation_completed(&mut self) {
        self.phase = AttackPhase::Idle;
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_attacking(&self) -> bool {
        self.phase != AttackPhase::Idle
    }

    /// Swings started since creation
    pub fn swings(&self) -> u32 {
        self.swings
    }
}
