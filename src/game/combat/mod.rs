// Melee combat: attack sequencing, weapon hit volume, damage and hit reaction

pub mod animation;
pub mod attack;
pub mod damage;
pub mod flash;
pub mod melee;
pub mod weapon;

pub use damage::{DamageOutcome, Damageable, Hit};
pub use melee::MeleeAttack;
