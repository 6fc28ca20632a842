//! Combat math.
//!
//! Pure formulas, the two functions that touch a unit's HP
//! ([`apply_damage`] and [`apply_heal`]), and the [`strike`] wrappers that
//! record their outcomes as events. Everything here is deterministic;
//! randomness (on-hit chances, summon targets) is drawn by the caller.
//!
//! # Damage Pipeline
//!
//! ```text
//! raw formula (physical | psynergy × element × armor)
//!      ↓
//! × (1 − elemental resistance statuses)     psynergy only
//!      ↓
//! × (1 − damage reduction)
//!      ↓
//! floor, at least 1
//!      ↓
//! invulnerable → shield → HP → auto-revive
//! ```

pub mod damage;
pub mod element;
pub mod heal;
pub mod strike;

pub use damage::{
    DamageKind, DamageOutcome, apply_damage, mitigate, physical_damage, psynergy_damage,
    try_auto_revive,
};
pub use element::element_modifier;
pub use heal::{apply_heal, healing_amount, revive};
pub use strike::{mend, strike};
