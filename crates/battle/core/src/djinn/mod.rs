//! Djinn synergy and activation.
//!
//! Equipped Djinn live on the [`Team`](crate::state::Team). While Set they
//! feed the Djinn stat layer and grant same- and neutral-tier abilities.
//! Activation moves them to Standby, fires a summon and starts a recovery
//! timer; Standby Djinn grant counter-tier abilities to opposed units until
//! the timer runs out.

mod grants;
mod lifecycle;
mod synergy;

pub use grants::{granted_abilities, known_abilities};
pub use lifecycle::{activate, recover};
pub use synergy::{SynergyPattern, compatibility_bonus, djinn_layer};
