mod element;
mod event;
mod ids;
mod progress;
mod queue;
mod status;
mod team;
mod unit;

pub use element::{Compatibility, Element};
pub use event::{BattleEvent, BlockReason, Mitigation};
pub use ids::{AbilityId, DjinnId, EncounterId, EquipmentId, UnitId};
pub use progress::{BattlePhase, BattleProgress, BattleStatus, ManaPool};
pub use queue::{ActionQueue, QueuedAction};
pub use status::{ImmunityScope, StatusEffect, StatusEffects, StatusKind};
pub use team::{DjinnState, DjinnTracker, EquippedDjinn, Team, TeamError};
pub use unit::{BattleCounters, Loadout, Unit};
