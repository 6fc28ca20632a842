use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{DjinnId, Element, Unit, UnitId};

/// Lifecycle state of an equipped Djinn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DjinnState {
    /// Grants passive stat and ability bonuses.
    #[default]
    Set,
    /// Activated; recovering until its timer reaches zero.
    Standby,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DjinnTracker {
    pub state: DjinnState,
    pub last_activated_round: Option<u32>,
}

/// A Djinn in one of the three equip slots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedDjinn {
    pub id: DjinnId,
    pub element: Element,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamError {
    #[error("party is full ({max} units)")]
    PartyFull { max: usize },

    #[error("unit '{0}' is already in the party")]
    DuplicateUnit(UnitId),

    #[error("djinn '{0}' is already equipped")]
    DuplicateDjinn(DjinnId),

    #[error("all {max} djinn slots are in use")]
    DjinnSlotsFull { max: usize },
}

impl GameError for TeamError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PartyFull { .. } => "TEAM_PARTY_FULL",
            Self::DuplicateUnit(_) => "TEAM_DUPLICATE_UNIT",
            Self::DuplicateDjinn(_) => "TEAM_DUPLICATE_DJINN",
            Self::DjinnSlotsFull { .. } => "TEAM_DJINN_SLOTS_FULL",
        }
    }
}

/// Party aggregate: units plus the team-wide Djinn resource.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub units: ArrayVec<Unit, { BattleConfig::MAX_PARTY }>,
    /// Every Djinn the party owns, equipped or not.
    pub collected_djinn: Vec<DjinnId>,
    pub equipped_djinn: ArrayVec<EquippedDjinn, { BattleConfig::MAX_EQUIPPED_DJINN }>,
    pub trackers: BTreeMap<DjinnId, DjinnTracker>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: Unit) -> Result<(), TeamError> {
        if self.units.iter().any(|u| u.id == unit.id) {
            return Err(TeamError::DuplicateUnit(unit.id));
        }
        self.units.try_push(unit).map_err(|_| TeamError::PartyFull {
            max: BattleConfig::MAX_PARTY,
        })
    }

    /// Equips a Djinn in the next free slot, adding it to the collection if needed.
    pub fn equip_djinn(&mut self, id: DjinnId, element: Element) -> Result<(), TeamError> {
        if self.equipped_djinn.iter().any(|d| d.id == id) {
            return Err(TeamError::DuplicateDjinn(id));
        }
        if self.equipped_djinn.is_full() {
            return Err(TeamError::DjinnSlotsFull {
                max: BattleConfig::MAX_EQUIPPED_DJINN,
            });
        }
        if !self.collected_djinn.contains(&id) {
            self.collected_djinn.push(id.clone());
        }
        self.trackers.entry(id.clone()).or_default();
        self.equipped_djinn.push(EquippedDjinn { id, element });
        Ok(())
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| &u.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    pub fn is_wiped(&self) -> bool {
        self.units.iter().all(Unit::is_ko)
    }

    pub fn djinn_state(&self, id: &DjinnId) -> Option<DjinnState> {
        self.trackers.get(id).map(|t| t.state)
    }

    pub fn is_equipped(&self, id: &DjinnId) -> bool {
        self.equipped_djinn.iter().any(|d| &d.id == id)
    }

    /// Equipped Djinn currently in the given state.
    pub fn djinn_in(&self, state: DjinnState) -> impl Iterator<Item = &EquippedDjinn> {
        self.equipped_djinn
            .iter()
            .filter(move |d| self.djinn_state(&d.id) == Some(state))
    }

    /// Elements of Set-state Djinn, in slot order.
    pub fn set_elements(&self) -> Vec<Element> {
        self.djinn_in(DjinnState::Set).map(|d| d.element).collect()
    }

    /// Summed mana contribution of the roster.
    pub fn mana_capacity(&self) -> u32 {
        self.units.iter().map(|u| u32::from(u.mana_contribution)).sum()
    }
}
