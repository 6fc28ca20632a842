use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::{AbilityId, DjinnId, UnitId};

/// An action chosen during planning and consumed during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub actor: UnitId,
    /// `None` is a basic attack.
    pub ability: Option<AbilityId>,
    pub targets: Vec<UnitId>,
    pub mana_cost: u8,
}

impl QueuedAction {
    pub fn basic_attack(actor: UnitId, target: UnitId) -> Self {
        Self {
            actor,
            ability: None,
            targets: vec![target],
            mana_cost: 0,
        }
    }

    pub fn ability(actor: UnitId, ability: AbilityId, targets: Vec<UnitId>, mana_cost: u8) -> Self {
        Self {
            actor,
            ability: Some(ability),
            targets,
            mana_cost,
        }
    }

    pub fn is_basic_attack(&self) -> bool {
        self.ability.is_none()
    }
}

/// Planning queue: one slot per party unit (by roster index) plus Djinn picks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionQueue {
    /// Roster index of the unit the planner is currently choosing for.
    pub current_index: usize,
    pub actions: Vec<Option<QueuedAction>>,
    pub djinn: ArrayVec<DjinnId, { BattleConfig::MAX_EQUIPPED_DJINN }>,
    /// Position within the execution order during the executing phase.
    pub execution_index: usize,
}

impl ActionQueue {
    pub fn with_slots(party_size: usize) -> Self {
        Self {
            current_index: 0,
            actions: vec![None; party_size],
            djinn: ArrayVec::new(),
            execution_index: 0,
        }
    }

    /// Empties every slot, keeping the slot count.
    pub fn clear(&mut self) {
        let slots = self.actions.len();
        *self = Self::with_slots(slots);
    }

    pub fn total_cost(&self) -> u32 {
        self.queued().map(|a| u32::from(a.mana_cost)).sum()
    }

    pub fn queued(&self) -> impl Iterator<Item = &QueuedAction> {
        self.actions.iter().flatten()
    }

    pub fn slot(&self, index: usize) -> Option<&QueuedAction> {
        self.actions.get(index).and_then(Option::as_ref)
    }
}
