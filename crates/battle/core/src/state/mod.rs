//! Authoritative battle state representation.
//!
//! [`BattleState`] is a plain value: both rosters, the planning queue, the
//! team mana pool, Djinn recovery timers and the event log. The engine never
//! mutates a caller's state in place; every command clones, mutates the copy
//! and hands it back once it validates.
mod index;
pub mod types;

use std::collections::BTreeMap;

use crate::stats::Stats;

pub use index::{Side, UnitIndex, UnitRef};
pub use types::{
    AbilityId, ActionQueue, BattleCounters, BattleEvent, BattlePhase, BattleProgress,
    BattleStatus, BlockReason, Compatibility, DjinnId, DjinnState, DjinnTracker, Element,
    EncounterId, EquipmentId, EquippedDjinn, ImmunityScope, Loadout, ManaPool, Mitigation,
    QueuedAction, StatusEffect, StatusEffects, StatusKind, Team, TeamError, Unit, UnitId,
};

/// Canonical snapshot of a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub encounter: EncounterId,

    /// Seed every per-round random stream is derived from.
    ///
    /// Set once at battle start and never modified.
    pub seed: u32,

    pub party: Team,
    pub enemies: Vec<Unit>,

    /// Derived id index. Rebuilt by [`BattleState::rebuild_index`].
    index: UnitIndex,

    /// Execution order of the most recent round.
    pub turn_order: Vec<UnitId>,
    pub queue: ActionQueue,
    pub progress: BattleProgress,
    pub mana: ManaPool,

    /// Rounds left before each Standby Djinn returns to Set.
    pub djinn_recovery: BTreeMap<DjinnId, u32>,

    pub log: Vec<BattleEvent>,
}

impl BattleState {
    /// Creates a planning-phase state for round 1 with a full mana pool.
    pub fn new(encounter: EncounterId, seed: u32, party: Team, enemies: Vec<Unit>) -> Self {
        let index = UnitIndex::build(&party, &enemies);
        let queue = ActionQueue::with_slots(party.units.len());
        let mana = ManaPool::full(party.mana_capacity());
        Self {
            encounter,
            seed,
            party,
            enemies,
            index,
            turn_order: Vec::new(),
            queue,
            progress: BattleProgress::default(),
            mana,
            djinn_recovery: BTreeMap::new(),
            log: Vec::new(),
        }
    }

    pub fn index(&self) -> &UnitIndex {
        &self.index
    }

    /// Recomputes the id index from the current rosters.
    pub fn rebuild_index(&mut self) {
        self.index = UnitIndex::build(&self.party, &self.enemies);
    }

    pub fn locate(&self, id: &UnitId) -> Option<UnitRef> {
        self.index.get(id)
    }

    pub fn side_of(&self, id: &UnitId) -> Option<Side> {
        self.locate(id).map(|r| r.side)
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        let UnitRef { side, slot } = self.locate(id)?;
        self.roster(side).get(slot)
    }

    pub fn unit_mut(&mut self, id: &UnitId) -> Option<&mut Unit> {
        let UnitRef { side, slot } = self.locate(id)?;
        match side {
            Side::Party => self.party.units.get_mut(slot),
            Side::Enemy => self.enemies.get_mut(slot),
        }
    }

    pub fn roster(&self, side: Side) -> &[Unit] {
        match side {
            Side::Party => &self.party.units,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.roster(side).iter().filter(|u| u.is_alive())
    }

    pub fn living_ids(&self, side: Side) -> Vec<UnitId> {
        self.living(side).map(|u| u.id.clone()).collect()
    }

    pub fn is_wiped(&self, side: Side) -> bool {
        self.roster(side).iter().all(Unit::is_ko)
    }

    /// Djinn context for stat computation: the party team for party units,
    /// nothing for enemies.
    pub fn stat_context(&self, side: Side) -> Option<&Team> {
        match side {
            Side::Party => Some(&self.party),
            Side::Enemy => None,
        }
    }

    /// Effective stats of a unit in its own context.
    pub fn effective_stats(&self, id: &UnitId) -> Option<Stats> {
        let side = self.side_of(id)?;
        let unit = self.unit(id)?;
        Some(crate::stats::effective_stats(unit, self.stat_context(side)))
    }

    pub fn phase(&self) -> BattlePhase {
        self.progress.phase
    }

    pub fn round(&self) -> u32 {
        self.progress.round
    }

    pub fn is_over(&self) -> bool {
        self.progress.phase.is_terminal()
    }

    /// Roster slot of a party unit, which is also its queue slot.
    pub fn party_slot(&self, id: &UnitId) -> Option<usize> {
        match self.locate(id)? {
            UnitRef {
                side: Side::Party,
                slot,
            } => Some(slot),
            _ => None,
        }
    }

    pub fn push_event(&mut self, event: BattleEvent) {
        self.log.push(event);
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two runs with the same seed and commands produce the same digest.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
