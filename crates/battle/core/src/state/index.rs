//! Id-to-unit lookup index.
//!
//! The index is a projection of the two rosters, never a source of truth.
//! It is rebuilt wholesale whenever a roster changes.

use std::collections::BTreeMap;

use crate::state::{Team, Unit, UnitId};

/// Which roster a unit belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Party,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Party => Side::Enemy,
            Side::Enemy => Side::Party,
        }
    }
}

/// Location of a unit within the rosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRef {
    pub side: Side,
    pub slot: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitIndex {
    entries: BTreeMap<UnitId, UnitRef>,
}

impl UnitIndex {
    pub fn build(party: &Team, enemies: &[Unit]) -> Self {
        let party_refs = party.units.iter().enumerate().map(|(slot, unit)| {
            (
                unit.id.clone(),
                UnitRef {
                    side: Side::Party,
                    slot,
                },
            )
        });
        let enemy_refs = enemies.iter().enumerate().map(|(slot, unit)| {
            (
                unit.id.clone(),
                UnitRef {
                    side: Side::Enemy,
                    slot,
                },
            )
        });
        Self {
            entries: party_refs.chain(enemy_refs).collect(),
        }
    }

    pub fn get(&self, id: &UnitId) -> Option<UnitRef> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &UnitRef)> {
        self.entries.iter()
    }
}
