//! Traits describing read-only battle data.
//!
//! Oracles expose ability, Djinn and equipment definitions. The [`BattleEnv`]
//! aggregate bundles them so the engine can resolve definitions without
//! coupling to a concrete content store.
mod abilities;
mod djinn;
mod equipment;
mod error;
mod rng;
mod units;

pub use abilities::{
    AbilityDefinition, AbilityKind, AbilityOracle, AiHints, HealOverTimeGrant, ImmunityGrant,
    OnHitStatus, ReductionGrant, ResistanceGrant, StatusRemoval, TargetHint, TargetMode,
    TargetSide,
};
pub use djinn::{DjinnDefinition, DjinnOracle, GrantTable, SummonEffect};
pub use equipment::{
    ElementalResist, EquipmentDefinition, EquipmentFlags, EquipmentOracle, EquipmentSlot,
};
pub use error::OracleError;
pub use rng::{RngSnapshot, SeededRng, Stream};
pub use units::UnitTemplate;

use crate::state::{AbilityId, DjinnId, EquipmentId};

/// Aggregates the read-only oracles a battle needs.
///
/// Abilities and Djinn are required; equipment is only consulted when units
/// are spawned from templates, so it may be absent.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    abilities: &'a dyn AbilityOracle,
    djinn: &'a dyn DjinnOracle,
    equipment: Option<&'a dyn EquipmentOracle>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(abilities: &'a dyn AbilityOracle, djinn: &'a dyn DjinnOracle) -> Self {
        Self {
            abilities,
            djinn,
            equipment: None,
        }
    }

    pub fn with_equipment(mut self, equipment: &'a dyn EquipmentOracle) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn abilities(&self) -> &'a dyn AbilityOracle {
        self.abilities
    }

    pub fn djinn(&self) -> &'a dyn DjinnOracle {
        self.djinn
    }

    /// Returns the EquipmentOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EquipmentNotAvailable` if no equipment oracle was provided.
    pub fn equipment(&self) -> Result<&'a dyn EquipmentOracle, OracleError> {
        self.equipment.ok_or(OracleError::EquipmentNotAvailable)
    }

    pub fn ability(&self, id: &AbilityId) -> Result<&'a AbilityDefinition, OracleError> {
        self.abilities
            .definition(id)
            .ok_or_else(|| OracleError::AbilityNotFound(id.clone()))
    }

    pub fn djinn_definition(&self, id: &DjinnId) -> Result<&'a DjinnDefinition, OracleError> {
        self.djinn
            .definition(id)
            .ok_or_else(|| OracleError::DjinnNotFound(id.clone()))
    }

    pub fn equipment_definition(
        &self,
        id: &EquipmentId,
    ) -> Result<&'a EquipmentDefinition, OracleError> {
        self.equipment()?
            .definition(id)
            .ok_or_else(|| OracleError::EquipmentNotFound(id.clone()))
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("equipment", &self.equipment.is_some())
            .finish_non_exhaustive()
    }
}
