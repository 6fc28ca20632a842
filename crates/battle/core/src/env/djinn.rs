use crate::djinn::SynergyPattern;
use crate::state::{AbilityId, Compatibility, DjinnId, Element, StatusEffect};

pub trait DjinnOracle: Send + Sync {
    fn definition(&self, id: &DjinnId) -> Option<&DjinnDefinition>;

    /// Ability granted to the whole party by a three-Djinn synergy pattern.
    fn synergy_ability(&self, _pattern: &SynergyPattern) -> Option<AbilityId> {
        None
    }
}

/// One-time effect fired when the Djinn is activated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SummonEffect {
    /// Replaces the count-based summon damage when this Djinn leads the activation.
    pub damage: Option<u32>,
    /// Applied to every enemy struck by the summon.
    pub status: Option<StatusEffect>,
}

/// Abilities a Djinn grants per compatibility tier.
///
/// `same` and `neutral` apply while the Djinn is Set; `counter` applies only
/// while it is in Standby, and only to units whose element opposes it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrantTable {
    pub same: Vec<AbilityId>,
    pub neutral: Vec<AbilityId>,
    pub counter: Vec<AbilityId>,
}

impl GrantTable {
    pub fn for_tier(&self, tier: Compatibility) -> &[AbilityId] {
        match tier {
            Compatibility::Same => &self.same,
            Compatibility::Neutral => &self.neutral,
            Compatibility::Counter => &self.counter,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DjinnDefinition {
    pub id: DjinnId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summon: SummonEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grants: GrantTable,
}

impl DjinnDefinition {
    pub fn new(id: impl Into<DjinnId>, element: Element) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            element,
            summon: SummonEffect::default(),
            grants: GrantTable::default(),
        }
    }

    pub fn with_summon_damage(mut self, damage: u32) -> Self {
        self.summon.damage = Some(damage);
        self
    }

    pub fn with_grants(mut self, grants: GrantTable) -> Self {
        self.grants = grants;
        self
    }
}
