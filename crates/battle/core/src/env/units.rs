//! Unit template definitions.
//!
//! `UnitTemplate` describes a party member or enemy in a data-driven way.
//! Templates are serialized from RON catalogs and spawned into [`Unit`]
//! instances at a chosen level.

use crate::env::{BattleEnv, OracleError};
use crate::state::{AbilityId, Element, EquipmentId, Unit, UnitId};
use crate::stats::{GrowthRates, Stats, refill_hp};

/// Everything a [`Unit`] carries except its identity and battle-time state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub element: Element,
    pub base: Stats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub growth: GrowthRates,

    /// Ability pool. Each ability is unlocked once the unit reaches its
    /// `unlock_level`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,

    /// Equipment resolved through the `EquipmentOracle` at spawn time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<EquipmentId>,

    #[cfg_attr(feature = "serde", serde(default = "default_mana_contribution"))]
    pub mana_contribution: u8,
}

#[cfg(feature = "serde")]
fn default_mana_contribution() -> u8 {
    1
}

impl UnitTemplate {
    pub fn new(element: Element, base: Stats) -> Self {
        Self {
            name: String::new(),
            element,
            base,
            growth: GrowthRates::default(),
            abilities: Vec::new(),
            equipment: Vec::new(),
            mana_contribution: 1,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_growth(mut self, growth: GrowthRates) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }

    pub fn with_equipment(mut self, equipment: impl IntoIterator<Item = EquipmentId>) -> Self {
        self.equipment = equipment.into_iter().collect();
        self
    }

    /// Creates a unit at `level` with full HP.
    ///
    /// Abilities whose unlock level exceeds `level` are left out. Equipment is
    /// only resolved when the template lists any, so enemy templates without
    /// gear spawn without an equipment oracle.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] when a listed ability or equipment piece is
    /// unknown, or when a piece is restricted to another element.
    pub fn spawn(
        &self,
        id: impl Into<UnitId>,
        level: u8,
        env: &BattleEnv<'_>,
    ) -> Result<Unit, OracleError> {
        let level = level.max(1);

        let mut abilities = Vec::with_capacity(self.abilities.len());
        for ability_id in &self.abilities {
            let definition = env.ability(ability_id)?;
            if definition.unlock_level <= level {
                abilities.push(ability_id.clone());
            }
        }

        let mut unit = Unit::new(id, self.element, self.base)
            .with_growth(self.growth)
            .with_level(level)
            .with_abilities(abilities);
        if !self.name.is_empty() {
            unit.name = self.name.clone();
        }
        unit.mana_contribution = self.mana_contribution;

        for equipment_id in &self.equipment {
            let item = env.equipment_definition(equipment_id)?;
            if !item.can_equip(self.element) {
                return Err(OracleError::EquipmentRestricted {
                    id: equipment_id.clone(),
                    element: self.element,
                });
            }
            unit.loadout.equip(item.clone());
        }

        refill_hp(&mut unit);
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::{
        AbilityDefinition, AbilityOracle, DjinnDefinition, DjinnOracle, EquipmentDefinition,
        EquipmentOracle, EquipmentSlot,
    };
    use crate::state::DjinnId;

    #[derive(Default)]
    struct Fixture {
        abilities: HashMap<AbilityId, AbilityDefinition>,
        equipment: HashMap<EquipmentId, EquipmentDefinition>,
    }

    impl AbilityOracle for Fixture {
        fn definition(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
            self.abilities.get(id)
        }
    }

    impl DjinnOracle for Fixture {
        fn definition(&self, _id: &DjinnId) -> Option<&DjinnDefinition> {
            None
        }
    }

    impl EquipmentOracle for Fixture {
        fn definition(&self, id: &EquipmentId) -> Option<&EquipmentDefinition> {
            self.equipment.get(id)
        }
    }

    fn fixture() -> Fixture {
        let mut fixture = Fixture::default();
        for ability in [
            AbilityDefinition::physical("slash", 10),
            AbilityDefinition::psynergy("quake", Element::Venus, 20).with_unlock_level(5),
        ] {
            fixture.abilities.insert(ability.id.clone(), ability);
        }
        for item in [
            EquipmentDefinition::new(
                "long_sword",
                EquipmentSlot::Weapon,
                Stats::new(0, 0, 8, 0, 0, 0),
            ),
            EquipmentDefinition::new("mars_robe", EquipmentSlot::Armor, Stats::ZERO)
                .restricted_to(Element::Mars),
        ] {
            fixture.equipment.insert(item.id.clone(), item);
        }
        fixture
    }

    #[test]
    fn spawn_unlocks_abilities_by_level() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture).with_equipment(&fixture);
        let template = UnitTemplate::new(Element::Venus, Stats::new(100, 20, 10, 5, 8, 7))
            .with_abilities([AbilityId::from("slash"), AbilityId::from("quake")]);

        let novice = template.spawn("isaac", 1, &env).unwrap();
        assert_eq!(novice.abilities, vec![AbilityId::from("slash")]);

        let veteran = template.spawn("isaac", 5, &env).unwrap();
        assert_eq!(veteran.abilities.len(), 2);
    }

    #[test]
    fn spawn_rejects_restricted_equipment() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture).with_equipment(&fixture);
        let template = UnitTemplate::new(Element::Venus, Stats::new(100, 20, 10, 5, 8, 7))
            .with_equipment([EquipmentId::from("mars_robe")]);

        let err = template.spawn("isaac", 1, &env).unwrap_err();
        assert!(matches!(err, OracleError::EquipmentRestricted { .. }));
    }

    #[test]
    fn spawn_starts_at_full_effective_hp() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture).with_equipment(&fixture);
        let template = UnitTemplate::new(Element::Venus, Stats::new(100, 20, 10, 5, 8, 7))
            .with_growth(GrowthRates::new(10.0, 0.0, 1.0, 0.0, 0.0, 0.0))
            .with_equipment([EquipmentId::from("long_sword")]);

        let unit = template.spawn("isaac", 3, &env).unwrap();
        assert_eq!(unit.current_hp, 120);
        assert_eq!(unit.loadout.bonuses().atk, 8);
    }
}
