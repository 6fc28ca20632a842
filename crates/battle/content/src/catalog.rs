//! In-memory content store implementing the battle oracles.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use anyhow::{Context, anyhow, bail, ensure};
use battle_core::djinn::SynergyPattern;
use battle_core::{
    AbilityDefinition, AbilityId, AbilityOracle, BattleConfig, BattleEnv, BattleSetup, BattleState,
    DjinnDefinition, DjinnId, DjinnOracle, EncounterId, EquipmentDefinition, EquipmentId,
    EquipmentOracle, Unit, UnitId, UnitTemplate,
};
use serde::{Deserialize, Serialize};

use crate::loaders::LoadResult;

fn default_level() -> u8 {
    1
}

/// A unit placed into a battle from a named template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub template: String,
    #[serde(default = "default_level")]
    pub level: u8,
    /// Battle id. Defaults to the template name, numbered when the template
    /// appears more than once on the same side.
    #[serde(default)]
    pub id: Option<UnitId>,
}

impl Spawn {
    pub fn new(template: impl Into<String>, level: u8) -> Self {
        Self {
            template: template.into(),
            level,
            id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterDefinition {
    pub id: EncounterId,
    #[serde(default)]
    pub name: String,
    pub enemies: Vec<Spawn>,
}

/// A preset party with its equipped Djinn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyDefinition {
    pub id: String,
    pub members: Vec<Spawn>,
    #[serde(default)]
    pub djinn: Vec<DjinnId>,
}

/// Team ability unlocked by a three-Djinn synergy pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynergyGrant {
    pub pattern: SynergyPattern,
    pub ability: AbilityId,
}

/// Every definition a battle can reference, keyed by id.
///
/// Implements [`AbilityOracle`], [`DjinnOracle`] and [`EquipmentOracle`], so
/// [`Catalog::env`] is all the engine needs.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    abilities: BTreeMap<AbilityId, AbilityDefinition>,
    djinn: BTreeMap<DjinnId, DjinnDefinition>,
    equipment: BTreeMap<EquipmentId, EquipmentDefinition>,
    synergies: HashMap<SynergyPattern, AbilityId>,
    units: BTreeMap<String, UnitTemplate>,
    encounters: BTreeMap<EncounterId, EncounterDefinition>,
    parties: BTreeMap<String, PartyDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content shipped with the crate.
    pub fn builtin() -> LoadResult<Self> {
        crate::loaders::CatalogLoader::builtin()
    }

    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(self, self).with_equipment(self)
    }

    pub fn add_ability(&mut self, ability: AbilityDefinition) -> LoadResult<()> {
        insert_unique(&mut self.abilities, ability.id.clone(), ability, "ability")
    }

    pub fn add_djinn(&mut self, djinn: DjinnDefinition) -> LoadResult<()> {
        insert_unique(&mut self.djinn, djinn.id.clone(), djinn, "djinn")
    }

    pub fn add_equipment(&mut self, item: EquipmentDefinition) -> LoadResult<()> {
        insert_unique(&mut self.equipment, item.id.clone(), item, "equipment")
    }

    pub fn add_synergy(&mut self, grant: SynergyGrant) -> LoadResult<()> {
        ensure!(
            grant.pattern.grants_ability(),
            "synergy pattern {:?} does not carry a team ability",
            grant.pattern
        );
        let pattern = grant.pattern;
        ensure!(
            !self.synergies.contains_key(&pattern),
            "duplicate synergy {pattern:?}"
        );
        self.synergies.insert(pattern, grant.ability);
        Ok(())
    }

    pub fn add_unit(&mut self, name: impl Into<String>, template: UnitTemplate) -> LoadResult<()> {
        insert_unique(&mut self.units, name.into(), template, "unit template")
    }

    pub fn add_encounter(&mut self, encounter: EncounterDefinition) -> LoadResult<()> {
        insert_unique(
            &mut self.encounters,
            encounter.id.clone(),
            encounter,
            "encounter",
        )
    }

    pub fn add_party(&mut self, party: PartyDefinition) -> LoadResult<()> {
        insert_unique(&mut self.parties, party.id.clone(), party, "party")
    }

    pub fn ability(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    pub fn template(&self, name: &str) -> Option<&UnitTemplate> {
        self.units.get(name)
    }

    pub fn encounter(&self, id: &EncounterId) -> Option<&EncounterDefinition> {
        self.encounters.get(id)
    }

    pub fn party(&self, id: &str) -> Option<&PartyDefinition> {
        self.parties.get(id)
    }

    pub fn encounters(&self) -> impl Iterator<Item = &EncounterDefinition> {
        self.encounters.values()
    }

    pub fn parties(&self) -> impl Iterator<Item = &PartyDefinition> {
        self.parties.values()
    }

    /// Creates the units for one side, numbering repeated templates.
    pub fn spawn_all(&self, spawns: &[Spawn]) -> LoadResult<Vec<Unit>> {
        let mut numbered: HashMap<&str, usize> = HashMap::new();
        for spawn in spawns.iter().filter(|spawn| spawn.id.is_none()) {
            *numbered.entry(spawn.template.as_str()).or_default() += 1;
        }
        let mut counters: HashMap<&str, usize> = HashMap::new();

        let env = self.env();
        spawns
            .iter()
            .map(|spawn| {
                let template = self
                    .template(&spawn.template)
                    .ok_or_else(|| anyhow!("unknown unit template '{}'", spawn.template))?;
                let id = match &spawn.id {
                    Some(id) => id.clone(),
                    None if numbered
                        .get(spawn.template.as_str())
                        .is_some_and(|count| *count > 1) =>
                    {
                        let n = counters.entry(spawn.template.as_str()).or_default();
                        *n += 1;
                        UnitId::new(format!("{}_{}", spawn.template, n))
                    }
                    None => UnitId::new(spawn.template.clone()),
                };
                template
                    .spawn(id, spawn.level, &env)
                    .with_context(|| format!("spawning '{}'", spawn.template))
            })
            .collect()
    }

    /// Builds a ready-to-plan battle between a preset party and an encounter.
    pub fn battle(
        &self,
        party: &str,
        encounter: &EncounterId,
        seed: u32,
    ) -> LoadResult<BattleState> {
        let party = self
            .party(party)
            .ok_or_else(|| anyhow!("unknown party '{party}'"))?;
        let definition = self
            .encounter(encounter)
            .ok_or_else(|| anyhow!("unknown encounter '{encounter}'"))?;

        let members = self.spawn_all(&party.members)?;
        let enemies = self.spawn_all(&definition.enemies)?;
        let setup = party.djinn.iter().cloned().fold(
            BattleSetup::new(definition.id.clone(), seed)
                .party(members)
                .enemies(enemies),
            |setup, djinn| setup.djinn(djinn),
        );
        let state = setup
            .build(&self.env())
            .with_context(|| format!("setting up '{}' vs '{}'", party.id, definition.id))?;
        Ok(state)
    }

    /// Checks every cross-reference between definitions.
    pub fn validate(&self) -> LoadResult<()> {
        for ability in self.abilities.values() {
            ensure!(
                ability.mana_cost <= BattleConfig::MAX_ABILITY_COST,
                "ability '{}' costs {} mana, above the limit of {}",
                ability.id,
                ability.mana_cost,
                BattleConfig::MAX_ABILITY_COST
            );
        }

        for djinn in self.djinn.values() {
            for tier in [&djinn.grants.same, &djinn.grants.neutral, &djinn.grants.counter] {
                for ability in tier {
                    self.require_ability(ability)
                        .with_context(|| format!("djinn '{}'", djinn.id))?;
                }
            }
        }

        for item in self.equipment.values() {
            if let Some(ability) = &item.unlocks {
                self.require_ability(ability)
                    .with_context(|| format!("equipment '{}'", item.id))?;
            }
        }

        for ability in self.synergies.values() {
            self.require_ability(ability).context("synergy table")?;
        }

        for (name, template) in &self.units {
            for ability in &template.abilities {
                self.require_ability(ability)
                    .with_context(|| format!("unit template '{name}'"))?;
            }
            for id in &template.equipment {
                let Some(item) = self.equipment.get(id) else {
                    bail!("unit template '{name}' lists unknown equipment '{id}'");
                };
                ensure!(
                    item.can_equip(template.element),
                    "unit template '{name}' cannot wear '{id}'"
                );
            }
        }

        for encounter in self.encounters.values() {
            ensure!(
                !encounter.enemies.is_empty(),
                "encounter '{}' has no enemies",
                encounter.id
            );
            self.require_templates(&encounter.enemies)
                .with_context(|| format!("encounter '{}'", encounter.id))?;
        }

        for party in self.parties.values() {
            ensure!(
                (1..=BattleConfig::MAX_PARTY).contains(&party.members.len()),
                "party '{}' must have 1 to {} members",
                party.id,
                BattleConfig::MAX_PARTY
            );
            ensure!(
                party.djinn.len() <= BattleConfig::MAX_EQUIPPED_DJINN,
                "party '{}' equips more than {} djinn",
                party.id,
                BattleConfig::MAX_EQUIPPED_DJINN
            );
            for id in &party.djinn {
                ensure!(
                    self.djinn.contains_key(id),
                    "party '{}' equips unknown djinn '{id}'",
                    party.id
                );
            }
            self.require_templates(&party.members)
                .with_context(|| format!("party '{}'", party.id))?;
        }

        Ok(())
    }

    fn require_ability(&self, id: &AbilityId) -> LoadResult<()> {
        ensure!(self.abilities.contains_key(id), "unknown ability '{id}'");
        Ok(())
    }

    fn require_templates(&self, spawns: &[Spawn]) -> LoadResult<()> {
        for spawn in spawns {
            ensure!(
                self.units.contains_key(&spawn.template),
                "unknown unit template '{}'",
                spawn.template
            );
        }
        Ok(())
    }
}

fn insert_unique<K: Ord + Display, V>(
    map: &mut BTreeMap<K, V>,
    key: K,
    value: V,
    what: &str,
) -> LoadResult<()> {
    match map.entry(key) {
        Entry::Occupied(entry) => bail!("duplicate {what} '{}'", entry.key()),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

impl AbilityOracle for Catalog {
    fn definition(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }
}

impl DjinnOracle for Catalog {
    fn definition(&self, id: &DjinnId) -> Option<&DjinnDefinition> {
        self.djinn.get(id)
    }

    fn synergy_ability(&self, pattern: &SynergyPattern) -> Option<AbilityId> {
        self.synergies.get(pattern).cloned()
    }
}

impl EquipmentOracle for Catalog {
    fn definition(&self, id: &EquipmentId) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{Element, Stats};

    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_ability(AbilityDefinition::psynergy("quake", Element::Venus, 20).with_cost(1))
            .unwrap();
        catalog
            .add_unit(
                "isaac",
                UnitTemplate::new(Element::Venus, Stats::new(100, 10, 12, 8, 10, 9))
                    .with_abilities([AbilityId::from("quake")]),
            )
            .unwrap();
        catalog
            .add_unit(
                "slime",
                UnitTemplate::new(Element::Mercury, Stats::new(40, 0, 6, 4, 2, 3)),
            )
            .unwrap();
        catalog
            .add_encounter(EncounterDefinition {
                id: "puddle".into(),
                name: String::new(),
                enemies: vec![Spawn::new("slime", 1), Spawn::new("slime", 2)],
            })
            .unwrap();
        catalog
            .add_party(PartyDefinition {
                id: "solo".into(),
                members: vec![Spawn::new("isaac", 1)],
                djinn: Vec::new(),
            })
            .unwrap();
        catalog
    }

    #[test]
    fn repeated_templates_get_numbered_ids() {
        let catalog = catalog();
        let encounter = catalog.encounter(&"puddle".into()).unwrap();
        let units = catalog.spawn_all(&encounter.enemies).unwrap();
        let ids: Vec<&str> = units.iter().map(|unit| unit.id.as_str()).collect();
        assert_eq!(ids, ["slime_1", "slime_2"]);
        assert_eq!(units[1].level, 2);
    }

    #[test]
    fn builds_a_battle_from_presets() {
        let catalog = catalog();
        catalog.validate().unwrap();
        let state = catalog.battle("solo", &"puddle".into(), 7).unwrap();
        assert_eq!(state.party.units.len(), 1);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.seed, 7);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut catalog = catalog();
        let err = catalog
            .add_ability(AbilityDefinition::physical("quake", 5))
            .unwrap_err();
        assert!(err.to_string().contains("duplicate ability"));
    }

    #[test]
    fn validation_catches_dangling_references() {
        let mut catalog = catalog();
        catalog
            .add_unit(
                "ghost",
                UnitTemplate::new(Element::Neutral, Stats::new(10, 0, 1, 1, 1, 1))
                    .with_abilities([AbilityId::from("haunt")]),
            )
            .unwrap();
        let err = catalog.validate().unwrap_err();
        assert!(format!("{err:#}").contains("unknown ability 'haunt'"));
    }

    #[test]
    fn synergy_grants_need_a_team_pattern() {
        let mut catalog = catalog();
        let err = catalog
            .add_synergy(SynergyGrant {
                pattern: SynergyPattern::Single(Element::Venus),
                ability: "quake".into(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("does not carry a team ability"));

        catalog
            .add_synergy(SynergyGrant {
                pattern: SynergyPattern::Harmony,
                ability: "quake".into(),
            })
            .unwrap();
        assert_eq!(
            catalog.synergy_ability(&SynergyPattern::Harmony),
            Some(AbilityId::from("quake"))
        );
    }
}
