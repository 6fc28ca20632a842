use crate::config::BattleConfig;
use crate::env::{EquipmentDefinition, EquipmentSlot};
use crate::state::{AbilityId, Element, StatusEffects, UnitId};
use crate::stats::{GrowthRates, Stats};

/// Five-slot equipment loadout. Slots hold full definitions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    slots: [Option<EquipmentDefinition>; BattleConfig::EQUIPMENT_SLOTS],
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `item` in its slot and returns whatever was there.
    pub fn equip(&mut self, item: EquipmentDefinition) -> Option<EquipmentDefinition> {
        let index = item.slot.index();
        self.slots[index].replace(item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentDefinition> {
        self.slots[slot.index()].take()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentDefinition> {
        self.slots[slot.index()].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentDefinition> {
        self.slots.iter().flatten()
    }

    /// Summed stat bonuses of every equipped piece.
    pub fn bonuses(&self) -> Stats {
        self.iter().map(|item| item.bonuses).sum()
    }

    /// Summed armor resistance against `element`.
    pub fn resistance(&self, element: Element) -> f64 {
        self.iter()
            .filter_map(|item| item.resist)
            .filter(|resist| resist.element == element)
            .map(|resist| resist.percent)
            .sum()
    }

    pub fn always_first(&self) -> bool {
        self.iter()
            .any(|item| item.flags.contains(crate::env::EquipmentFlags::ALWAYS_FIRST))
    }

    /// Abilities unlocked by equipped pieces.
    pub fn unlocked_abilities(&self) -> impl Iterator<Item = &AbilityId> {
        self.iter().filter_map(|item| item.unlocks.as_ref())
    }
}

/// Per-battle counters, reset when a battle starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleCounters {
    pub actions_taken: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub knockouts: u32,
}

/// A combatant on either roster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub element: Element,
    pub base: Stats,
    pub growth: GrowthRates,
    pub level: u8,
    pub xp: u32,
    /// Invariant: `0 ≤ current_hp ≤ effective max HP`.
    pub current_hp: i32,
    pub loadout: Loadout,
    /// Abilities unlocked by level; Djinn and equipment grants are derived.
    pub abilities: Vec<AbilityId>,
    pub statuses: StatusEffects,
    pub counters: BattleCounters,
    /// Mana this unit adds to the team pool while in the party.
    pub mana_contribution: u8,
}

impl Unit {
    /// Creates a level-1 unit at full base HP with no equipment.
    pub fn new(id: impl Into<UnitId>, element: Element, base: Stats) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            element,
            base,
            growth: GrowthRates::default(),
            level: 1,
            xp: 0,
            current_hp: base.hp.max(1),
            loadout: Loadout::new(),
            abilities: Vec::new(),
            statuses: StatusEffects::new(),
            counters: BattleCounters::default(),
            mana_contribution: 1,
        }
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }

    pub fn with_growth(mut self, growth: GrowthRates) -> Self {
        self.growth = growth;
        self
    }

    /// Sets the level. Current HP is not rescaled; call
    /// [`crate::stats::refill_hp`] when the unit should start at full health.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_equipment(mut self, item: EquipmentDefinition) -> Self {
        self.loadout.equip(item);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_ko(&self) -> bool {
        !self.is_alive()
    }

    pub fn knows(&self, ability: &AbilityId) -> bool {
        self.abilities.contains(ability) || self.loadout.unlocked_abilities().any(|a| a == ability)
    }
}
