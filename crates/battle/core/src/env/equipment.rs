use crate::state::{AbilityId, Element, EquipmentId};
use crate::stats::Stats;

pub trait EquipmentOracle: Send + Sync {
    fn definition(&self, id: &EquipmentId) -> Option<&EquipmentDefinition>;
}

/// Slot an equipment piece occupies in a unit's loadout.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helm,
    Boots,
    Accessory,
}

impl EquipmentSlot {
    pub const fn index(self) -> usize {
        match self {
            EquipmentSlot::Weapon => 0,
            EquipmentSlot::Armor => 1,
            EquipmentSlot::Helm => 2,
            EquipmentSlot::Boots => 3,
            EquipmentSlot::Accessory => 4,
        }
    }
}

bitflags::bitflags! {
    /// Special behaviors granted by an equipment piece.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EquipmentFlags: u8 {
        /// Wearer acts before every unit without this flag.
        const ALWAYS_FIRST = 1 << 0;
    }
}

/// Elemental damage reduction carried by armor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementalResist {
    pub element: Element,
    /// Fraction of psynergy damage removed (0.2 = 20%).
    pub percent: f64,
}

/// Static definition of an equipment piece.
///
/// Loadouts store full definitions so the stats pipeline never needs an
/// oracle lookup mid-battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: EquipmentId,
    pub slot: EquipmentSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Stats,
    /// Only units of this element may equip the piece.
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: EquipmentFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resist: Option<ElementalResist>,
    /// Ability unlocked while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocks: Option<AbilityId>,
}

impl EquipmentDefinition {
    pub fn new(id: impl Into<EquipmentId>, slot: EquipmentSlot, bonuses: Stats) -> Self {
        Self {
            id: id.into(),
            slot,
            bonuses,
            element: None,
            flags: EquipmentFlags::empty(),
            resist: None,
            unlocks: None,
        }
    }

    pub fn with_flags(mut self, flags: EquipmentFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_resist(mut self, element: Element, percent: f64) -> Self {
        self.resist = Some(ElementalResist { element, percent });
        self
    }

    pub fn restricted_to(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn can_equip(&self, element: Element) -> bool {
        self.element.is_none_or(|required| required == element)
    }
}
