use crate::state::{AbilityId, Element, ImmunityScope, StatusEffect, StatusKind};
use crate::stats::Stats;

pub trait AbilityOracle: Send + Sync {
    fn definition(&self, id: &AbilityId) -> Option<&AbilityDefinition>;
}

/// Resolution family of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    Physical,
    Psynergy,
    Healing,
    Buff,
    Debuff,
    /// Fixed damage equal to base power, routed through mitigation.
    Summon,
}

impl AbilityKind {
    pub const fn is_damaging(self) -> bool {
        matches!(
            self,
            AbilityKind::Physical | AbilityKind::Psynergy | AbilityKind::Summon
        )
    }
}

/// Side an ability aims at, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSide {
    Ally,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetMode {
    #[default]
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
    SelfOnly,
}

impl TargetMode {
    pub const fn side(self) -> TargetSide {
        match self {
            TargetMode::SingleEnemy | TargetMode::AllEnemies => TargetSide::Enemy,
            TargetMode::SingleAlly | TargetMode::AllAllies | TargetMode::SelfOnly => {
                TargetSide::Ally
            }
        }
    }

    pub const fn is_area(self) -> bool {
        matches!(self, TargetMode::AllEnemies | TargetMode::AllAllies)
    }
}

/// Target-selection hint consumed by the decision engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetHint {
    #[default]
    Weakest,
    LowestRes,
    HealerFirst,
    Random,
    HighestDef,
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiHints {
    /// Base score; 1.0 when absent.
    pub priority: Option<f64>,
    pub target: TargetHint,
    /// Preferred during the first round.
    pub opener: bool,
    /// Skip targets that would be overkilled by more than half their HP.
    pub avoid_overkill: bool,
}

/// Status applied to each damaged target with the given probability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnHitStatus {
    pub effect: StatusEffect,
    pub chance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOverTimeGrant {
    pub amount: i32,
    pub duration: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReductionGrant {
    pub percent: f64,
    pub duration: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResistanceGrant {
    pub element: Element,
    pub percent: f64,
    pub duration: i32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImmunityGrant {
    pub scope: ImmunityScope,
    pub duration: i32,
}

/// Which statuses an ability strips from its targets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusRemoval {
    AllNegative,
    Kinds(Vec<StatusKind>),
}

impl StatusRemoval {
    pub fn removes(&self, kind: StatusKind) -> bool {
        match self {
            StatusRemoval::AllNegative => kind.is_negative(),
            StatusRemoval::Kinds(kinds) => kinds.contains(&kind),
        }
    }
}

/// Static definition of an ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetMode,
    #[cfg_attr(feature = "serde", serde(default = "default_unlock_level"))]
    pub unlock_level: u8,

    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Option<OnHitStatus>,
    /// Buff/debuff deltas. Debuffs should carry negative values.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Stats,
    #[cfg_attr(feature = "serde", serde(default = "default_effect_duration"))]
    pub effect_duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_over_time: Option<HealOverTimeGrant>,
    #[cfg_attr(feature = "serde", serde(default = "default_hits"))]
    pub hits: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub revive: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_revive_percent"))]
    pub revive_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_def_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub splash_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grant_shield: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grant_damage_reduction: Option<ReductionGrant>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grant_elemental_resistance: Option<ResistanceGrant>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grant_immunity: Option<ImmunityGrant>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub remove_statuses: Option<StatusRemoval>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: AiHints,
}

#[cfg(feature = "serde")]
fn default_unlock_level() -> u8 {
    1
}

#[cfg(feature = "serde")]
fn default_effect_duration() -> i32 {
    AbilityDefinition::DEFAULT_EFFECT_DURATION
}

#[cfg(feature = "serde")]
fn default_hits() -> u8 {
    1
}

#[cfg(feature = "serde")]
fn default_revive_percent() -> f64 {
    AbilityDefinition::DEFAULT_REVIVE_PERCENT
}

impl AbilityDefinition {
    pub const DEFAULT_EFFECT_DURATION: i32 = 3;
    pub const DEFAULT_REVIVE_PERCENT: f64 = 0.5;

    /// Creates a definition with neutral defaults for every optional field.
    pub fn new(id: impl Into<AbilityId>, kind: AbilityKind, target: TargetMode) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            kind,
            element: Element::Neutral,
            mana_cost: 0,
            base_power: 0,
            target,
            unlock_level: 1,
            on_hit: None,
            modifier: Stats::ZERO,
            effect_duration: Self::DEFAULT_EFFECT_DURATION,
            heal_over_time: None,
            hits: 1,
            revive: false,
            revive_percent: Self::DEFAULT_REVIVE_PERCENT,
            ignore_def_percent: 0.0,
            splash_percent: 0.0,
            grant_shield: None,
            grant_damage_reduction: None,
            grant_elemental_resistance: None,
            grant_immunity: None,
            remove_statuses: None,
            ai: AiHints::default(),
        }
    }

    /// The implicit basic attack used when a queued action names no ability.
    pub fn basic_attack() -> Self {
        Self::new("basic_attack", AbilityKind::Physical, TargetMode::SingleEnemy)
    }

    pub fn physical(id: impl Into<AbilityId>, power: u32) -> Self {
        Self::new(id, AbilityKind::Physical, TargetMode::SingleEnemy).with_power(power)
    }

    pub fn psynergy(id: impl Into<AbilityId>, element: Element, power: u32) -> Self {
        Self::new(id, AbilityKind::Psynergy, TargetMode::SingleEnemy)
            .with_power(power)
            .with_element(element)
    }

    pub fn healing(id: impl Into<AbilityId>, power: u32) -> Self {
        Self::new(id, AbilityKind::Healing, TargetMode::SingleAlly).with_power(power)
    }

    pub fn buff(id: impl Into<AbilityId>, modifier: Stats) -> Self {
        let mut ability = Self::new(id, AbilityKind::Buff, TargetMode::SingleAlly);
        ability.modifier = modifier;
        ability
    }

    pub fn debuff(id: impl Into<AbilityId>, modifier: Stats) -> Self {
        let mut ability = Self::new(id, AbilityKind::Debuff, TargetMode::SingleEnemy);
        ability.modifier = modifier;
        ability
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.base_power = power;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_cost(mut self, cost: u8) -> Self {
        self.mana_cost = cost;
        self
    }

    pub fn with_target(mut self, target: TargetMode) -> Self {
        self.target = target;
        self
    }

    pub fn with_unlock_level(mut self, level: u8) -> Self {
        self.unlock_level = level;
        self
    }

    pub fn with_hits(mut self, hits: u8) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_on_hit(mut self, effect: StatusEffect, chance: f64) -> Self {
        self.on_hit = Some(OnHitStatus { effect, chance });
        self
    }

    pub fn with_splash(mut self, percent: f64) -> Self {
        self.splash_percent = percent;
        self
    }

    pub fn with_ignore_def(mut self, percent: f64) -> Self {
        self.ignore_def_percent = percent;
        self
    }

    pub fn with_revive(mut self, percent: f64) -> Self {
        self.revive = true;
        self.revive_percent = percent;
        self
    }

    pub fn with_shield(mut self, charges: i32) -> Self {
        self.grant_shield = Some(charges);
        self
    }

    pub fn with_heal_over_time(mut self, amount: i32, duration: i32) -> Self {
        self.heal_over_time = Some(HealOverTimeGrant { amount, duration });
        self
    }

    pub fn with_damage_reduction(mut self, percent: f64, duration: i32) -> Self {
        self.grant_damage_reduction = Some(ReductionGrant { percent, duration });
        self
    }

    pub fn with_resistance(mut self, element: Element, percent: f64, duration: i32) -> Self {
        self.grant_elemental_resistance = Some(ResistanceGrant {
            element,
            percent,
            duration,
        });
        self
    }

    pub fn with_immunity(mut self, scope: ImmunityScope, duration: i32) -> Self {
        self.grant_immunity = Some(ImmunityGrant { scope, duration });
        self
    }

    pub fn with_removal(mut self, removal: StatusRemoval) -> Self {
        self.remove_statuses = Some(removal);
        self
    }

    pub fn with_hints(mut self, hints: AiHints) -> Self {
        self.ai = hints;
        self
    }

    pub fn is_area(&self) -> bool {
        self.target.is_area()
    }

    pub fn side(&self) -> TargetSide {
        self.target.side()
    }
}
