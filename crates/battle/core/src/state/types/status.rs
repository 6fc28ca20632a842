//! Status effects carried by units.
//!
//! Each effect is one variant of [`StatusEffect`] holding exactly the data its
//! kind needs. Timed effects carry `duration` in turns; charge-based effects
//! (shield, auto-revive) carry a uses counter instead. Anything at or below
//! zero is pruned at the next tick boundary.

use crate::state::Element;
use crate::stats::Stats;

/// Discriminant of a [`StatusEffect`], used for immunity lists, cleanse
/// lists and events.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    Poison,
    Burn,
    Freeze,
    Stun,
    Paralyze,
    Buff,
    Debuff,
    HealOverTime,
    Shield,
    DamageReduction,
    ElementalResistance,
    Immunity,
    Invulnerable,
    AutoRevive,
}

impl StatusKind {
    /// Kinds removed by cleanse effects and blocked by immunity.
    pub const NEGATIVE: [StatusKind; 6] = [
        StatusKind::Poison,
        StatusKind::Burn,
        StatusKind::Freeze,
        StatusKind::Paralyze,
        StatusKind::Stun,
        StatusKind::Debuff,
    ];

    pub fn is_negative(self) -> bool {
        Self::NEGATIVE.contains(&self)
    }

    /// Whether several effects of this kind may coexist on one unit.
    pub fn stacks(self) -> bool {
        matches!(
            self,
            StatusKind::Buff
                | StatusKind::Debuff
                | StatusKind::DamageReduction
                | StatusKind::ElementalResistance
        )
    }
}

/// Which negative effects an immunity blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImmunityScope {
    All,
    Only(Vec<StatusKind>),
}

impl ImmunityScope {
    pub fn covers(&self, kind: StatusKind) -> bool {
        if !kind.is_negative() {
            return false;
        }
        match self {
            ImmunityScope::All => true,
            ImmunityScope::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// A single status effect instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    Poison {
        duration: i32,
    },
    Burn {
        duration: i32,
    },
    /// Blocks the turn unless it breaks on the tick.
    Freeze {
        duration: i32,
    },
    /// Always blocks the turn.
    Stun {
        duration: i32,
    },
    /// Checked when the unit attempts to act.
    Paralyze {
        duration: i32,
    },
    Buff {
        modifier: Stats,
        duration: i32,
    },
    /// `modifier` holds the (negative) deltas applied to the target.
    Debuff {
        modifier: Stats,
        duration: i32,
    },
    HealOverTime {
        amount: i32,
        duration: i32,
    },
    /// Each charge blocks one damaging hit.
    Shield {
        charges: i32,
    },
    DamageReduction {
        percent: f64,
        duration: i32,
    },
    ElementalResistance {
        element: Element,
        percent: f64,
        duration: i32,
    },
    Immunity {
        scope: ImmunityScope,
        duration: i32,
    },
    Invulnerable {
        duration: i32,
    },
    AutoRevive {
        hp_percent: f64,
        uses: i32,
    },
}

impl StatusEffect {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusEffect::Poison { .. } => StatusKind::Poison,
            StatusEffect::Burn { .. } => StatusKind::Burn,
            StatusEffect::Freeze { .. } => StatusKind::Freeze,
            StatusEffect::Stun { .. } => StatusKind::Stun,
            StatusEffect::Paralyze { .. } => StatusKind::Paralyze,
            StatusEffect::Buff { .. } => StatusKind::Buff,
            StatusEffect::Debuff { .. } => StatusKind::Debuff,
            StatusEffect::HealOverTime { .. } => StatusKind::HealOverTime,
            StatusEffect::Shield { .. } => StatusKind::Shield,
            StatusEffect::DamageReduction { .. } => StatusKind::DamageReduction,
            StatusEffect::ElementalResistance { .. } => StatusKind::ElementalResistance,
            StatusEffect::Immunity { .. } => StatusKind::Immunity,
            StatusEffect::Invulnerable { .. } => StatusKind::Invulnerable,
            StatusEffect::AutoRevive { .. } => StatusKind::AutoRevive,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.kind().is_negative()
    }

    /// Remaining turns for timed effects.
    pub fn duration(&self) -> Option<i32> {
        match self {
            StatusEffect::Poison { duration }
            | StatusEffect::Burn { duration }
            | StatusEffect::Freeze { duration }
            | StatusEffect::Stun { duration }
            | StatusEffect::Paralyze { duration }
            | StatusEffect::Buff { duration, .. }
            | StatusEffect::Debuff { duration, .. }
            | StatusEffect::HealOverTime { duration, .. }
            | StatusEffect::DamageReduction { duration, .. }
            | StatusEffect::ElementalResistance { duration, .. }
            | StatusEffect::Immunity { duration, .. }
            | StatusEffect::Invulnerable { duration } => Some(*duration),
            StatusEffect::Shield { .. } | StatusEffect::AutoRevive { .. } => None,
        }
    }

    fn duration_mut(&mut self) -> Option<&mut i32> {
        match self {
            StatusEffect::Poison { duration }
            | StatusEffect::Burn { duration }
            | StatusEffect::Freeze { duration }
            | StatusEffect::Stun { duration }
            | StatusEffect::Paralyze { duration }
            | StatusEffect::Buff { duration, .. }
            | StatusEffect::Debuff { duration, .. }
            | StatusEffect::HealOverTime { duration, .. }
            | StatusEffect::DamageReduction { duration, .. }
            | StatusEffect::ElementalResistance { duration, .. }
            | StatusEffect::Immunity { duration, .. }
            | StatusEffect::Invulnerable { duration } => Some(duration),
            StatusEffect::Shield { .. } | StatusEffect::AutoRevive { .. } => None,
        }
    }

    /// Remaining uses for charge-based effects.
    pub fn uses(&self) -> Option<i32> {
        match self {
            StatusEffect::Shield { charges } => Some(*charges),
            StatusEffect::AutoRevive { uses, .. } => Some(*uses),
            _ => None,
        }
    }

    /// Decrements the duration of a timed effect. Charge-based effects are untouched.
    pub fn tick_duration(&mut self) {
        if let Some(duration) = self.duration_mut() {
            *duration -= 1;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.duration().is_some_and(|d| d <= 0) || self.uses().is_some_and(|u| u <= 0)
    }

    /// Stat deltas contributed to the status layer.
    pub fn stat_modifier(&self) -> Stats {
        match self {
            StatusEffect::Buff { modifier, .. } | StatusEffect::Debuff { modifier, .. } => {
                *modifier
            }
            _ => Stats::ZERO,
        }
    }
}

/// Ordered list of effects active on a unit.
///
/// Order is application order; "first shield" and "first auto-revive" rules
/// depend on it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn push(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Removes every effect matching the predicate and returns them in order.
    pub fn drain_where(
        &mut self,
        mut predicate: impl FnMut(&StatusEffect) -> bool,
    ) -> Vec<StatusEffect> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.effects.len());
        for effect in self.effects.drain(..) {
            if predicate(&effect) {
                removed.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        removed
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Sum of buff/debuff deltas (the status layer of the stats pipeline).
    pub fn stat_modifier(&self) -> Stats {
        self.effects.iter().map(StatusEffect::stat_modifier).sum()
    }

    /// Summed elemental-resistance fraction against `element`.
    pub fn elemental_resistance(&self, element: Element) -> f64 {
        self.effects
            .iter()
            .filter_map(|e| match e {
                StatusEffect::ElementalResistance {
                    element: resisted,
                    percent,
                    ..
                } if *resisted == element => Some(*percent),
                _ => None,
            })
            .sum()
    }

    /// Summed damage-reduction fraction, clamped to [0, 1].
    pub fn damage_reduction(&self) -> f64 {
        let total: f64 = self
            .effects
            .iter()
            .filter_map(|e| match e {
                StatusEffect::DamageReduction { percent, .. } => Some(*percent),
                _ => None,
            })
            .sum();
        total.clamp(0.0, 1.0)
    }

    /// Returns true if an active immunity blocks `kind`.
    pub fn is_immune_to(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| match e {
            StatusEffect::Immunity { scope, .. } => scope.covers(kind),
            _ => false,
        })
    }
}

impl From<Vec<StatusEffect>> for StatusEffects {
    fn from(effects: Vec<StatusEffect>) -> Self {
        Self { effects }
    }
}
