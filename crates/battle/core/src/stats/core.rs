//! Stat blocks shared by every layer of the pipeline.

use core::ops::{Add, AddAssign, Neg};

/// Identifies one of the six battle stats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    Hp,
    Pp,
    Atk,
    Def,
    Mag,
    Spd,
}

impl StatKind {
    /// Lowest value the pipeline lets this stat reach.
    pub const fn floor(self) -> i32 {
        match self {
            StatKind::Hp => 1,
            StatKind::Pp | StatKind::Def => 0,
            StatKind::Atk | StatKind::Mag | StatKind::Spd => 1,
        }
    }
}

/// Integer stat block: base stats, effective stats, equipment bonuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub hp: i32,
    pub pp: i32,
    pub atk: i32,
    pub def: i32,
    pub mag: i32,
    pub spd: i32,
}

impl Stats {
    pub const ZERO: Self = Self {
        hp: 0,
        pp: 0,
        atk: 0,
        def: 0,
        mag: 0,
        spd: 0,
    };

    pub const fn new(hp: i32, pp: i32, atk: i32, def: i32, mag: i32, spd: i32) -> Self {
        Self {
            hp,
            pp,
            atk,
            def,
            mag,
            spd,
        }
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Pp => self.pp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Mag => self.mag,
            StatKind::Spd => self.spd,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Pp => &mut self.pp,
            StatKind::Atk => &mut self.atk,
            StatKind::Def => &mut self.def,
            StatKind::Mag => &mut self.mag,
            StatKind::Spd => &mut self.spd,
        }
    }

    /// Sum of absolute values across all stats.
    pub fn magnitude(&self) -> i32 {
        self.hp.abs()
            + self.pp.abs()
            + self.atk.abs()
            + self.def.abs()
            + self.mag.abs()
            + self.spd.abs()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Drops the HP and PP components (the Djinn layer never touches them).
    pub fn without_resources(mut self) -> Self {
        self.hp = 0;
        self.pp = 0;
        self
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats {
            hp: self.hp + rhs.hp,
            pp: self.pp + rhs.pp,
            atk: self.atk + rhs.atk,
            def: self.def + rhs.def,
            mag: self.mag + rhs.mag,
            spd: self.spd + rhs.spd,
        }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self = *self + rhs;
    }
}

impl Neg for Stats {
    type Output = Stats;

    fn neg(self) -> Stats {
        Stats {
            hp: -self.hp,
            pp: -self.pp,
            atk: -self.atk,
            def: -self.def,
            mag: -self.mag,
            spd: -self.spd,
        }
    }
}

impl core::iter::Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::ZERO, Add::add)
    }
}

/// Per-level growth. Fractional rates accumulate and are floored at the end
/// of the pipeline, so a 2.5 HP/level unit gains 5 HP every two levels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthRates {
    pub hp: f64,
    pub pp: f64,
    pub atk: f64,
    pub def: f64,
    pub mag: f64,
    pub spd: f64,
}

impl GrowthRates {
    pub const fn new(hp: f64, pp: f64, atk: f64, def: f64, mag: f64, spd: f64) -> Self {
        Self {
            hp,
            pp,
            atk,
            def,
            mag,
            spd,
        }
    }

    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Pp => self.pp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Mag => self.mag,
            StatKind::Spd => self.spd,
        }
    }
}
