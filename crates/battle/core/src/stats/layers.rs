use strum::IntoEnumIterator;

use crate::djinn::djinn_layer;
use crate::state::{Team, Unit};
use crate::stats::{StatKind, Stats};

/// The individual layers feeding a unit's effective stats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatLayers {
    pub base: Stats,
    /// `(level − 1) × growth`, kept fractional until the final floor.
    pub level: [f64; 6],
    pub equipment: Stats,
    /// Zero for HP and PP, and zero everywhere outside a party context.
    pub djinn: Stats,
    pub status: Stats,
}

impl StatLayers {
    /// Collects the layers for `unit`. Pass the unit's team to include the
    /// Djinn layer; enemies are evaluated with `None`.
    pub fn collect(unit: &Unit, team: Option<&Team>) -> Self {
        let steps = f64::from(unit.level.saturating_sub(1));
        let mut level = [0.0; 6];
        for (slot, kind) in StatKind::iter().enumerate() {
            level[slot] = steps * unit.growth.get(kind);
        }

        Self {
            base: unit.base,
            level,
            equipment: unit.loadout.bonuses(),
            djinn: team
                .map(|team| djinn_layer(unit.element, team).without_resources())
                .unwrap_or_default(),
            status: unit.statuses.stat_modifier(),
        }
    }

    /// Sums, floors and clamps the layers.
    pub fn total(&self) -> Stats {
        let mut result = Stats::ZERO;
        for (slot, kind) in StatKind::iter().enumerate() {
            let flat = self.base.get(kind)
                + self.equipment.get(kind)
                + self.djinn.get(kind)
                + self.status.get(kind);
            let value = (f64::from(flat) + self.level[slot]).floor() as i32;
            *result.get_mut(kind) = value.max(kind.floor());
        }
        result
    }
}

/// Effective stats of `unit`. `team` supplies the Djinn layer.
pub fn effective_stats(unit: &Unit, team: Option<&Team>) -> Stats {
    StatLayers::collect(unit, team).total()
}

/// Effective max HP. The Djinn layer never touches HP, so no team is needed.
pub fn max_hp(unit: &Unit) -> i32 {
    effective_stats(unit, None).hp
}

/// Clamps current HP into `[0, max_hp]`.
pub fn clamp_hp(unit: &mut Unit) {
    let max = max_hp(unit);
    unit.current_hp = unit.current_hp.clamp(0, max);
}

/// Sets current HP to the effective maximum.
pub fn refill_hp(unit: &mut Unit) {
    unit.current_hp = max_hp(unit);
}
