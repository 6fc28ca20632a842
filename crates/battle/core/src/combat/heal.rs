//! Healing and revival.

use crate::state::Unit;
use crate::stats::max_hp;

/// Healing produced by an ability: `floor(power + MAG)`, at least 1.
///
/// A zero-power ability heals nothing.
pub fn healing_amount(power: u32, mag: i32) -> i32 {
    if power == 0 {
        return 0;
    }
    (power as i32 + mag).max(1)
}

/// Restores HP on a living unit, capped at max HP. Returns the HP gained.
///
/// KO'd units are left untouched; use [`revive`] for them.
pub fn apply_heal(unit: &mut Unit, amount: i32) -> i32 {
    if unit.is_ko() || amount <= 0 {
        return 0;
    }
    let max = max_hp(unit);
    let before = unit.current_hp;
    unit.current_hp = (before + amount).min(max);
    unit.current_hp - before
}

/// Brings a KO'd unit back at `floor(max HP × percent)`, at least 1.
///
/// Returns the new HP, or `None` if the unit was not KO'd.
pub fn revive(unit: &mut Unit, percent: f64) -> Option<i32> {
    if unit.is_alive() {
        return None;
    }
    let max = max_hp(unit);
    let hp = ((f64::from(max) * percent).floor() as i32).clamp(1, max);
    unit.current_hp = hp;
    Some(hp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Element;
    use crate::stats::Stats;

    fn cleric() -> Unit {
        Unit::new("mia", Element::Mercury, Stats::new(80, 30, 6, 6, 12, 8))
    }

    #[test]
    fn zero_power_heals_nothing() {
        assert_eq!(healing_amount(0, 50), 0);
        assert_eq!(healing_amount(10, 12), 22);
        assert_eq!(healing_amount(1, -20), 1);
    }

    #[test]
    fn heal_caps_at_max_hp() {
        let mut unit = cleric();
        unit.current_hp = 70;
        assert_eq!(apply_heal(&mut unit, 30), 10);
        assert_eq!(unit.current_hp, 80);
    }

    #[test]
    fn heal_skips_knocked_out_units() {
        let mut unit = cleric();
        unit.current_hp = 0;
        assert_eq!(apply_heal(&mut unit, 30), 0);
        assert!(unit.is_ko());
    }

    #[test]
    fn revive_sets_fraction_of_max() {
        let mut unit = cleric();
        unit.current_hp = 0;
        assert_eq!(revive(&mut unit, 0.5), Some(40));
        assert_eq!(revive(&mut unit, 0.5), None);

        unit.current_hp = 0;
        assert_eq!(revive(&mut unit, 0.0), Some(1));
    }
}
