//! Damage formulas, mitigation and application.

use crate::combat::element_modifier;
use crate::state::{Element, Mitigation, StatusEffect, StatusKind, Unit};
use crate::stats::{Stats, max_hp};

/// Which formula produced a raw damage value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    Physical,
    Psynergy,
    /// Fixed damage from a Djinn summon.
    Summon,
}

/// What happened when damage reached a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Blocked(Mitigation),
    Dealt {
        /// HP actually removed (never more than the HP the unit had).
        amount: i32,
        knocked_out: bool,
        /// HP restored by an auto-revive that fired on this hit.
        revived: Option<i32>,
    },
}

impl DamageOutcome {
    pub fn amount(&self) -> i32 {
        match self {
            DamageOutcome::Blocked(_) => 0,
            DamageOutcome::Dealt { amount, .. } => *amount,
        }
    }
}

/// Physical formula.
///
/// ```text
/// floor(max(1, power + ATK − DEF × (1 − ignore_def) × 0.5))
/// ```
///
/// A zero `power` (basic attack) uses the attacker's ATK as power.
pub fn physical_damage(power: u32, attacker: &Stats, defender: &Stats, ignore_def: f64) -> i32 {
    let power = if power == 0 {
        f64::from(attacker.atk)
    } else {
        f64::from(power)
    };
    let defense = f64::from(defender.def) * (1.0 - ignore_def.clamp(0.0, 1.0)) * 0.5;
    (power + f64::from(attacker.atk) - defense).max(1.0).floor() as i32
}

/// Psynergy formula, including the element modifier and armor resistance.
///
/// ```text
/// floor(max(1, (power + MAG − DEF × (1 − ignore_def) × 0.3) × element_mod))
///     × (1 − armor resist)
/// ```
///
/// The armor step is left fractional; [`mitigate`] floors the final value.
pub fn psynergy_damage(
    power: u32,
    element: Element,
    attacker: &Stats,
    defender: &Unit,
    defender_stats: &Stats,
    ignore_def: f64,
) -> f64 {
    let defense = f64::from(defender_stats.def) * (1.0 - ignore_def.clamp(0.0, 1.0)) * 0.3;
    let base = f64::from(power) + f64::from(attacker.mag) - defense;
    let scaled = (base * element_modifier(element, defender.element))
        .max(1.0)
        .floor();
    let armor = defender.loadout.resistance(element).clamp(0.0, 1.0);
    scaled * (1.0 - armor)
}

/// Applies status-based mitigation to a raw value and floors it.
///
/// Elemental-resistance statuses apply to psynergy only. Damage reduction
/// applies to everything. The result is always at least 1.
pub fn mitigate(raw: f64, kind: DamageKind, element: Element, target: &Unit) -> i32 {
    let mut value = raw;
    if kind == DamageKind::Psynergy {
        let resist = target.statuses.elemental_resistance(element).clamp(0.0, 1.0);
        value *= 1.0 - resist;
    }
    value *= 1.0 - target.statuses.damage_reduction();
    (value.floor() as i32).max(1)
}

/// Applies a damaging hit.
///
/// Invulnerability blocks without touching shields. Otherwise the first
/// shield loses a charge and blocks. Otherwise HP drops, clamped to
/// `[0, max]`, and a KO triggers the first auto-revive with uses left.
pub fn apply_damage(unit: &mut Unit, amount: i32) -> DamageOutcome {
    if unit.statuses.has(StatusKind::Invulnerable) {
        return DamageOutcome::Blocked(Mitigation::Invulnerable);
    }

    let shield = unit.statuses.iter_mut().find_map(|effect| match effect {
        StatusEffect::Shield { charges } if *charges > 0 => Some(charges),
        _ => None,
    });
    if let Some(charges) = shield {
        *charges -= 1;
        unit.statuses
            .drain_where(|e| e.kind() == StatusKind::Shield && e.is_expired());
        return DamageOutcome::Blocked(Mitigation::Shield);
    }

    let max = max_hp(unit);
    let before = unit.current_hp;
    unit.current_hp = (before - amount.max(0)).clamp(0, max);
    let dealt = before - unit.current_hp;

    let knocked_out = unit.is_ko();
    let revived = if knocked_out {
        try_auto_revive(unit)
    } else {
        None
    };

    DamageOutcome::Dealt {
        amount: dealt,
        knocked_out,
        revived,
    }
}

/// Fires the first auto-revive with uses left on a KO'd unit.
///
/// The unit returns at `floor(max HP × hp_percent)`, at least 1, and the
/// effect loses one use. Returns the restored HP.
pub fn try_auto_revive(unit: &mut Unit) -> Option<i32> {
    if unit.is_alive() {
        return None;
    }
    let percent = unit.statuses.iter().find_map(|effect| match effect {
        StatusEffect::AutoRevive { hp_percent, uses } if *uses > 0 => Some(*hp_percent),
        _ => None,
    })?;

    let max = max_hp(unit);
    let hp = ((f64::from(max) * percent).floor() as i32).clamp(1, max);
    unit.current_hp = hp;

    if let Some(uses) = unit.statuses.iter_mut().find_map(|effect| match effect {
        StatusEffect::AutoRevive { uses, .. } if *uses > 0 => Some(uses),
        _ => None,
    }) {
        *uses -= 1;
    }
    unit.statuses
        .drain_where(|e| e.kind() == StatusKind::AutoRevive && e.is_expired());
    Some(hp)
}
