//! Hint-driven target selection.

use crate::ai::scoring::estimated_value;
use crate::env::{AbilityDefinition, AbilityKind, BattleEnv, SeededRng, TargetHint, TargetSide};
use crate::state::{BattleState, Unit, UnitId};
use crate::stats::{Stats, max_hp};

/// Overkill beyond this fraction of the target's HP counts as wasted.
const OVERKILL_LIMIT: f64 = 0.5;

/// Picks targets for `ability` out of `candidates`.
///
/// Area and self abilities take every candidate. Single-target support
/// abilities pick the ally with the largest need. Single-target offensive
/// abilities follow the ability's [`TargetHint`].
pub fn choose_targets(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    candidates: &[UnitId],
    env: &BattleEnv<'_>,
    rng: &mut SeededRng,
) -> Vec<UnitId> {
    if candidates.is_empty() {
        return Vec::new();
    }
    if ability.is_area() || candidates.len() == 1 {
        return candidates.to_vec();
    }

    let units: Vec<&Unit> = candidates.iter().filter_map(|id| state.unit(id)).collect();
    let picked = match ability.side() {
        TargetSide::Ally => neediest(&units, ability),
        TargetSide::Enemy => match ability.ai.target {
            TargetHint::Weakest => weakest(state, actor_stats, ability, &units),
            TargetHint::LowestRes => lowest_resistance(ability, &units),
            TargetHint::HealerFirst => healer_first(state, actor_stats, ability, &units, env),
            TargetHint::Random => rng.pick(&units).copied(),
            TargetHint::HighestDef => highest_def(state, &units),
        },
    };
    picked
        .or_else(|| units.first().copied())
        .map(|unit| vec![unit.id.clone()])
        .unwrap_or_default()
}

/// Fraction of `element` damage the unit shrugs off from armor and statuses.
fn resistance(unit: &Unit, ability: &AbilityDefinition) -> f64 {
    (unit.loadout.resistance(ability.element) + unit.statuses.elemental_resistance(ability.element))
        .clamp(0.0, 0.95)
}

fn neediest<'a>(units: &[&'a Unit], ability: &AbilityDefinition) -> Option<&'a Unit> {
    if ability.revive {
        if let Some(fallen) = units.iter().copied().find(|unit| unit.is_ko()) {
            return Some(fallen);
        }
    }
    if ability.kind != AbilityKind::Healing {
        return units.iter().copied().find(|unit| unit.is_alive());
    }
    units
        .iter()
        .copied()
        .filter(|unit| unit.is_alive())
        .max_by_key(|unit| max_hp(unit) - unit.current_hp)
}

/// Lowest HP after scaling up by elemental resistance.
fn weakest<'a>(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    units: &[&'a Unit],
) -> Option<&'a Unit> {
    let effective_hp = |unit: &Unit| f64::from(unit.current_hp) / (1.0 - resistance(unit, ability));

    let mut pool: Vec<&'a Unit> = units.to_vec();
    if ability.ai.avoid_overkill {
        let trimmed: Vec<&'a Unit> = units
            .iter()
            .copied()
            .filter(|unit| {
                let damage =
                    estimated_value(state, actor_stats, ability, std::slice::from_ref(&unit.id));
                let hp = f64::from(unit.current_hp);
                damage - hp <= hp * OVERKILL_LIMIT
            })
            .collect();
        if !trimmed.is_empty() {
            pool = trimmed;
        }
    }
    min_by_f64(&pool, effective_hp)
}

fn lowest_resistance<'a>(ability: &AbilityDefinition, units: &[&'a Unit]) -> Option<&'a Unit> {
    min_by_f64(units, |unit| resistance(unit, ability))
}

fn healer_first<'a>(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    units: &[&'a Unit],
    env: &BattleEnv<'_>,
) -> Option<&'a Unit> {
    let healers: Vec<&'a Unit> = units
        .iter()
        .copied()
        .filter(|unit| {
            unit.abilities.iter().any(|id| {
                env.abilities()
                    .definition(id)
                    .is_some_and(|def| def.kind == AbilityKind::Healing)
            })
        })
        .collect();
    if healers.is_empty() {
        weakest(state, actor_stats, ability, units)
    } else {
        weakest(state, actor_stats, ability, &healers)
    }
}

fn highest_def<'a>(state: &BattleState, units: &[&'a Unit]) -> Option<&'a Unit> {
    min_by_f64(units, |unit| {
        -state
            .effective_stats(&unit.id)
            .map(|stats| f64::from(stats.def))
            .unwrap_or_default()
    })
}

/// First unit with the smallest key; earlier roster slots win ties.
fn min_by_f64<'a>(units: &[&'a Unit], key: impl Fn(&Unit) -> f64) -> Option<&'a Unit> {
    let mut best: Option<(&'a Unit, f64)> = None;
    for &unit in units {
        let value = key(unit);
        if best.is_none_or(|(_, current)| value < current) {
            best = Some((unit, value));
        }
    }
    best.map(|(unit, _)| unit)
}
