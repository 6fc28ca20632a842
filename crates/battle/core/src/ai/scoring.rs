//! Ability scoring.
//!
//! ```text
//! score = priority (default 1.0) + 0.1 × estimated value [+ opener bonus in round 1]
//! ```
//!
//! Estimated value is a rough projection, not a simulation: damage uses the
//! average target DEF and element modifier, healing is capped by missing HP,
//! buffs and debuffs count their summed absolute deltas twice.

use crate::combat::{element_modifier, healing_amount};
use crate::config::BattleConfig;
use crate::env::{AbilityDefinition, AbilityKind};
use crate::state::{BattleState, UnitId};
use crate::stats::{Stats, max_hp};

/// Weight of estimated value relative to the priority hint.
const VALUE_WEIGHT: f64 = 0.1;

/// Multiplier applied to summed buff/debuff deltas.
const UTILITY_WEIGHT: f64 = 2.0;

/// Scores one ability for `actor` against its candidate targets.
pub fn score(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    candidates: &[UnitId],
    config: &BattleConfig,
) -> f64 {
    let priority = ability.ai.priority.unwrap_or(1.0);
    let opener = if ability.ai.opener && state.round() == 1 {
        config.opener_bonus
    } else {
        0.0
    };
    priority + VALUE_WEIGHT * estimated_value(state, actor_stats, ability, candidates) + opener
}

/// Projected value of using `ability` on its candidates.
pub fn estimated_value(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    candidates: &[UnitId],
) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let reach = if ability.is_area() {
        candidates.len() as f64
    } else {
        1.0
    };

    match ability.kind {
        AbilityKind::Physical | AbilityKind::Psynergy | AbilityKind::Summon => {
            damage_estimate(state, actor_stats, ability, candidates) * reach
        }
        AbilityKind::Healing => healing_estimate(state, actor_stats, ability, candidates),
        AbilityKind::Buff | AbilityKind::Debuff => {
            f64::from(ability.modifier.magnitude()) * UTILITY_WEIGHT
        }
    }
}

fn damage_estimate(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    candidates: &[UnitId],
) -> f64 {
    let count = candidates.len() as f64;
    let avg_def = candidates
        .iter()
        .filter_map(|id| state.effective_stats(id))
        .map(|stats| f64::from(stats.def))
        .sum::<f64>()
        / count;
    let avg_modifier = candidates
        .iter()
        .filter_map(|id| state.unit(id))
        .map(|unit| element_modifier(ability.element, unit.element))
        .sum::<f64>()
        / count;
    let ignore = 1.0 - ability.ignore_def_percent.clamp(0.0, 1.0);
    let power = f64::from(ability.base_power);

    let per_hit = match ability.kind {
        AbilityKind::Physical => {
            let power = if ability.base_power == 0 {
                f64::from(actor_stats.atk)
            } else {
                power
            };
            power + f64::from(actor_stats.atk) - avg_def * ignore * 0.5
        }
        AbilityKind::Psynergy => {
            (power + f64::from(actor_stats.mag) - avg_def * ignore * 0.3) * avg_modifier
        }
        _ => power,
    };
    per_hit.max(1.0) * f64::from(ability.hits.max(1))
}

fn healing_estimate(
    state: &BattleState,
    actor_stats: &Stats,
    ability: &AbilityDefinition,
    candidates: &[UnitId],
) -> f64 {
    let amount = healing_amount(ability.base_power, actor_stats.mag);
    let per_target: Vec<f64> = candidates
        .iter()
        .filter_map(|id| state.unit(id))
        .map(|unit| {
            let max = max_hp(unit);
            if unit.is_ko() {
                if ability.revive {
                    (f64::from(max) * ability.revive_percent).floor().max(1.0)
                } else {
                    0.0
                }
            } else {
                f64::from(amount.min(max - unit.current_hp).max(0))
            }
        })
        .collect();

    if ability.is_area() {
        per_target.iter().sum()
    } else {
        per_target.into_iter().fold(0.0, f64::max)
    }
}
