//! Event-emitting wrappers that apply combat results to a [`BattleState`].

use crate::combat::{DamageOutcome, apply_damage, apply_heal};
use crate::state::{BattleEvent, BattleState, Element, UnitId};

/// Lands `amount` damage on `target` and records the outcome.
///
/// Updates the per-battle counters of both sides and emits `Hit`,
/// `HitBlocked`, `Ko` and `Revived` events as appropriate. Unknown or
/// already KO'd targets are ignored.
pub fn strike(
    state: &mut BattleState,
    source: Option<&UnitId>,
    target: &UnitId,
    amount: i32,
    element: Element,
) -> Option<DamageOutcome> {
    let unit = state.unit_mut(target).filter(|unit| unit.is_alive())?;
    let outcome = apply_damage(unit, amount);
    if let DamageOutcome::Dealt { amount, .. } = outcome {
        unit.counters.damage_taken += amount as u32;
    }

    match outcome {
        DamageOutcome::Blocked(by) => state.push_event(BattleEvent::HitBlocked {
            target: target.clone(),
            by,
        }),
        DamageOutcome::Dealt {
            amount,
            knocked_out,
            revived,
        } => {
            state.push_event(BattleEvent::Hit {
                source: source.cloned(),
                target: target.clone(),
                amount: amount as u32,
                element,
            });
            if let Some(attacker) = source.and_then(|id| state.unit_mut(id)) {
                attacker.counters.damage_dealt += amount as u32;
                if knocked_out {
                    attacker.counters.knockouts += 1;
                }
            }
            if knocked_out {
                state.push_event(BattleEvent::Ko {
                    unit: target.clone(),
                });
            }
            if let Some(hp) = revived {
                state.push_event(BattleEvent::Revived {
                    unit: target.clone(),
                    hp: hp as u32,
                });
            }
        }
    }
    Some(outcome)
}

/// Heals a living unit and records a `Heal` event when any HP was restored.
pub fn mend(state: &mut BattleState, target: &UnitId, amount: i32) -> i32 {
    let Some(unit) = state.unit_mut(target) else {
        return 0;
    };
    let healed = apply_heal(unit, amount);
    if healed > 0 {
        state.push_event(BattleEvent::Heal {
            target: target.clone(),
            amount: healed as u32,
        });
    }
    healed
}
