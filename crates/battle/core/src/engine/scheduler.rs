//! Turn order for the executing phase.

use std::cmp::Reverse;

use crate::state::{BattleState, QueuedAction, Side, UnitId};

/// Sort key: equipment priority, then speed, then side, then id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey {
    always_first: Reverse<bool>,
    speed: Reverse<i32>,
    side: Side,
    id: UnitId,
}

fn order_key(state: &BattleState, actor: &UnitId) -> Option<OrderKey> {
    let side = state.side_of(actor)?;
    let unit = state.unit(actor)?;
    let speed = state.effective_stats(actor)?.spd;
    Some(OrderKey {
        always_first: Reverse(unit.loadout.always_first()),
        speed: Reverse(speed),
        side,
        id: actor.clone(),
    })
}

/// Merges party and enemy actions into execution order.
///
/// Units with an "always first" item lead, then effective SPD descending
/// (enemies use a neutral context). Ties go to the party, then to the lower
/// id. Actions whose actor cannot be found are dropped.
pub fn turn_order(
    state: &BattleState,
    actions: impl IntoIterator<Item = QueuedAction>,
) -> Vec<QueuedAction> {
    let mut keyed: Vec<(OrderKey, QueuedAction)> = actions
        .into_iter()
        .filter_map(|action| order_key(state, &action.actor).map(|key| (key, action)))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, action)| action).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EquipmentDefinition, EquipmentFlags, EquipmentSlot};
    use crate::state::{Element, EncounterId, Team, Unit};
    use crate::stats::Stats;

    fn unit(id: &str, spd: i32) -> Unit {
        Unit::new(id, Element::Venus, Stats::new(50, 0, 10, 10, 10, spd))
    }

    fn state(party: Vec<Unit>, enemies: Vec<Unit>) -> BattleState {
        let mut team = Team::new();
        for member in party {
            team.add_unit(member).unwrap();
        }
        BattleState::new(EncounterId::from("test"), 1, team, enemies)
    }

    fn ids(order: &[QueuedAction]) -> Vec<&str> {
        order.iter().map(|a| a.actor.as_str()).collect()
    }

    #[test]
    fn faster_units_act_first() {
        let state = state(vec![unit("slow", 5)], vec![unit("fast", 9)]);
        let order = turn_order(
            &state,
            [
                QueuedAction::basic_attack("slow".into(), "fast".into()),
                QueuedAction::basic_attack("fast".into(), "slow".into()),
            ],
        );
        assert_eq!(ids(&order), ["fast", "slow"]);
    }

    #[test]
    fn speed_ties_favor_the_party() {
        let state = state(vec![unit("z_hero", 7)], vec![unit("a_slime", 7)]);
        let order = turn_order(
            &state,
            [
                QueuedAction::basic_attack("a_slime".into(), "z_hero".into()),
                QueuedAction::basic_attack("z_hero".into(), "a_slime".into()),
            ],
        );
        assert_eq!(ids(&order), ["z_hero", "a_slime"]);
    }

    #[test]
    fn always_first_beats_speed() {
        let boots = EquipmentDefinition::new("hermes_boots", EquipmentSlot::Boots, Stats::ZERO)
            .with_flags(EquipmentFlags::ALWAYS_FIRST);
        let state = state(
            vec![unit("hero", 1).with_equipment(boots)],
            vec![unit("slime", 99)],
        );
        let order = turn_order(
            &state,
            [
                QueuedAction::basic_attack("slime".into(), "hero".into()),
                QueuedAction::basic_attack("hero".into(), "slime".into()),
            ],
        );
        assert_eq!(ids(&order), ["hero", "slime"]);
    }
}
