//! Set → Standby → Set transitions and summons.

use crate::combat::{DamageKind, mitigate, strike};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, SeededRng};
use crate::state::{BattleEvent, BattleState, DjinnId, DjinnState, Element, Side, UnitId};
use crate::stats::clamp_hp;
use crate::status::inflict;

/// Activates the given Set Djinn and fires their summon.
///
/// All `ids` move to Standby with a recovery timer of `ids.len() + 1`
/// rounds. Summon damage comes from the leading Djinn's override or the
/// count table; three Djinn strike every living enemy, fewer strike one
/// random living enemy. Callers validate that each id is equipped and Set.
pub fn activate(
    state: &mut BattleState,
    ids: &[DjinnId],
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    rng: &mut SeededRng,
) {
    let Some(lead) = ids.first() else {
        return;
    };
    let count = ids.len();
    let recovery = count as u32 + 1;
    let round = state.round();

    for id in ids {
        if let Some(tracker) = state.party.trackers.get_mut(id) {
            tracker.state = DjinnState::Standby;
            tracker.last_activated_round = Some(round);
        }
        state.djinn_recovery.insert(id.clone(), recovery);
        state.push_event(BattleEvent::DjinnStandby {
            djinn: id.clone(),
            recovery,
        });
    }
    tracing::debug!(count, recovery, round, "djinn activated");

    let lead_definition = env.djinn().definition(lead);
    let damage = lead_definition
        .and_then(|definition| definition.summon.damage)
        .unwrap_or_else(|| config.summon_damage_for(count));
    let element = state
        .party
        .equipped_djinn
        .iter()
        .find(|djinn| &djinn.id == lead)
        .map(|djinn| djinn.element)
        .unwrap_or(Element::Neutral);

    let living = state.living_ids(Side::Enemy);
    let targets: Vec<UnitId> = if count >= BattleConfig::MAX_EQUIPPED_DJINN {
        living
    } else {
        rng.pick(&living).cloned().into_iter().collect()
    };

    state.push_event(BattleEvent::Summon {
        djinn: ids.to_vec(),
        damage,
        targets: targets.clone(),
    });

    let statuses: Vec<_> = ids
        .iter()
        .filter_map(|id| env.djinn().definition(id))
        .filter_map(|definition| definition.summon.status.clone())
        .collect();

    for target in &targets {
        let Some(unit) = state.unit(target) else {
            continue;
        };
        let amount = mitigate(f64::from(damage), DamageKind::Summon, element, unit);
        strike(state, None, target, amount, element);

        for status in &statuses {
            if inflict(state, target, status.clone()).is_none() {
                break;
            }
        }
    }

    clamp_party_hp(state);
}

/// Advances every recovery timer by one round.
///
/// Djinn whose timer reaches zero return to Set. Party HP is clamped to the
/// recomputed maximums afterwards.
pub fn recover(state: &mut BattleState) {
    let mut recovered = Vec::new();
    for (id, timer) in state.djinn_recovery.iter_mut() {
        *timer = timer.saturating_sub(1);
        if *timer == 0 {
            recovered.push(id.clone());
        }
    }

    for id in recovered {
        state.djinn_recovery.remove(&id);
        if let Some(tracker) = state.party.trackers.get_mut(&id) {
            tracker.state = DjinnState::Set;
        }
        tracing::debug!(djinn = %id, "djinn recovered");
        state.push_event(BattleEvent::DjinnRecovered { djinn: id });
    }

    clamp_party_hp(state);
}

fn clamp_party_hp(state: &mut BattleState) {
    for unit in state.party.units.iter_mut() {
        clamp_hp(unit);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::{AbilityDefinition, AbilityOracle, DjinnDefinition, DjinnOracle};
    use crate::state::{AbilityId, EncounterId, StatusEffect, StatusKind, Team, Unit};
    use crate::stats::Stats;

    struct Fixture {
        djinn: HashMap<DjinnId, DjinnDefinition>,
    }

    impl AbilityOracle for Fixture {
        fn definition(&self, _id: &AbilityId) -> Option<&AbilityDefinition> {
            None
        }
    }

    impl DjinnOracle for Fixture {
        fn definition(&self, id: &DjinnId) -> Option<&DjinnDefinition> {
            self.djinn.get(id)
        }
    }

    fn fixture() -> Fixture {
        let mut sleet = DjinnDefinition::new("sleet", Element::Jupiter);
        sleet.summon.status = Some(StatusEffect::Stun { duration: 1 });
        let djinn = [
            DjinnDefinition::new("flint", Element::Venus),
            DjinnDefinition::new("gust", Element::Jupiter),
            DjinnDefinition::new("forge", Element::Mars).with_summon_damage(500),
            sleet,
        ];
        Fixture {
            djinn: djinn.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    fn battle(djinn: &[(&str, Element)]) -> BattleState {
        let mut party = Team::new();
        party
            .add_unit(Unit::new("isaac", Element::Venus, Stats::new(100, 20, 10, 5, 8, 7)))
            .unwrap();
        for (id, element) in djinn {
            party.equip_djinn(DjinnId::from(*id), *element).unwrap();
        }
        let enemies = vec![
            Unit::new("slime_a", Element::Mercury, Stats::new(400, 0, 8, 10, 4, 5)),
            Unit::new("slime_b", Element::Mercury, Stats::new(400, 0, 8, 10, 4, 5)),
        ];
        BattleState::new(EncounterId::from("test"), 1, party, enemies)
    }

    #[test]
    fn two_djinn_recover_after_three_rounds() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let mut state = battle(&[("flint", Element::Venus), ("gust", Element::Jupiter)]);
        let ids = [DjinnId::from("flint"), DjinnId::from("gust")];

        activate(&mut state, &ids, &env, &BattleConfig::default(), &mut SeededRng::new(9));
        assert_eq!(state.djinn_recovery.get(&ids[0]), Some(&3));
        assert_eq!(state.party.djinn_state(&ids[1]), Some(DjinnState::Standby));

        recover(&mut state);
        recover(&mut state);
        assert_eq!(state.party.djinn_state(&ids[0]), Some(DjinnState::Standby));
        recover(&mut state);
        assert_eq!(state.party.djinn_state(&ids[0]), Some(DjinnState::Set));
        assert_eq!(state.party.djinn_state(&ids[1]), Some(DjinnState::Set));
        assert!(state.djinn_recovery.is_empty());
    }

    #[test]
    fn single_summon_hits_one_enemy_for_table_damage() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let mut state = battle(&[("flint", Element::Venus)]);

        activate(
            &mut state,
            &[DjinnId::from("flint")],
            &env,
            &BattleConfig::default(),
            &mut SeededRng::new(9),
        );
        let damaged: Vec<_> = state.enemies.iter().filter(|u| u.current_hp < 400).collect();
        assert_eq!(damaged.len(), 1);
        assert_eq!(damaged[0].current_hp, 320);
    }

    #[test]
    fn three_djinn_hit_everyone_with_lead_override() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let mut state = battle(&[
            ("forge", Element::Mars),
            ("flint", Element::Venus),
            ("sleet", Element::Jupiter),
        ]);
        let ids = [
            DjinnId::from("forge"),
            DjinnId::from("flint"),
            DjinnId::from("sleet"),
        ];

        activate(&mut state, &ids, &env, &BattleConfig::default(), &mut SeededRng::new(9));
        assert!(state.enemies.iter().all(|u| u.is_ko()));
        assert_eq!(state.djinn_recovery.get(&ids[2]), Some(&4));
        assert!(
            !state
                .log
                .iter()
                .any(|e| matches!(e, BattleEvent::StatusApplied { status: StatusKind::Stun, .. }))
        );
    }
}
