//! Heuristic decision engine.
//!
//! Drives the opposing side every round and the party during self-play.
//! For each actor it enumerates usable abilities, scores them with
//! [`scoring::score`], picks the best (or one of the top two when they are
//! close), and chooses targets by the ability's hint. Failure to find any
//! scorable ability degrades to a basic attack instead of an error.

pub mod scoring;
pub mod targeting;

use crate::config::BattleConfig;
use crate::djinn::known_abilities;
use crate::env::{AbilityDefinition, BattleEnv, SeededRng};
use crate::state::{BattleState, QueuedAction, Side, UnitId};
use crate::targeting::candidates;

pub use targeting::choose_targets;

/// One scored option.
#[derive(Clone, Debug)]
struct Candidate<'a> {
    ability: &'a AbilityDefinition,
    targets: Vec<UnitId>,
    score: f64,
}

/// Chooses an action for `actor`.
///
/// `budget` caps the mana cost of considered abilities (party self-play);
/// enemies pass `None`. Returns `None` only when the actor is unknown, KO'd,
/// or has no living opponent to fall back on.
pub fn decide(
    state: &BattleState,
    actor: &UnitId,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    rng: &mut SeededRng,
    budget: Option<u32>,
) -> Option<QueuedAction> {
    let side = state.side_of(actor)?;
    let unit = state.unit(actor).filter(|unit| unit.is_alive())?;
    let actor_stats = state.effective_stats(actor)?;

    let mut options: Vec<Candidate<'_>> = Vec::new();
    for ability_id in known_abilities(unit, state.stat_context(side), env) {
        let Some(ability) = env.abilities().definition(&ability_id) else {
            tracing::warn!(actor = %actor, ability = %ability_id, "unknown ability skipped");
            continue;
        };
        if budget.is_some_and(|budget| u32::from(ability.mana_cost) > budget) {
            continue;
        }
        let targets = candidates(state, actor, ability);
        if targets.is_empty() {
            continue;
        }
        let score = scoring::score(state, &actor_stats, ability, &targets, config);
        tracing::debug!(actor = %actor, ability = %ability.id, score, "scored ability");
        options.push(Candidate {
            ability,
            targets,
            score,
        });
    }

    // Stable: equal scores keep enumeration order.
    options.sort_by(|a, b| b.score.total_cmp(&a.score));

    let chosen = match options.as_slice() {
        [] => None,
        [only] => Some(only),
        [first, second, ..] if first.score - second.score < config.decision_tie_window => {
            rng.pick(&options[..2])
        }
        [first, ..] => Some(first),
    };

    let Some(choice) = chosen else {
        tracing::debug!(actor = %actor, "no scorable ability, falling back to basic attack");
        return basic_attack(state, actor, side);
    };

    let targets = choose_targets(state, &actor_stats, choice.ability, &choice.targets, env, rng);
    if targets.is_empty() {
        tracing::warn!(actor = %actor, ability = %choice.ability.id, "no target chosen");
        return basic_attack(state, actor, side);
    }

    tracing::debug!(
        actor = %actor,
        ability = %choice.ability.id,
        score = choice.score,
        targets = targets.len(),
        "decision made"
    );
    Some(QueuedAction::ability(
        actor.clone(),
        choice.ability.id.clone(),
        targets,
        choice.ability.mana_cost,
    ))
}

fn basic_attack(state: &BattleState, actor: &UnitId, side: Side) -> Option<QueuedAction> {
    let target = state.living(side.opponent()).next()?;
    Some(QueuedAction::basic_attack(actor.clone(), target.id.clone()))
}

/// Generates an action for every living enemy, in roster order.
pub fn plan_enemy_actions(
    state: &BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    rng: &mut SeededRng,
) -> Vec<QueuedAction> {
    state
        .living_ids(Side::Enemy)
        .iter()
        .filter_map(|id| decide(state, id, env, config, rng, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::{AbilityOracle, DjinnDefinition, DjinnOracle};
    use crate::state::{AbilityId, DjinnId, Element, EncounterId, Team, Unit};
    use crate::stats::Stats;

    #[derive(Default)]
    struct Fixture {
        abilities: HashMap<AbilityId, AbilityDefinition>,
    }

    impl Fixture {
        fn with(mut self, ability: AbilityDefinition) -> Self {
            self.abilities.insert(ability.id.clone(), ability);
            self
        }
    }

    impl AbilityOracle for Fixture {
        fn definition(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
            self.abilities.get(id)
        }
    }

    impl DjinnOracle for Fixture {
        fn definition(&self, _id: &DjinnId) -> Option<&DjinnDefinition> {
            None
        }
    }

    fn battle(enemy_abilities: &[&str]) -> BattleState {
        let mut party = Team::new();
        party
            .add_unit(Unit::new("isaac", Element::Venus, Stats::new(100, 20, 10, 5, 8, 7)))
            .unwrap();
        party
            .add_unit(Unit::new("garet", Element::Mars, Stats::new(120, 10, 14, 9, 5, 6)))
            .unwrap();
        let enemy = Unit::new("golem", Element::Venus, Stats::new(200, 20, 16, 12, 10, 4))
            .with_abilities(enemy_abilities.iter().map(|id| AbilityId::from(*id)));
        BattleState::new(EncounterId::from("ruins"), 77, party, vec![enemy])
    }

    #[test]
    fn no_abilities_falls_back_to_basic_attack() {
        let fixture = Fixture::default();
        let env = BattleEnv::new(&fixture, &fixture);
        let state = battle(&[]);
        let action = decide(
            &state,
            &UnitId::from("golem"),
            &env,
            &BattleConfig::default(),
            &mut SeededRng::new(1),
            None,
        )
        .unwrap();
        assert!(action.is_basic_attack());
        assert_eq!(action.targets, vec![UnitId::from("isaac")]);
    }

    #[test]
    fn clear_winner_is_always_chosen() {
        let fixture = Fixture::default()
            .with(AbilityDefinition::physical("tap", 1))
            .with(AbilityDefinition::physical("crush", 80));
        let env = BattleEnv::new(&fixture, &fixture);
        let state = battle(&["tap", "crush"]);

        for seed in 1..30 {
            let action = decide(
                &state,
                &UnitId::from("golem"),
                &env,
                &BattleConfig::default(),
                &mut SeededRng::new(seed),
                None,
            )
            .unwrap();
            assert_eq!(action.ability, Some(AbilityId::from("crush")));
        }
    }

    #[test]
    fn close_scores_are_split_by_the_generator() {
        let fixture = Fixture::default()
            .with(AbilityDefinition::physical("jab", 10))
            .with(AbilityDefinition::physical("hook", 11));
        let env = BattleEnv::new(&fixture, &fixture);
        let state = battle(&["jab", "hook"]);

        let mut seen = std::collections::BTreeSet::new();
        for seed in 1..200 {
            let action = decide(
                &state,
                &UnitId::from("golem"),
                &env,
                &BattleConfig::default(),
                &mut SeededRng::new(seed),
                None,
            )
            .unwrap();
            seen.insert(action.ability.unwrap().to_string());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn budget_filters_expensive_abilities() {
        let fixture = Fixture::default()
            .with(AbilityDefinition::psynergy("ragnarok", Element::Venus, 90).with_cost(4));
        let env = BattleEnv::new(&fixture, &fixture);
        let mut state = battle(&[]);
        state.party.units[0].abilities.push(AbilityId::from("ragnarok"));

        let action = decide(
            &state,
            &UnitId::from("isaac"),
            &env,
            &BattleConfig::default(),
            &mut SeededRng::new(4),
            Some(2),
        )
        .unwrap();
        assert!(action.is_basic_attack());
        assert_eq!(action.targets, vec![UnitId::from("golem")]);
    }

    #[test]
    fn enemy_plan_covers_living_enemies() {
        let fixture = Fixture::default();
        let env = BattleEnv::new(&fixture, &fixture);
        let state = battle(&[]);
        let config = BattleConfig::default();
        let plan = plan_enemy_actions(&state, &env, &config, &mut SeededRng::new(2));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].actor, UnitId::from("golem"));
    }
}
