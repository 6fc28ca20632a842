//! Both sides driven by the decision engine for whole battles.

mod common;

use battle_core::{
    AbilityDefinition, AbilityId, BattleCommand, BattleConfig, BattleEngine, BattleSetup,
    BattleState, DjinnDefinition, Element, SeededRng, Side, Stats, StatusEffect, Stream, Unit, ai,
};
use common::Content;

const ROUND_LIMIT: u32 = 60;

fn content() -> Content {
    Content::new()
        .ability(AbilityDefinition::psynergy("quake", Element::Venus, 18).with_cost(1))
        .ability(
            AbilityDefinition::psynergy("flare", Element::Mars, 14)
                .with_cost(2)
                .with_on_hit(StatusEffect::Burn { duration: 2 }, 0.5),
        )
        .ability(AbilityDefinition::healing("cure", 30).with_cost(1))
        .ability(AbilityDefinition::physical("rend", 12).with_hits(2))
        .ability(
            AbilityDefinition::debuff("weaken", Stats::new(0, 0, -4, -4, 0, 0))
                .with_cost(1),
        )
        .djinn(DjinnDefinition::new("flint", Element::Venus))
        .djinn(DjinnDefinition::new("forge", Element::Mars))
}

fn setup(seed: u32, content: &Content) -> BattleState {
    let isaac = Unit::new("isaac", Element::Venus, Stats::new(120, 20, 14, 9, 12, 9))
        .with_abilities(["quake", "cure"].map(AbilityId::from));
    let garet = Unit::new("garet", Element::Mars, Stats::new(140, 15, 16, 11, 9, 6))
        .with_abilities(["flare", "rend"].map(AbilityId::from));
    let ogre = Unit::new("ogre", Element::Neutral, Stats::new(260, 0, 15, 8, 6, 7))
        .with_abilities(["rend", "weaken"].map(AbilityId::from));
    let imp = Unit::new("imp", Element::Mercury, Stats::new(90, 0, 9, 6, 12, 12))
        .with_abilities([AbilityId::from("quake")]);

    BattleSetup::new("self_play", seed)
        .party([isaac, garet])
        .djinn("flint")
        .djinn("forge")
        .enemies([ogre, imp])
        .build(&content.env())
        .unwrap()
}

/// Plans one round for the party with the decision engine, keeping every
/// choice inside the remaining mana.
fn plan_party(engine: &BattleEngine<'_>, state: &BattleState) -> BattleState {
    let env = *engine.env();
    let mut rng = SeededRng::derive(state.seed ^ 0x5eed, state.round(), Stream::Decision);
    let mut state = state.clone();
    for id in state.living_ids(Side::Party) {
        let budget = state.mana.remaining;
        let action = ai::decide(&state, &id, &env, engine.config(), &mut rng, Some(budget))
            .expect("living party unit always has an action");
        state = engine
            .execute(&state, &BattleCommand::from(action))
            .expect("decided action is valid")
            .state;
    }
    state
}

fn run(seed: u32) -> BattleState {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);

    let mut state = setup(seed, &content);
    while !state.is_over() && state.round() <= ROUND_LIMIT {
        let planned = plan_party(&engine, &state);
        state = engine
            .execute_all(
                &planned,
                &[BattleCommand::commit(), BattleCommand::execute_round()],
            )
            .expect("round executes")
            .state;
        assert_bounds(&state);
    }
    state
}

fn assert_bounds(state: &BattleState) {
    assert!(state.mana.remaining <= state.mana.max);
    for unit in state.party.units.iter().chain(&state.enemies) {
        let max = state.effective_stats(&unit.id).unwrap().hp;
        assert!(
            (0..=max).contains(&unit.current_hp),
            "{} has {} / {} HP",
            unit.id,
            unit.current_hp,
            max
        );
    }
}

#[test]
fn self_play_battles_stay_in_bounds() {
    for seed in 1..=10 {
        let state = run(seed);
        assert!(state.round() >= 1, "seed {seed}");
    }
}

#[test]
fn self_play_is_reproducible() {
    for seed in [3, 12345, 987_654] {
        assert_eq!(run(seed), run(seed), "seed {seed}");
    }
}
