mod common;

use battle_core::stats::effective_stats;
use battle_core::{
    BattleCommand, BattleConfig, BattleEngine, BattleEvent, BattleSetup, CommandError,
    DjinnDefinition, DjinnId, DjinnState, Element, Stats, UnitId,
};
use common::{Content, adept, dummy, play_round};

fn content() -> Content {
    Content::new()
        .djinn(DjinnDefinition::new("flint", Element::Venus))
        .djinn(DjinnDefinition::new("gust", Element::Jupiter))
}

#[test]
fn two_djinn_recover_after_three_rounds() {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);
    let flint = DjinnId::from("flint");
    let gust = DjinnId::from("gust");

    let state = BattleSetup::new("peak", 12345)
        .party_unit(adept("isaac", 10))
        .djinn("flint")
        .djinn("gust")
        .enemy(dummy("titan", 5000, 10, 5))
        .build(&content.env())
        .unwrap();

    let round1 = play_round(
        &engine,
        &state,
        [
            BattleCommand::djinn([flint.clone(), gust.clone()]),
            BattleCommand::basic_attack("isaac", "titan"),
        ],
    );
    assert!(round1.events.iter().any(|event| matches!(
        event,
        BattleEvent::Summon { damage: 150, targets, .. } if targets.len() == 1
    )));
    let state = round1.state;
    assert_eq!(state.party.djinn_state(&flint), Some(DjinnState::Standby));
    assert_eq!(state.djinn_recovery.get(&gust), Some(&2));
    assert_eq!(state.enemies[0].current_hp, 5000 - 150 - hits(&round1.events));

    let err = engine
        .execute(&state, &BattleCommand::djinn([flint.clone()]))
        .unwrap_err();
    assert_eq!(
        err.command_error(),
        Some(&CommandError::DjinnNotSet(flint.clone()))
    );

    let round2 = play_round(&engine, &state, [BattleCommand::basic_attack("isaac", "titan")]);
    let state = round2.state;
    assert_eq!(state.party.djinn_state(&flint), Some(DjinnState::Standby));
    assert_eq!(state.djinn_recovery.get(&flint), Some(&1));

    let round3 = play_round(&engine, &state, [BattleCommand::basic_attack("isaac", "titan")]);
    let state = round3.state;
    assert_eq!(state.party.djinn_state(&flint), Some(DjinnState::Set));
    assert_eq!(state.party.djinn_state(&gust), Some(DjinnState::Set));
    assert!(state.djinn_recovery.is_empty());
    let recovered = round3
        .events
        .iter()
        .filter(|event| matches!(event, BattleEvent::DjinnRecovered { .. }))
        .count();
    assert_eq!(recovered, 2);

    // Set again, so they can be activated once more.
    assert!(engine
        .execute(&state, &BattleCommand::djinn([flint, gust]))
        .is_ok());
}

#[test]
fn djinn_bonuses_leave_with_standby_and_return_on_recovery() {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);
    let isaac = UnitId::from("isaac");

    let state = BattleSetup::new("peak", 77)
        .party_unit(adept("isaac", 10))
        .djinn("flint")
        .djinn("gust")
        .enemy(dummy("titan", 5000, 10, 5))
        .build(&content.env())
        .unwrap();
    let bare = effective_stats(&state.party.units[0], None);
    // Same-element flint +4/+3, counter gust -3/-2, split synergy +1 across the board.
    let set = state.effective_stats(&isaac).unwrap();
    assert_eq!(set, bare + Stats::new(0, 0, 2, 2, 1, 1));

    let round1 = play_round(
        &engine,
        &state,
        [
            BattleCommand::djinn([DjinnId::from("flint"), DjinnId::from("gust")]),
            BattleCommand::basic_attack("isaac", "titan"),
        ],
    );
    assert_eq!(round1.state.effective_stats(&isaac), Some(bare));

    let round2 = play_round(
        &engine,
        &round1.state,
        [BattleCommand::basic_attack("isaac", "titan")],
    );
    assert_eq!(round2.state.effective_stats(&isaac), Some(bare));

    let round3 = play_round(
        &engine,
        &round2.state,
        [BattleCommand::basic_attack("isaac", "titan")],
    );
    assert_eq!(round3.state.effective_stats(&isaac), Some(set));
}

#[test]
fn duplicate_djinn_in_one_request_count_once() {
    let content = content();
    let config = BattleConfig::new();
    let engine = BattleEngine::new(content.env(), &config);
    let flint = DjinnId::from("flint");

    let state = BattleSetup::new("peak", 1)
        .party_unit(adept("isaac", 10))
        .djinn("flint")
        .enemy(dummy("titan", 5000, 10, 5))
        .build(&content.env())
        .unwrap();

    let queued = engine
        .execute(
            &state,
            &BattleCommand::djinn([flint.clone(), flint.clone(), flint.clone(), flint.clone()]),
        )
        .unwrap()
        .state;
    assert_eq!(queued.queue.djinn.as_slice(), &[flint]);
}

#[test]
fn unequipped_djinn_cannot_be_queued() {
    let content = content();
    let config = BattleConfig::new();
    let engine = BattleEngine::new(content.env(), &config);

    let state = BattleSetup::new("peak", 1)
        .party_unit(adept("isaac", 10))
        .djinn("flint")
        .enemy(dummy("titan", 5000, 10, 5))
        .build(&content.env())
        .unwrap();

    let err = engine
        .execute(&state, &BattleCommand::djinn([DjinnId::from("gust")]))
        .unwrap_err();
    assert_eq!(
        err.command_error(),
        Some(&CommandError::DjinnNotEquipped("gust".into()))
    );
}

fn hits(events: &[BattleEvent]) -> i32 {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::Hit {
                source: Some(_),
                target,
                amount,
                ..
            } if target.as_str() == "titan" => Some(*amount as i32),
            _ => None,
        })
        .sum()
}
