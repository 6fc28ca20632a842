#![allow(dead_code)]

use std::collections::HashMap;

use battle_core::{
    AbilityDefinition, AbilityId, AbilityOracle, BattleCommand, BattleEngine, BattleEnv,
    BattleState, DjinnDefinition, DjinnId, DjinnOracle, Element, ExecutionOutcome, Stats, Unit,
};

/// In-memory content used by the integration tests.
#[derive(Default)]
pub struct Content {
    abilities: HashMap<AbilityId, AbilityDefinition>,
    djinn: HashMap<DjinnId, DjinnDefinition>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ability(mut self, ability: AbilityDefinition) -> Self {
        self.abilities.insert(ability.id.clone(), ability);
        self
    }

    pub fn djinn(mut self, djinn: DjinnDefinition) -> Self {
        self.djinn.insert(djinn.id.clone(), djinn);
        self
    }

    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(self, self)
    }
}

impl AbilityOracle for Content {
    fn definition(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }
}

impl DjinnOracle for Content {
    fn definition(&self, id: &DjinnId) -> Option<&DjinnDefinition> {
        self.djinn.get(id)
    }
}

/// Venus adept with 100 HP, ATK/DEF 10 and the given speed.
pub fn adept(id: &str, spd: i32) -> Unit {
    Unit::new(id, Element::Venus, Stats::new(100, 10, 10, 10, 10, spd))
}

/// Neutral punching bag: ATK 1 so it barely scratches the party.
pub fn dummy(id: &str, hp: i32, def: i32, spd: i32) -> Unit {
    Unit::new(id, Element::Neutral, Stats::new(hp, 0, 1, def, 1, spd))
}

/// Queues `plan`, commits and executes one round.
pub fn play_round(
    engine: &BattleEngine<'_>,
    state: &BattleState,
    plan: impl IntoIterator<Item = BattleCommand>,
) -> ExecutionOutcome {
    let mut commands: Vec<BattleCommand> = plan.into_iter().collect();
    commands.push(BattleCommand::commit());
    commands.push(BattleCommand::execute_round());
    engine
        .execute_all(state, &commands)
        .expect("round should execute")
}
