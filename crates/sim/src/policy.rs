//! Party policies: what the party queues each round.

use battle_core::{
    BattleCommand, BattleEngine, BattleState, DjinnId, DjinnState, SeededRng, Side, Stream, ai,
};

use crate::error::SimError;

/// Decides the party's plan for one round.
pub trait Policy {
    /// Short name recorded in transcripts and reports.
    fn name(&self) -> &'static str;

    /// Planning commands for the current round, in queue order.
    ///
    /// The simulator appends the commit and execute commands itself.
    fn plan_round(
        &mut self,
        engine: &BattleEngine<'_>,
        state: &BattleState,
    ) -> Result<Vec<BattleCommand>, SimError>;
}

/// Every living party unit basic-attacks the first living enemy.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicAttackPolicy;

impl Policy for BasicAttackPolicy {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn plan_round(
        &mut self,
        _engine: &BattleEngine<'_>,
        state: &BattleState,
    ) -> Result<Vec<BattleCommand>, SimError> {
        let Some(target) = state.living(Side::Enemy).next() else {
            return Ok(Vec::new());
        };
        Ok(state
            .living(Side::Party)
            .map(|unit| BattleCommand::basic_attack(unit.id.clone(), target.id.clone()))
            .collect())
    }
}

/// When the auto policy activates Djinn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DjinnUse {
    /// Keep every Djinn Set for the stat bonuses.
    #[default]
    Hold,
    /// Activate all equipped Djinn whenever every one of them is Set.
    Unleash,
}

/// Party driven by the same decision engine as the opposing side, kept
/// within the mana still unspent as each unit queues.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoPolicy {
    djinn: DjinnUse,
}

impl AutoPolicy {
    /// Mixed into the battle seed so party decisions never share a stream
    /// with enemy decisions of the same round.
    const SEED_SALT: u32 = 0x5eed_0001;

    pub fn new(djinn: DjinnUse) -> Self {
        Self { djinn }
    }

    fn djinn_to_activate(&self, state: &BattleState) -> Vec<DjinnId> {
        if self.djinn == DjinnUse::Hold {
            return Vec::new();
        }
        let equipped = &state.party.equipped_djinn;
        let all_set = equipped
            .iter()
            .all(|djinn| state.party.djinn_state(&djinn.id) == Some(DjinnState::Set));
        if !all_set {
            return Vec::new();
        }
        equipped.iter().map(|djinn| djinn.id.clone()).collect()
    }
}

impl Policy for AutoPolicy {
    fn name(&self) -> &'static str {
        match self.djinn {
            DjinnUse::Hold => "auto",
            DjinnUse::Unleash => "auto_unleash",
        }
    }

    fn plan_round(
        &mut self,
        engine: &BattleEngine<'_>,
        state: &BattleState,
    ) -> Result<Vec<BattleCommand>, SimError> {
        let mut rng = SeededRng::derive(
            state.seed ^ Self::SEED_SALT,
            state.round(),
            Stream::Decision,
        );
        let mut planned = state.clone();
        let mut commands = Vec::new();

        let djinn = self.djinn_to_activate(&planned);
        if !djinn.is_empty() {
            let command = BattleCommand::djinn(djinn);
            planned = engine.execute(&planned, &command)?.state;
            commands.push(command);
        }

        for id in planned.living_ids(Side::Party) {
            let budget = planned.mana.remaining;
            let Some(action) = ai::decide(
                &planned,
                &id,
                engine.env(),
                engine.config(),
                &mut rng,
                Some(budget),
            ) else {
                tracing::warn!(unit = %id, "no action available");
                continue;
            };
            let command = BattleCommand::from(action);
            planned = engine.execute(&planned, &command)?.state;
            commands.push(command);
        }

        tracing::trace!(
            round = state.round(),
            commands = commands.len(),
            "party plan ready"
        );
        Ok(commands)
    }
}
