//! Construction of the initial [`BattleState`].

use crate::env::{BattleEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    BattleCounters, BattleEvent, BattleState, DjinnId, EncounterId, StatusEffects, Team,
    TeamError, Unit, UnitId,
};
use crate::stats::clamp_hp;

use super::invariants::{InvariantViolation, validate};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("a battle needs at least one party unit")]
    EmptyParty,

    #[error("a battle needs at least one enemy")]
    NoEnemies,

    #[error("unit id '{0}' is used more than once")]
    DuplicateUnit(UnitId),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SetupError::Team(err) => err.severity(),
            SetupError::Oracle(err) => err.severity(),
            SetupError::Invariant(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::EmptyParty => "SETUP_EMPTY_PARTY",
            SetupError::NoEnemies => "SETUP_NO_ENEMIES",
            SetupError::DuplicateUnit(_) => "SETUP_DUPLICATE_UNIT",
            SetupError::Team(err) => err.error_code(),
            SetupError::Oracle(err) => err.error_code(),
            SetupError::Invariant(err) => err.error_code(),
        }
    }
}

/// Builder for a fresh battle.
///
/// ```ignore
/// let state = BattleSetup::new("forest_ambush", seed)
///     .party_unit(isaac)
///     .djinn("flint")
///     .enemy(slime)
///     .build(&env)?;
/// ```
#[derive(Clone, Debug)]
pub struct BattleSetup {
    encounter: EncounterId,
    seed: u32,
    party: Vec<Unit>,
    djinn: Vec<DjinnId>,
    enemies: Vec<Unit>,
}

impl BattleSetup {
    pub fn new(encounter: impl Into<EncounterId>, seed: u32) -> Self {
        Self {
            encounter: encounter.into(),
            seed,
            party: Vec::new(),
            djinn: Vec::new(),
            enemies: Vec::new(),
        }
    }

    pub fn party_unit(mut self, unit: Unit) -> Self {
        self.party.push(unit);
        self
    }

    pub fn party(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.party.extend(units);
        self
    }

    /// Equips a Djinn; its element comes from the Djinn oracle at build time.
    pub fn djinn(mut self, id: impl Into<DjinnId>) -> Self {
        self.djinn.push(id.into());
        self
    }

    pub fn enemy(mut self, unit: Unit) -> Self {
        self.enemies.push(unit);
        self
    }

    pub fn enemies(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.enemies.extend(units);
        self
    }

    /// Builds a planning-phase state for round 1.
    ///
    /// Per-battle counters and statuses are reset. HP is kept (clamped to the
    /// effective max) so a party can carry damage between encounters.
    ///
    /// # Errors
    ///
    /// Fails on an empty roster, a duplicate unit id, an unknown Djinn, more
    /// than four party units or three Djinn, or an initial state that breaks an
    /// invariant.
    pub fn build(self, env: &BattleEnv<'_>) -> Result<BattleState, SetupError> {
        if self.party.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if self.enemies.is_empty() {
            return Err(SetupError::NoEnemies);
        }

        let mut seen: Vec<&UnitId> = Vec::new();
        for unit in self.party.iter().chain(&self.enemies) {
            if seen.contains(&&unit.id) {
                return Err(SetupError::DuplicateUnit(unit.id.clone()));
            }
            seen.push(&unit.id);
        }

        let mut team = Team::new();
        for unit in self.party {
            team.add_unit(fresh(unit))?;
        }
        for id in self.djinn {
            let definition = env.djinn_definition(&id)?;
            team.equip_djinn(id, definition.element)?;
        }
        let enemies = self.enemies.into_iter().map(fresh).collect();

        let mut state = BattleState::new(self.encounter, self.seed, team, enemies);
        state.push_event(BattleEvent::RoundStarted { round: 1 });
        validate(&state)?;
        tracing::debug!(
            encounter = %state.encounter,
            seed = state.seed,
            party = state.party.units.len(),
            enemies = state.enemies.len(),
            "battle created"
        );
        Ok(state)
    }
}

fn fresh(mut unit: Unit) -> Unit {
    unit.counters = BattleCounters::default();
    unit.statuses = StatusEffects::new();
    clamp_hp(&mut unit);
    unit
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::{AbilityDefinition, AbilityOracle, DjinnDefinition, DjinnOracle};
    use crate::state::{AbilityId, BattlePhase, DjinnState, Element, StatusEffect};
    use crate::stats::Stats;

    #[derive(Default)]
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
        let flint = DjinnDefinition::new("flint", Element::Venus);
        Fixture {
            djinn: HashMap::from([(flint.id.clone(), flint)]),
        }
    }

    fn unit(id: &str) -> Unit {
        Unit::new(id, Element::Venus, Stats::new(50, 0, 10, 10, 10, 10))
    }

    #[test]
    fn builds_a_planning_state() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let mut hurt = unit("isaac");
        hurt.statuses.push(StatusEffect::Poison { duration: 3 });
        hurt.counters.knockouts = 4;

        let state = BattleSetup::new("ambush", 9)
            .party_unit(hurt)
            .djinn("flint")
            .enemy(unit("slime"))
            .build(&env)
            .unwrap();

        assert_eq!(state.phase(), BattlePhase::Planning);
        assert_eq!(state.round(), 1);
        assert_eq!(state.mana.remaining, state.mana.max);
        assert_eq!(
            state.party.djinn_state(&DjinnId::from("flint")),
            Some(DjinnState::Set)
        );
        let isaac = &state.party.units[0];
        assert!(isaac.statuses.is_empty());
        assert_eq!(isaac.counters.knockouts, 0);
    }

    #[test]
    fn rejects_unknown_djinn() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let err = BattleSetup::new("ambush", 9)
            .party_unit(unit("isaac"))
            .djinn("ghost")
            .enemy(unit("slime"))
            .build(&env)
            .unwrap_err();
        assert!(matches!(err, SetupError::Oracle(OracleError::DjinnNotFound(_))));
    }

    #[test]
    fn rejects_ids_shared_across_sides() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let err = BattleSetup::new("ambush", 9)
            .party_unit(unit("twin"))
            .enemy(unit("twin"))
            .build(&env)
            .unwrap_err();
        assert_eq!(err, SetupError::DuplicateUnit(UnitId::from("twin")));
    }

    #[test]
    fn rejects_a_fifth_party_member() {
        let fixture = fixture();
        let env = BattleEnv::new(&fixture, &fixture);
        let err = BattleSetup::new("ambush", 9)
            .party(["a", "b", "c", "d", "e"].map(unit))
            .enemy(unit("slime"))
            .build(&env)
            .unwrap_err();
        assert!(matches!(err, SetupError::Team(TeamError::PartyFull { .. })));
    }
}
