//! Error types for the command pipeline.

use crate::engine::commands::{CancelAction, CommitPlan, QueueAction, QueueDjinn};
use crate::engine::invariants::InvariantViolation;
use crate::engine::round::ExecuteRound;
use crate::engine::transition::BattleTransition;
use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{AbilityId, BattlePhase, DjinnId, UnitId};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Caller misuse detected while validating or applying a command.
///
/// A command that fails with one of these leaves the caller's state
/// untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("command requires the {expected} phase but the battle is in {actual}")]
    WrongPhase {
        expected: BattlePhase,
        actual: BattlePhase,
    },

    #[error("unit '{0}' not found")]
    UnknownUnit(UnitId),

    #[error("unit '{0}' is not a party member")]
    NotInParty(UnitId),

    #[error("unit '{0}' is knocked out")]
    ActorKnockedOut(UnitId),

    #[error("unit '{actor}' does not know ability '{ability}'")]
    AbilityNotKnown { actor: UnitId, ability: AbilityId },

    #[error("ability '{ability}' needs a target")]
    MissingTarget { ability: AbilityId },

    #[error("'{target}' is not a valid target for '{actor}'")]
    InvalidTarget { actor: UnitId, target: UnitId },

    #[error("not enough mana: need {needed}, {available} available")]
    InsufficientMana { needed: u32, available: u32 },

    #[error("no action queued for '{0}'")]
    NothingQueued(UnitId),

    #[error("plan incomplete: '{0}' has no queued action")]
    PlanIncomplete(UnitId),

    #[error("plan costs {cost} mana but the pool holds {max}")]
    PlanOverBudget { cost: u32, max: u32 },

    #[error("at most {max} djinn can be activated per round")]
    TooManyDjinn { max: usize },

    #[error("djinn '{0}' is not equipped")]
    DjinnNotEquipped(DjinnId),

    #[error("djinn '{0}' is not set")]
    DjinnNotSet(DjinnId),

    #[error("oracle lookup failed: {0}")]
    Oracle(#[from] OracleError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            InsufficientMana { .. } | PlanOverBudget { .. } | DjinnNotSet(_) => {
                ErrorSeverity::Recoverable
            }
            Oracle(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            WrongPhase { .. } => "COMMAND_WRONG_PHASE",
            UnknownUnit(_) => "COMMAND_UNKNOWN_UNIT",
            NotInParty(_) => "COMMAND_NOT_IN_PARTY",
            ActorKnockedOut(_) => "COMMAND_ACTOR_KNOCKED_OUT",
            AbilityNotKnown { .. } => "COMMAND_ABILITY_NOT_KNOWN",
            MissingTarget { .. } => "COMMAND_MISSING_TARGET",
            InvalidTarget { .. } => "COMMAND_INVALID_TARGET",
            InsufficientMana { .. } => "COMMAND_INSUFFICIENT_MANA",
            NothingQueued(_) => "COMMAND_NOTHING_QUEUED",
            PlanIncomplete(_) => "COMMAND_PLAN_INCOMPLETE",
            PlanOverBudget { .. } => "COMMAND_PLAN_OVER_BUDGET",
            TooManyDjinn { .. } => "COMMAND_TOO_MANY_DJINN",
            DjinnNotEquipped(_) => "COMMAND_DJINN_NOT_EQUIPPED",
            DjinnNotSet(_) => "COMMAND_DJINN_NOT_SET",
            Oracle(err) => err.error_code(),
        }
    }
}

/// Errors surfaced while executing a command through the battle engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("queue action failed: {0}")]
    QueueAction(TransitionPhaseError<<QueueAction as BattleTransition>::Error>),

    #[error("cancel action failed: {0}")]
    CancelAction(TransitionPhaseError<<CancelAction as BattleTransition>::Error>),

    #[error("queue djinn failed: {0}")]
    QueueDjinn(TransitionPhaseError<<QueueDjinn as BattleTransition>::Error>),

    #[error("commit plan failed: {0}")]
    CommitPlan(TransitionPhaseError<<CommitPlan as BattleTransition>::Error>),

    #[error("execute round failed: {0}")]
    ExecuteRound(TransitionPhaseError<<ExecuteRound as BattleTransition>::Error>),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl ExecuteError {
    /// The command-level error, if the failure came from a transition.
    pub fn command_error(&self) -> Option<&CommandError> {
        match self {
            ExecuteError::QueueAction(err)
            | ExecuteError::CancelAction(err)
            | ExecuteError::QueueDjinn(err)
            | ExecuteError::CommitPlan(err)
            | ExecuteError::ExecuteRound(err) => Some(&err.error),
            ExecuteError::Invariant(_) => None,
        }
    }

    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::QueueAction(err)
            | ExecuteError::CancelAction(err)
            | ExecuteError::QueueDjinn(err)
            | ExecuteError::CommitPlan(err)
            | ExecuteError::ExecuteRound(err) => Some(err.phase),
            ExecuteError::Invariant(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Invariant(violation) => violation.severity(),
            _ => self
                .command_error()
                .map_or(ErrorSeverity::Internal, CommandError::severity),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            ExecuteError::Invariant(violation) => violation.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Invariant(violation) => violation.error_code(),
            _ => self
                .command_error()
                .map_or("EXECUTE_UNKNOWN", CommandError::error_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_error_display_names_the_stage() {
        let err = TransitionPhaseError::new(
            TransitionPhase::PreValidate,
            CommandError::InsufficientMana {
                needed: 3,
                available: 1,
            },
        );
        assert_eq!(
            err.to_string(),
            "pre_validate failed: not enough mana: need 3, 1 available"
        );
    }

    #[test]
    fn oracle_errors_keep_their_codes() {
        let err = CommandError::from(OracleError::AbilityNotFound(AbilityId::from("nope")));
        assert_eq!(err.error_code(), "ORACLE_ABILITY_NOT_FOUND");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
