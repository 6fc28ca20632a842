//! Common error infrastructure for battle-core.
//!
//! Domain errors (`CommandError`, `InvariantViolation`, `OracleError`) live
//! next to the code that raises them; this module provides the shared
//! classification used by callers to decide how to react.
//!
//! # Error Kinds
//!
//! - **Caller misuse**: invalid references, wrong phase, mana overspend.
//!   Reported as typed failures; the state passed in is left untouched.
//! - **Impossible state**: an invariant violation. Fatal, carries a
//!   machine-readable code and is meant to surface a defect.
//! - **Gameplay outcomes** (no targets, frozen, paralyzed) are not errors at
//!   all and surface as events instead.

use crate::state::{BattlePhase, UnitId};

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Same plan, different choice: insufficient mana, Djinn still recovering.
    Recoverable,

    /// Malformed input: unknown unit, ability not unlocked, wrong target side.
    Validation,

    /// Content and state disagree, e.g. a definition missing mid-round.
    Internal,

    /// The state is corrupt and the battle cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for errors that point at a defect rather than at the caller.
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Where in the battle an error was raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub round: u32,
    pub phase: BattlePhase,
    /// Unit the error is about, when there is one.
    pub unit: Option<UnitId>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(round: u32, phase: BattlePhase) -> Self {
        Self {
            round,
            phase,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &UnitId) -> Self {
        self.unit = Some(unit.clone());
        self
    }
}

/// Shared classification for every battle error.
///
/// Error codes are stable SCREAMING_SNAKE identifiers.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
