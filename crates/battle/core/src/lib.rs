//! Deterministic turn-based battle rules.
//!
//! `battle-core` owns the canonical battle state and every rule that changes
//! it: effective stats, damage and healing, status effects, Djinn synergy and
//! activation, turn order, the opposing-side decision engine and the
//! planning/executing state machine. It performs no I/O and keeps no global
//! state. Randomness comes only from [`SeededRng`] streams derived from the
//! battle seed, so the same seed and commands always produce the same battle.
//! All state changes flow through [`engine::BattleEngine`]; content is read
//! through the oracle traits in [`env`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod djinn;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;
pub mod status;
pub mod targeting;

pub use config::BattleConfig;
pub use engine::{
    BattleCommand, BattleEngine, BattleSetup, CommandError, ExecuteError, ExecutionOutcome,
    InvariantCode, InvariantViolation, SetupError, TransitionPhase, TransitionPhaseError,
};
pub use env::{
    AbilityDefinition, AbilityKind, AbilityOracle, AiHints, BattleEnv, DjinnDefinition,
    DjinnOracle, EquipmentDefinition, EquipmentFlags, EquipmentOracle, EquipmentSlot, OracleError,
    RngSnapshot, SeededRng, Stream, TargetHint, TargetMode, UnitTemplate,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    AbilityId, BattleEvent, BattlePhase, BattleState, BattleStatus, BlockReason, DjinnId,
    DjinnState, Element, EncounterId, EquipmentId, Mitigation, QueuedAction, Side, StatusEffect,
    StatusKind, Team, Unit, UnitId,
};
pub use stats::{GrowthRates, Stats};
