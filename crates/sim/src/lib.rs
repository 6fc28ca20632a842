//! Batch simulation and replay for the battle engine.
//!
//! A [`Simulator`] drives a battle to completion with a party [`Policy`]
//! while the engine drives the opposing side. Every run yields a
//! [`Transcript`] (initial state, commands and final digest) that can be
//! replayed and checked byte for byte, and batches of runs roll up into a
//! [`BatchReport`] for balance work.

pub mod error;
pub mod policy;
pub mod report;
pub mod simulator;
pub mod transcript;

pub use error::SimError;
pub use policy::{AutoPolicy, BasicAttackPolicy, DjinnUse, Policy};
pub use report::{BatchReport, RunSummary};
pub use simulator::{BattleRecord, Simulator};
pub use transcript::Transcript;
