//! Effective stat pipeline.
//!
//! ```text
//! [ Base ] + [ Level ] + [ Equipment ] + [ Djinn ] + [ Status ]
//!                          ↓
//!                floor, then clamp per stat
//! ```
//!
//! Every layer is recomputed on demand. Nothing here is cached on the unit,
//! so level, equipment, Djinn and status changes are always reflected by the
//! next call.

pub mod core;
mod layers;

pub use self::core::{GrowthRates, StatKind, Stats};
pub use layers::{StatLayers, clamp_hp, effective_stats, max_hp, refill_hp};
