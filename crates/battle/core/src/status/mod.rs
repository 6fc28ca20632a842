//! Status-effect engine.
//!
//! Application rules (immunity, stacking, cleanse) live in [`apply`]; the
//! once-per-turn tick and the paralysis check live in [`tick`].

pub mod apply;
pub mod tick;

pub use apply::{ApplyOutcome, apply_status, cleanse, inflict};
pub use tick::{TickReport, paralysis_fails, tick_unit};
