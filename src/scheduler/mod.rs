//! Greedy role schedulers, orchestration and daily indicators.
//!
//! # Algorithm
//!
//! Every role is filled by the same greedy pass ([`RoleScheduler`]),
//! parameterised by a [`RolePolicy`] value: which role, which date order,
//! which shift-type tags. The [`Orchestrator`] runs one pass per role in
//! precedence order, dedupes and validates. It is not optimal, but it is
//! fast, deterministic and easy to audit.
//!
//! # Indicators
//!
//! [`Indicators`] summarises a finished week per date: assigned count,
//! demand label, traffic bucket and skill mismatches.

mod indicators;
mod orchestrator;
mod role;
mod state;

pub use indicators::{AssignmentFitness, DailyIndicator, Indicators};
pub use orchestrator::{Orchestrator, DEFAULT_ORDER};
pub use role::{DateOrder, RolePolicy, RoleScheduler, ShiftTagging};
pub use state::RunState;
