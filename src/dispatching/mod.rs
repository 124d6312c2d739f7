//! Candidate selection for a single slot.
//!
//! Splits the choice of who fills a slot into a hard filter and a soft
//! ranking:
//!
//! - [`is_eligible`]: role match, not yet working that date, weekly cap.
//! - [`score`]: skill fitness under the day's profile, minus fairness and
//!   hours-band penalties. Higher is better.
//!
//! # Usage
//!
//! ```
//! use u_roster::dispatching::{score, DispatchContext};
//! use u_roster::models::{Employee, Role, Skill};
//!
//! let ctx = DispatchContext::new(Role::Manager).with_cohort_hours(&[30.0, 10.0]);
//! let a = Employee::new(1, Role::Manager).with_skill(Skill::Coffee, 80.0);
//! let b = Employee::new(2, Role::Manager).with_skill(Skill::Coffee, 80.0);
//! assert!(score(&b, 10.0, &ctx) > score(&a, 30.0, &ctx));
//! ```

mod context;
mod eligibility;
mod scoring;

pub use context::{CohortStats, DispatchContext};
pub use eligibility::is_eligible;
pub use scoring::{fairness_penalty, hours_penalty, normalized_fitness, role_fitness, score};
