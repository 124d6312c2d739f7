//! Rostering domain models.
//!
//! Core data types for one weekly rostering run: who can work
//! (`Employee`), which days need staffing (`Shift`), and what the
//! engine produces (`Assignment`).
//!
//! # Lifecycle
//!
//! Employees and shifts are read-only inputs for the duration of a run.
//! Assignments are value objects; identity is assigned by whoever
//! persists them.

mod assignment;
mod employee;
mod shift;
mod window;

pub use assignment::{Assignment, ShiftType};
pub use employee::{Employee, Role, Skill, SkillSet};
pub use shift::{DayType, Shift};
pub use window::ShiftWindow;

pub(crate) use window::hhmm;
