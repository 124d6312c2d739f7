//! Weekly staff rostering engine.
//!
//! Assigns staff to daily shifts for one calendar week under per-role
//! headcounts, per-role time windows, weekly-hour fairness and hard hour
//! caps. Scheduling is greedy and deterministic; solver-based optimisation
//! is out of scope.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `Role`, `Shift`, `Assignment`,
//!   `ShiftWindow`
//! - **`config`**: Validated `SchedulerConfig` loaded from YAML or JSON
//! - **`planning`**: Per-date resolvers for headcounts, day profiles and
//!   time windows
//! - **`dispatching`**: Eligibility check and candidate scoring for one slot
//! - **`scheduler`**: Generic role scheduler, orchestrator, daily indicators
//! - **`validation`**: Post-hoc checks of a finished week
//! - **`repository`**: Injected read access to employees and shifts
//! - **`demo`**: Seeded demo rosters and week shifts
//!
//! # Run Model
//!
//! One run schedules one week in memory and is all-or-nothing: it returns
//! every assignment or the first error. Persisting the result is the
//! caller's job.
//!
//! ```
//! use u_roster::config::SchedulerConfig;
//! use u_roster::repository::InMemoryRepository;
//! use u_roster::scheduler::Orchestrator;
//! use u_roster::demo;
//!
//! let monday = chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! let repo = InMemoryRepository::from_parts(
//!     demo::roster(1, &demo::DEFAULT_COUNTS),
//!     demo::week_shifts(monday, 1),
//! );
//!
//! let config = SchedulerConfig::default();
//! let week = Orchestrator::new(&config).run_week(&repo, "2025-W36").unwrap();
//! assert_eq!(week.len(), 37);
//! ```

pub mod config;
pub mod demo;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod planning;
pub mod repository;
pub mod scheduler;
pub mod validation;

pub use error::{ConfigError, RepositoryError, Result, ScheduleError};
