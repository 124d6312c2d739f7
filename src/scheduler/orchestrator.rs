//! Weekly run orchestration.
//!
//! Runs one role scheduler per role in precedence order, merges their
//! output, drops repeated (shift, employee) pairs and validates the result.
//! A run is all-or-nothing: the first scheduler or validation failure is
//! returned and no assignments are.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::{RolePolicy, RoleScheduler};
use crate::config::SchedulerConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, Employee, Role, Shift};
use crate::repository::Repository;
use crate::validation::validate_schedule;

/// Default scheduler precedence.
pub const DEFAULT_ORDER: [Role; 4] = [Role::Manager, Role::Sandwich, Role::Barista, Role::Waiter];

/// Sequences role schedulers for one week.
///
/// # Example
///
/// ```
/// use u_roster::config::SchedulerConfig;
/// use u_roster::demo;
/// use u_roster::models::Shift;
/// use u_roster::scheduler::Orchestrator;
///
/// let monday = chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let roster = demo::roster(7, &demo::DEFAULT_COUNTS);
/// let shifts = demo::week_shifts(monday, 1);
///
/// let config = SchedulerConfig::default();
/// let assignments = Orchestrator::new(&config).schedule(&roster, &shifts).unwrap();
/// assert!(!assignments.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Orchestrator<'a> {
    config: &'a SchedulerConfig,
    order: Vec<Role>,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator with the default order
    /// (MANAGER, SANDWICH, BARISTA, WAITER).
    pub fn new(config: &'a SchedulerConfig) -> Self {
        Self {
            config,
            order: DEFAULT_ORDER.to_vec(),
        }
    }

    /// Replaces the scheduler order. Repeated roles run once.
    pub fn with_order(mut self, order: impl IntoIterator<Item = Role>) -> Self {
        let mut seen = HashSet::new();
        self.order = order.into_iter().filter(|r| seen.insert(*r)).collect();
        self
    }

    #[inline]
    pub fn order(&self) -> &[Role] {
        &self.order
    }

    /// Loads a week from the repository and schedules it.
    ///
    /// The roster is the union of every role's employees.
    pub fn run_week(&self, repo: &dyn Repository, week_id: &str) -> Result<Vec<Assignment>> {
        let shifts = repo.shifts_by_week(week_id)?;
        if shifts.is_empty() {
            return Err(ScheduleError::NoShifts {
                week_id: week_id.to_string(),
            });
        }

        let mut roster = Vec::new();
        for role in Role::ALL {
            roster.extend(repo.employees_by_role(role)?);
        }

        info!(week = week_id, shifts = shifts.len(), employees = roster.len(), "loaded week");
        self.schedule(&roster, &shifts)
    }

    /// Schedules the given shifts with the given roster.
    pub fn schedule(&self, roster: &[Employee], shifts: &[Shift]) -> Result<Vec<Assignment>> {
        let order: Vec<&str> = self.order.iter().map(Role::as_str).collect();
        info!(order = ?order, shifts = shifts.len(), "starting run");

        let mut merged = Vec::new();
        for &role in &self.order {
            let scheduler = RoleScheduler::new(RolePolicy::for_role(role), self.config)?;
            merged.extend(scheduler.run(roster, shifts)?);
        }

        let assignments = dedupe(merged);

        let report = validate_schedule(&assignments, roster, shifts, self.config);
        if !report.passed() {
            warn!(violations = report.violations.len(), "validation failed");
            return Err(ScheduleError::Validation(report));
        }

        info!(assignments = assignments.len(), "run complete");
        Ok(assignments)
    }
}

/// Keeps the first occurrence of each (shift, employee) pair.
fn dedupe(assignments: Vec<Assignment>) -> Vec<Assignment> {
    let total = assignments.len();
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<Assignment> = assignments
        .into_iter()
        .filter(|a| {
            let fresh = seen.insert(a.key());
            if !fresh {
                debug!(shift = a.shift_id, employee = a.employee_id, "duplicate pair dropped");
            }
            fresh
        })
        .collect();

    if kept.len() < total {
        warn!(removed = total - kept.len(), "removed duplicate assignments");
    }
    kept
}
