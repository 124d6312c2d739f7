//! Per-run accumulators.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Mutable state of one role-scheduler run.
///
/// Created empty when a run starts, updated only by [`RunState::commit`],
/// dropped when the run ends.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    weekly_hours: HashMap<u32, f64>,
    assigned_today: HashMap<NaiveDate, HashSet<u32>>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running weekly hours of an employee (0 if never assigned).
    #[inline]
    pub fn hours(&self, employee_id: u32) -> f64 {
        self.weekly_hours.get(&employee_id).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn weekly_hours(&self) -> &HashMap<u32, f64> {
        &self.weekly_hours
    }

    /// Employees already working `date`, if any.
    #[inline]
    pub fn assigned_on(&self, date: NaiveDate) -> Option<&HashSet<u32>> {
        self.assigned_today.get(&date)
    }

    /// Records an assignment of `hours` on `date`.
    pub fn commit(&mut self, employee_id: u32, date: NaiveDate, hours: f64) {
        *self.weekly_hours.entry(employee_id).or_insert(0.0) += hours;
        self.assigned_today.entry(date).or_default().insert(employee_id);
    }
}
