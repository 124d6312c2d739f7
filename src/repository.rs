//! Read-only access to employees and shifts.
//!
//! The engine never owns a persistence client. Callers inject a
//! [`Repository`] and keep ownership of storage, including writing the
//! produced assignments back.

use std::collections::HashMap;

use crate::error::RepositoryError;
use crate::models::{Employee, Role, Shift};

/// Capability set the engine needs from storage.
pub trait Repository: Send + Sync {
    /// Employees whose primary role is `role`.
    fn employees_by_role(&self, role: Role) -> Result<Vec<Employee>, RepositoryError>;

    /// Shifts of a week, ordered by date ascending.
    fn shifts_by_week(&self, week_id: &str) -> Result<Vec<Shift>, RepositoryError>;
}

/// Repository held entirely in memory. Used by the CLI, demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    employees: Vec<Employee>,
    shifts: HashMap<String, Vec<Shift>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository from a roster and a list of shifts.
    pub fn from_parts(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        shifts
            .into_iter()
            .fold(Self::new().with_employees(employees), Self::with_shift)
    }

    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }

    pub fn with_employees(mut self, employees: impl IntoIterator<Item = Employee>) -> Self {
        self.employees.extend(employees);
        self
    }

    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.entry(shift.week_id.clone()).or_default().push(shift);
        self
    }

    /// Whole roster, in insertion order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}

impl Repository for InMemoryRepository {
    fn employees_by_role(&self, role: Role) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.role == role)
            .cloned()
            .collect())
    }

    fn shifts_by_week(&self, week_id: &str) -> Result<Vec<Shift>, RepositoryError> {
        let mut shifts = self.shifts.get(week_id).cloned().unwrap_or_default();
        shifts.sort_by_key(|s| (s.date, s.id));
        Ok(shifts)
    }
}
