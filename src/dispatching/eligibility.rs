//! Hard-constraint eligibility check.
//!
//! A candidate is assignable to a slot when all of the following hold:
//! 1. not already assigned on that date;
//! 2. primary role matches the role being filled;
//! 3. running weekly hours plus the slot's hours stay within the cap.
//!
//! The check never fails: a violation simply yields `false`. Reporting an
//! empty candidate pool is the role scheduler's job.

use std::collections::{HashMap, HashSet};

use crate::models::{Employee, Role};

/// Tolerance for float accumulation when comparing against the cap.
const CAP_EPSILON: f64 = 1e-9;

/// Whether `employee` may take a slot of `shift_hours` in `role`.
///
/// `assigned_today` holds the ids already working the slot's date;
/// `weekly_hours` holds running totals (absent = 0).
pub fn is_eligible(
    employee: &Employee,
    role: Role,
    shift_hours: f64,
    assigned_today: &HashSet<u32>,
    weekly_hours: &HashMap<u32, f64>,
    cap: f64,
) -> bool {
    if assigned_today.contains(&employee.id) {
        return false;
    }
    if employee.role != role {
        return false;
    }
    let current = weekly_hours.get(&employee.id).copied().unwrap_or(0.0);
    current + shift_hours <= cap + CAP_EPSILON
}
