//! Post-hoc validation of a finished week.
//!
//! Re-checks the merged assignment set against the roster, the week's
//! shifts and the config. Detects:
//! - Weekly hours over an employee's effective cap (all roles combined)
//! - Role/date coverage below or above the required headcount
//! - Duplicate (shift, employee) pairs
//! - Employees working more than one shift on a date
//! - Assignments for employees missing from the roster
//! - Windows that do not start before they end
//!
//! A weekend requirement for a role with fallback enabled is met by any
//! count in `min(min_required, needed)..=needed`.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::models::{Assignment, DayType, Employee, Role, Shift};
use crate::planning::resolve_requirements;

/// Slack for float hour sums.
const HOURS_EPSILON: f64 = 1e-6;

/// A single failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// An employee's weekly hours exceed the effective cap.
    CapExceeded,
    /// Fewer assignments than required for a role on a date.
    Undercovered,
    /// More assignments than required for a role on a date.
    Overcovered,
    /// A (shift, employee) pair appears more than once.
    DuplicatePair,
    /// An employee works more than one shift on a date.
    DoubleBooked,
    /// An assignment references an employee not in the roster.
    UnknownEmployee,
    /// An assignment window does not start before it ends.
    InvalidWindow,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Structured pass/fail report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether every check passed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// `Ok(())` when passed, else [`ScheduleError::Validation`] carrying the report.
    pub fn into_result(self) -> Result<(), ScheduleError> {
        if self.passed() {
            Ok(())
        } else {
            Err(ScheduleError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return f.write_str("all checks passed");
        }
        write!(f, "{} violation(s)", self.violations.len())?;
        for v in &self.violations {
            write!(f, "; {}", v.message)?;
        }
        Ok(())
    }
}

/// Validates a finished week.
///
/// Checks, in order:
/// 1. Every assignment references a rostered employee
/// 2. Every window starts before it ends
/// 3. No duplicate (shift, employee) pairs
/// 4. No employee works two shifts on one date
/// 5. Weekly hours stay within each employee's effective cap
/// 6. Every shift date has exactly the required headcount per role
///    (weekend fallback widens the accepted range)
pub fn validate_schedule(
    assignments: &[Assignment],
    roster: &[Employee],
    shifts: &[Shift],
    config: &SchedulerConfig,
) -> ValidationReport {
    let mut violations = Vec::new();
    let employees: HashMap<u32, &Employee> = roster.iter().map(|e| (e.id, e)).collect();

    let mut seen_pairs = HashSet::new();
    let mut shifts_by_day: BTreeMap<(u32, NaiveDate), BTreeSet<u32>> = BTreeMap::new();
    let mut hours: BTreeMap<u32, (Role, f64)> = BTreeMap::new();
    let mut counts: HashMap<(NaiveDate, Role), u32> = HashMap::new();

    for a in assignments {
        if !employees.contains_key(&a.employee_id) {
            violations.push(Violation::new(
                ViolationKind::UnknownEmployee,
                format!("Shift {} assigns unknown employee {}", a.shift_id, a.employee_id),
            ));
        }

        if a.start >= a.end {
            violations.push(Violation::new(
                ViolationKind::InvalidWindow,
                format!(
                    "Employee {} on shift {}: window {} - {} is empty",
                    a.employee_id, a.shift_id, a.start, a.end
                ),
            ));
        }

        if !seen_pairs.insert(a.key()) {
            violations.push(Violation::new(
                ViolationKind::DuplicatePair,
                format!("Duplicate assignment: shift {} employee {}", a.shift_id, a.employee_id),
            ));
            continue;
        }

        *counts.entry((a.date(), a.role)).or_insert(0) += 1;
        shifts_by_day
            .entry((a.employee_id, a.date()))
            .or_default()
            .insert(a.shift_id);

        // cap follows the primary role; unknown employees fall back to the assigned role
        let role = employees.get(&a.employee_id).map_or(a.role, |e| e.role);
        hours.entry(a.employee_id).or_insert((role, 0.0)).1 += a.duration_hours();
    }

    for ((employee_id, date), day_shifts) in &shifts_by_day {
        if day_shifts.len() > 1 {
            violations.push(Violation::new(
                ViolationKind::DoubleBooked,
                format!(
                    "Employee {} works {} shifts on {}",
                    employee_id,
                    day_shifts.len(),
                    date
                ),
            ));
        }
    }

    for (employee_id, (role, total)) in &hours {
        let cap = config.effective_cap(*role);
        if *total > cap + HOURS_EPSILON {
            violations.push(Violation::new(
                ViolationKind::CapExceeded,
                format!("Employee {employee_id} works {total:.1}h, cap {cap:.1}h"),
            ));
        }
    }

    let dates: BTreeSet<NaiveDate> = shifts.iter().map(|s| s.date).collect();
    for date in dates {
        let requirements = resolve_requirements(date, config);
        let weekend = DayType::of(date).is_weekend();

        for role in Role::ALL {
            let needed = requirements.get(&role).copied().unwrap_or(0);
            let actual = counts.get(&(date, role)).copied().unwrap_or(0);
            let minimum = match config.fallback_for(role) {
                Some(rule) if weekend && rule.enabled => rule.min_required.min(needed),
                _ => needed,
            };

            if actual < minimum {
                violations.push(Violation::new(
                    ViolationKind::Undercovered,
                    format!("{role} on {date}: {actual} assigned, {minimum} required"),
                ));
            } else if actual > needed {
                violations.push(Violation::new(
                    ViolationKind::Overcovered,
                    format!("{role} on {date}: {actual} assigned, {needed} required"),
                ));
            }
        }
    }

    ValidationReport { violations }
}
