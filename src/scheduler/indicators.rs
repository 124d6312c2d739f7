//! Daily roster indicators.
//!
//! Summarises a finished week per date for operators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assigned | Number of assignments on the date |
//! | Demand | Specialty of the date's most-assigned role (Barista → Coffee, Sandwich → Sandwiches, else Mixed); ties go to the first role in role order |
//! | Traffic | Assigned count bucketed by the week's 33rd/66th percentiles |
//! | Mismatches | Assignments whose normalised fitness is below the profile threshold |
//!
//! Fitness is evaluated under the date's profile-adjusted weights.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::config::SchedulerConfig;
use crate::dispatching::{normalized_fitness, role_fitness};
use crate::models::{Assignment, Employee, Role};
use crate::planning::{resolve_day_profile, Specialty, Traffic};

/// Fitness of one assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentFitness {
    pub shift_id: u32,
    pub employee_id: u32,
    pub role: Role,
    /// Raw fitness (skill part of the score).
    pub fitness: f64,
    /// Fitness scaled to 0..=1.
    pub normalized: f64,
}

/// Indicators for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyIndicator {
    pub date: NaiveDate,
    pub assigned: usize,
    pub demand: Specialty,
    pub traffic: Traffic,
    pub mismatches: usize,
}

/// Per-date indicators for a week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Indicators {
    /// One entry per date with assignments, ascending.
    pub days: Vec<DailyIndicator>,
    /// Per-assignment fitness, in input order.
    pub fitness: Vec<AssignmentFitness>,
}

impl Indicators {
    /// Computes indicators from a finished assignment list.
    ///
    /// Assignments for employees missing from `roster` count with zero
    /// fitness.
    pub fn calculate(
        assignments: &[Assignment],
        roster: &[Employee],
        config: &SchedulerConfig,
    ) -> Self {
        let employees: HashMap<u32, &Employee> = roster.iter().map(|e| (e.id, e)).collect();

        let mut by_date: BTreeMap<NaiveDate, Vec<&Assignment>> = BTreeMap::new();
        for a in assignments {
            by_date.entry(a.date()).or_default().push(a);
        }

        let mut fitness = Vec::with_capacity(assignments.len());
        for a in assignments {
            let profile = resolve_day_profile(a.date(), config);
            let (raw, normalized) = match employees.get(&a.employee_id) {
                Some(e) => (
                    role_fitness(e, a.role, &config.weights, profile),
                    normalized_fitness(e, a.role, &config.weights, profile),
                ),
                None => (0.0, 0.0),
            };
            fitness.push(AssignmentFitness {
                shift_id: a.shift_id,
                employee_id: a.employee_id,
                role: a.role,
                fitness: raw,
                normalized,
            });
        }

        let signals: Vec<f64> = by_date.values().map(|day| day.len() as f64).collect();
        let (q33, q66) = traffic_thresholds(&signals);

        let days = by_date
            .iter()
            .map(|(&date, day)| {
                let profile = resolve_day_profile(date, config);
                let mismatches = day
                    .iter()
                    .filter(|a| {
                        let normalized = employees
                            .get(&a.employee_id)
                            .map_or(0.0, |e| normalized_fitness(e, a.role, &config.weights, profile));
                        normalized < profile.threshold
                    })
                    .count();

                DailyIndicator {
                    date,
                    assigned: day.len(),
                    demand: demand_label(day),
                    traffic: traffic_label(day.len() as f64, q33, q66),
                    mismatches,
                }
            })
            .collect();

        Self { days, fitness }
    }

    /// Mismatches across the week.
    pub fn total_mismatches(&self) -> usize {
        self.days.iter().map(|d| d.mismatches).sum()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyIndicator> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Specialty of the role holding the most assignments on the day.
fn demand_label(day: &[&Assignment]) -> Specialty {
    let mut counts: BTreeMap<Role, usize> = BTreeMap::new();
    for a in day {
        *counts.entry(a.role).or_insert(0) += 1;
    }
    // first role wins a tie
    counts
        .iter()
        .max_by(|(ra, na), (rb, nb)| na.cmp(nb).then(rb.cmp(ra)))
        .map_or(Specialty::Mixed, |(&role, _)| Specialty::for_role(role))
}

/// 33rd and 66th percentile thresholds of the daily counts.
///
/// When both land on the same value and the counts still vary, the
/// thresholds are spread across the min..max range instead.
fn traffic_thresholds(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let mut q33 = sorted[((n - 1) as f64 * 0.33) as usize];
    let mut q66 = sorted[((n - 1) as f64 * 0.66) as usize];

    if q33 == q66 && n > 2 {
        let (min, max) = (sorted[0], sorted[n - 1]);
        if min < max {
            q33 = min + (max - min) * 0.33;
            q66 = min + (max - min) * 0.66;
        }
    }
    (q33, q66)
}

fn traffic_label(value: f64, q33: f64, q66: f64) -> Traffic {
    if q33 == q66 {
        Traffic::Medium
    } else if value < q33 {
        Traffic::Low
    } else if value <= q66 {
        Traffic::Medium
    } else {
        Traffic::High
    }
}
