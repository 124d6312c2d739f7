//! Demo data generators.
//!
//! Seeded, so the same seed always yields the same roster.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::models::{Employee, Role, Shift, Skill};

/// A small café: three managers, four baristas, four waiters, two on sandwiches.
pub const DEFAULT_COUNTS: [(Role, usize); 4] = [
    (Role::Manager, 3),
    (Role::Barista, 4),
    (Role::Waiter, 4),
    (Role::Sandwich, 2),
];

/// First generated employee id.
const FIRST_EMPLOYEE_ID: u32 = 1001;

const FIRST_NAMES: &[&str] = &[
    "Amy", "Beth", "Carl", "Dan", "Elsa", "Flo", "Gus", "Hugo", "Ivy", "Jay",
];
const LAST_NAMES: &[&str] = &[
    "Cole", "Fox", "Green", "Jones", "King", "Li", "Poe", "Rye", "Smith", "Watt",
];

/// Skill ranges (coffee, sandwich, customer service, speed) per role.
fn skill_ranges(role: Role) -> [(Skill, RangeInclusive<u32>); 4] {
    let (coffee, sandwich, service, speed) = match role {
        Role::Manager => (70..=85, 65..=80, 85..=95, 70..=85),
        Role::Barista => (80..=95, 40..=60, 70..=90, 75..=90),
        Role::Sandwich => (40..=60, 80..=95, 65..=85, 70..=85),
        Role::Waiter => (50..=70, 50..=70, 80..=95, 75..=90),
    };
    [
        (Skill::Coffee, coffee),
        (Skill::Sandwich, sandwich),
        (Skill::CustomerService, service),
        (Skill::Speed, speed),
    ]
}

/// Generates a roster with `count` employees per role, ids from 1001.
pub fn roster(seed: u64, counts: &[(Role, usize)]) -> Vec<Employee> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_id = FIRST_EMPLOYEE_ID;
    let mut employees = Vec::new();

    for &(role, count) in counts {
        for _ in 0..count {
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
            let mut employee = Employee::new(next_id, role).with_name(first, last);
            for (skill, range) in skill_ranges(role) {
                employee = employee.with_skill(skill, rng.random_range(range) as f64);
            }
            employees.push(employee);
            next_id += 1;
        }
    }
    employees
}

/// Seven consecutive daily shifts starting at `monday`, ids from `first_id`.
pub fn week_shifts(monday: NaiveDate, first_id: u32) -> Vec<Shift> {
    let week_id = Shift::week_id_for(monday);
    (0..7u32)
        .filter_map(|offset| {
            let date = monday.checked_add_days(Days::new(u64::from(offset)))?;
            Some(Shift::new(first_id + offset, date).with_week_id(week_id.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_is_seeded() {
        let a = roster(42, &DEFAULT_COUNTS);
        let b = roster(42, &DEFAULT_COUNTS);
        assert_eq!(a, b);
        assert_eq!(a.len(), 13);
        assert_eq!(a[0].id, 1001);
        assert_eq!(a.iter().filter(|e| e.role == Role::Sandwich).count(), 2);
    }

    #[test]
    fn test_skill_ranges() {
        for e in roster(7, &DEFAULT_COUNTS) {
            for (skill, range) in skill_ranges(e.role) {
                let score = e.skills.get(skill).unwrap();
                assert!(
                    score >= *range.start() as f64 && score <= *range.end() as f64,
                    "{} {:?} = {}",
                    e.role,
                    skill,
                    score
                );
            }
        }
    }

    #[test]
    fn test_week_shifts() {
        let monday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let shifts = week_shifts(monday, 500);
        assert_eq!(shifts.len(), 7);
        assert_eq!(shifts[0].id, 500);
        assert_eq!(shifts[6].date, NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
        assert!(shifts.iter().all(|s| s.week_id == "2025-W36"));
    }
}
