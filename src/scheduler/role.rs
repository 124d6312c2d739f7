//! Greedy role scheduler.
//!
//! # Algorithm
//!
//! For each date of the week (in the policy's date order):
//! 1. Resolve the role's headcount for the date.
//! 2. For each slot `0..needed`:
//!    - resolve the slot window and its hours;
//!    - keep role employees passing the eligibility check;
//!    - empty pool: skip if a weekend fallback waives the slot, else fail;
//!    - score the pool against a snapshot of the cohort's hours and pick
//!      the best (ties: lowest employee id);
//!    - emit the assignment and commit it to the run state.
//!
//! # Complexity
//! O(d * s * e) where d=dates, s=slots per date, e=employees in the role.
//!
//! One algorithm serves every role. What differs per role is a
//! [`RolePolicy`] value; windows, headcounts, caps and fallback rules come
//! from the config keyed by role.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::RunState;
use crate::config::SchedulerConfig;
use crate::dispatching::{is_eligible, score, DispatchContext};
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, DayType, Employee, Role, Shift, ShiftType};
use crate::planning::{resolve_demand, resolve_window};

/// Order in which a scheduler walks the week's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// Ascending by date.
    Chronological,
    /// Saturday/Sunday first, then the rest; each group ascending.
    WeekendFirst,
}

/// How assignments are tagged with a [`ShiftType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftTagging {
    /// `weekday` / `weekend`.
    DayType,
    /// `weekday` / `weekend_slotN`.
    Staggered,
    /// `early_prep` / `weekend_prep`.
    Prep,
}

impl ShiftTagging {
    pub fn tag(&self, day_type: DayType, slot: u32) -> ShiftType {
        match (self, day_type) {
            (ShiftTagging::DayType, DayType::Weekday) => ShiftType::Weekday,
            (ShiftTagging::DayType, DayType::Weekend) => ShiftType::Weekend,
            (ShiftTagging::Staggered, DayType::Weekday) => ShiftType::Weekday,
            (ShiftTagging::Staggered, DayType::Weekend) => ShiftType::WeekendSlot(slot + 1),
            (ShiftTagging::Prep, DayType::Weekday) => ShiftType::EarlyPrep,
            (ShiftTagging::Prep, DayType::Weekend) => ShiftType::WeekendPrep,
        }
    }
}

/// What makes one role's scheduler different from another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    /// Role filled; also the key for headcounts, windows, caps and fallback.
    pub role: Role,
    pub order: DateOrder,
    pub tagging: ShiftTagging,
}

impl RolePolicy {
    /// Managers claim weekend dates first so weekend hours are reserved.
    pub fn manager() -> Self {
        Self {
            role: Role::Manager,
            order: DateOrder::WeekendFirst,
            tagging: ShiftTagging::DayType,
        }
    }

    /// Front-of-house cohort roles (baristas, waiters).
    pub fn cohort(role: Role) -> Self {
        Self {
            role,
            order: DateOrder::Chronological,
            tagging: ShiftTagging::Staggered,
        }
    }

    /// Early-morning sandwich prep.
    pub fn sandwich() -> Self {
        Self {
            role: Role::Sandwich,
            order: DateOrder::Chronological,
            tagging: ShiftTagging::Prep,
        }
    }

    /// Standard policy for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Manager => Self::manager(),
            Role::Sandwich => Self::sandwich(),
            Role::Barista | Role::Waiter => Self::cohort(role),
        }
    }

    /// Shifts in the order this policy processes them.
    pub fn order_shifts<'s>(&self, shifts: &'s [Shift]) -> Vec<&'s Shift> {
        let mut ordered: Vec<&Shift> = shifts.iter().collect();
        match self.order {
            DateOrder::Chronological => ordered.sort_by_key(|s| (s.date, s.id)),
            DateOrder::WeekendFirst => {
                ordered.sort_by_key(|s| (!s.day_type().is_weekend(), s.date, s.id))
            }
        }
        ordered
    }
}

/// Runs one role's greedy pass over a week.
#[derive(Debug, Clone)]
pub struct RoleScheduler<'a> {
    policy: RolePolicy,
    config: &'a SchedulerConfig,
    tz: Tz,
}

impl<'a> RoleScheduler<'a> {
    /// Creates a scheduler. Fails if the config timezone is unknown.
    pub fn new(policy: RolePolicy, config: &'a SchedulerConfig) -> Result<Self> {
        let tz = config.tz()?;
        Ok(Self { policy, config, tz })
    }

    #[inline]
    pub fn policy(&self) -> &RolePolicy {
        &self.policy
    }

    /// Produces this role's assignments for the given shifts.
    ///
    /// `employees` may contain other roles; only the policy's role is
    /// considered. Returns the first unfillable slot as
    /// [`ScheduleError::InsufficientStaff`].
    pub fn run(&self, employees: &[Employee], shifts: &[Shift]) -> Result<Vec<Assignment>> {
        self.run_with_state(employees, shifts, &mut RunState::new())
    }

    /// Like [`run`](Self::run), but scores and caps against hours already
    /// recorded in `state`. New assignments are committed to it.
    pub fn run_with_state(
        &self,
        employees: &[Employee],
        shifts: &[Shift],
        state: &mut RunState,
    ) -> Result<Vec<Assignment>> {
        let role = self.policy.role;
        let mut pool: Vec<&Employee> = employees.iter().filter(|e| e.role == role).collect();
        pool.sort_by_key(|e| e.id);

        let cap = self.config.effective_cap(role);
        let mut assignments = Vec::new();
        let empty = HashSet::new();

        for shift in self.policy.order_shifts(shifts) {
            let demand = resolve_demand(shift.date, self.config);
            let needed = demand.needed(role);

            for slot in 0..needed {
                let window = resolve_window(role, shift.date, slot as usize, self.config);
                let hours = window.duration_hours();
                let today = state.assigned_on(shift.date).unwrap_or(&empty);

                let candidates: Vec<&Employee> = pool
                    .iter()
                    .copied()
                    .filter(|e| is_eligible(e, role, hours, today, state.weekly_hours(), cap))
                    .collect();

                if candidates.is_empty() {
                    if self.waives(demand.day_type, slot) {
                        warn!(%role, date = %shift.date, slot, "no eligible staff, slot skipped by weekend fallback");
                        continue;
                    }
                    return Err(ScheduleError::InsufficientStaff {
                        role,
                        date: shift.date,
                        slot,
                    });
                }

                let cohort: Vec<f64> = pool.iter().map(|e| state.hours(e.id)).collect();
                let ctx = DispatchContext::new(role)
                    .with_weights(self.config.weights.clone())
                    .with_profile(demand.profile.clone())
                    .with_hours_policy(self.config.hours_policy_for(role).cloned())
                    .with_penalties(self.config.hours_penalties.clone())
                    .with_cohort_hours(&cohort);

                let Some((best_score, best)) = candidates
                    .iter()
                    .map(|e| (score(e, state.hours(e.id), &ctx), *e))
                    .max_by(|(sa, a), (sb, b)| sa.total_cmp(sb).then_with(|| b.id.cmp(&a.id)))
                else {
                    continue;
                };

                let assignment = Assignment {
                    shift_id: shift.id,
                    employee_id: best.id,
                    start: self.localize(shift.date, window.start)?,
                    end: self.localize(shift.date, window.end)?,
                    role,
                    shift_type: self.policy.tagging.tag(demand.day_type, slot),
                    day_type: demand.day_type,
                };
                debug!(
                    %role,
                    date = %shift.date,
                    slot,
                    employee = best.id,
                    score = best_score,
                    shift_type = %assignment.shift_type,
                    "assigned"
                );

                state.commit(best.id, shift.date, hours);
                assignments.push(assignment);
            }
        }

        info!(%role, assignments = assignments.len(), "role scheduled");
        Ok(assignments)
    }

    fn waives(&self, day_type: DayType, slot: u32) -> bool {
        day_type.is_weekend()
            && self
                .config
                .fallback_for(self.policy.role)
                .is_some_and(|rule| rule.waives(slot))
    }

    /// Attaches the config timezone to a local date and time. Ambiguous
    /// times resolve to the earlier instant.
    fn localize(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<FixedOffset>> {
        self.tz
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| dt.fixed_offset())
            .ok_or_else(|| ScheduleError::InvalidLocalTime {
                date,
                time,
                timezone: self.config.timezone.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackRule, HoursPolicy};
    use crate::models::{ShiftWindow, Skill};
    use crate::planning::{RoleWindows, WindowSpec};
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday() -> NaiveDate {
        date(2025, 9, 1)
    }

    fn saturday() -> NaiveDate {
        date(2025, 9, 6)
    }

    fn hm(start: (u32, u32), end: (u32, u32)) -> ShiftWindow {
        ShiftWindow::from_hm(start, end).unwrap()
    }

    fn week() -> Vec<Shift> {
        (0..7)
            .map(|i| Shift::new(100 + i, monday() + chrono::Days::new(i as u64)))
            .collect()
    }

    fn staff(role: Role, ids: &[u32]) -> Vec<Employee> {
        ids.iter()
            .map(|&id| {
                Employee::new(id, role)
                    .with_skill(Skill::Coffee, 80.0)
                    .with_skill(Skill::Sandwich, 60.0)
                    .with_skill(Skill::CustomerService, 85.0)
                    .with_skill(Skill::Speed, 75.0)
            })
            .collect()
    }

    fn only(role: Role, weekday: u32, weekend: u32) -> SchedulerConfig {
        let mut config = SchedulerConfig::default();
        config.default_requirements = BTreeMap::from([(role, weekday)]);
        config.weekend_requirements = BTreeMap::from([(role, weekend)]);
        config
    }

    #[test]
    fn test_manager_orders_weekend_first() {
        let policy = RolePolicy::manager();
        let shifts = week();
        let dates: Vec<NaiveDate> = policy.order_shifts(&shifts).iter().map(|s| s.date).collect();
        assert_eq!(dates[0], saturday());
        assert_eq!(dates[1], date(2025, 9, 7));
        assert_eq!(dates[2], monday());
        assert_eq!(dates[6], date(2025, 9, 5));

        let cohort = RolePolicy::cohort(Role::Barista);
        assert_eq!(cohort.order_shifts(&shifts)[0].date, monday());
    }

    #[test]
    fn test_shift_tags() {
        assert_eq!(ShiftTagging::Staggered.tag(DayType::Weekend, 1), ShiftType::WeekendSlot(2));
        assert_eq!(ShiftTagging::Staggered.tag(DayType::Weekday, 1), ShiftType::Weekday);
        assert_eq!(ShiftTagging::Prep.tag(DayType::Weekday, 0), ShiftType::EarlyPrep);
        assert_eq!(ShiftTagging::Prep.tag(DayType::Weekend, 0), ShiftType::WeekendPrep);
        assert_eq!(ShiftTagging::DayType.tag(DayType::Weekend, 0), ShiftType::Weekend);
    }

    #[test]
    fn test_fairness_picks_employee_with_fewer_hours() {
        // single weekday, one manager needed; A already has 30h, B 10h
        let config = only(Role::Manager, 1, 1);
        let managers = staff(Role::Manager, &[1, 2]);
        let scheduler = RoleScheduler::new(RolePolicy::manager(), &config).unwrap();

        let mut state = RunState::new();
        state.commit(1, date(2025, 8, 25), 30.0);
        state.commit(2, date(2025, 8, 26), 10.0);

        let cohort = [state.hours(1), state.hours(2)];
        let ctx = DispatchContext::new(Role::Manager).with_cohort_hours(&cohort);
        assert!(score(&managers[1], 10.0, &ctx) > score(&managers[0], 30.0, &ctx));

        let out = scheduler
            .run_with_state(&managers, &[Shift::new(1, monday())], &mut state)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee_id, 2);
        assert!((state.hours(2) - 18.0).abs() < 1e-9);
        assert!((state.hours(1) - 30.0).abs() < 1e-9);

        // from an empty week the tie goes to the lowest id, then B is preferred
        let out = scheduler.run(&managers, &[Shift::new(1, monday()), Shift::new(2, date(2025, 9, 2))]).unwrap();
        assert_eq!(out[0].employee_id, 1);
        assert_eq!(out[1].employee_id, 2);
    }

    #[test]
    fn test_insufficient_staff_names_role_and_date() {
        let config = only(Role::Waiter, 2, 2);
        let waiters = staff(Role::Waiter, &[1]);
        let scheduler = RoleScheduler::new(RolePolicy::cohort(Role::Waiter), &config).unwrap();

        let err = scheduler.run(&waiters, &[Shift::new(1, monday())]).unwrap_err();
        match err {
            ScheduleError::InsufficientStaff { role, date, slot } => {
                assert_eq!(role, Role::Waiter);
                assert_eq!(date, monday());
                assert_eq!(slot, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_weekend_fallback_skips_slot() {
        let mut config = only(Role::Waiter, 1, 2);
        config.weekend_fallback.insert(
            Role::Waiter,
            FallbackRule {
                enabled: true,
                min_required: 1,
            },
        );
        let waiters = staff(Role::Waiter, &[1]);
        let scheduler = RoleScheduler::new(RolePolicy::cohort(Role::Waiter), &config).unwrap();

        let out = scheduler.run(&waiters, &[Shift::new(1, saturday())]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shift_type, ShiftType::WeekendSlot(1));
    }

    #[test]
    fn test_fallback_does_not_waive_required_slots_or_weekdays() {
        let mut config = only(Role::Waiter, 2, 1);
        config.weekend_fallback.insert(
            Role::Waiter,
            FallbackRule {
                enabled: true,
                min_required: 1,
            },
        );
        let scheduler = RoleScheduler::new(RolePolicy::cohort(Role::Waiter), &config).unwrap();

        // weekend slot 0 is below min_required
        let err = scheduler.run(&[], &[Shift::new(1, saturday())]).unwrap_err();
        assert!(matches!(err, ScheduleError::InsufficientStaff { slot: 0, .. }));

        // weekday shortfalls are never waived
        let one = staff(Role::Waiter, &[1]);
        let err = scheduler.run(&one, &[Shift::new(1, monday())]).unwrap_err();
        assert!(matches!(err, ScheduleError::InsufficientStaff { slot: 1, .. }));
    }

    #[test]
    fn test_staggered_weekend_windows() {
        let mut config = only(Role::Barista, 1, 2);
        config.role_time_windows.insert(
            Role::Barista,
            RoleWindows {
                weekday: Some(WindowSpec::Single(hm((7, 0), (15, 0)))),
                weekend_staggered: Some(vec![hm((7, 0), (12, 0)), hm((12, 0), (15, 0))]),
                ..RoleWindows::default()
            },
        );
        let baristas = staff(Role::Barista, &[1, 2, 3]);
        let scheduler = RoleScheduler::new(RolePolicy::cohort(Role::Barista), &config).unwrap();

        let out = scheduler.run(&baristas, &[Shift::new(1, saturday())]).unwrap();
        assert_eq!(out.len(), 2);
        assert_ne!(out[0].employee_id, out[1].employee_id);
        assert_eq!(out[0].start.time(), NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(out[0].end.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(out[1].start.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!(out[0].end <= out[1].start);
        assert_eq!(out[1].shift_type, ShiftType::WeekendSlot(2));
    }

    #[test]
    fn test_cap_limits_hours() {
        let mut config = only(Role::Sandwich, 1, 1);
        config.hours_policy.insert(
            Role::Sandwich,
            HoursPolicy {
                target_min: 0.0,
                target_max: 16.0,
                hard_cap: 16.0,
            },
        );
        let sandwich = staff(Role::Sandwich, &[1, 2]);
        let scheduler = RoleScheduler::new(RolePolicy::sandwich(), &config).unwrap();

        // four 8h days need at least two people under a 16h cap
        let out = scheduler.run(&sandwich, &week()[..4]).unwrap();
        assert_eq!(out.len(), 4);
        for id in [1, 2] {
            let hours: f64 = out
                .iter()
                .filter(|a| a.employee_id == id)
                .map(Assignment::duration_hours)
                .sum();
            assert!(hours <= 16.0 + 1e-9);
        }
        assert!(out.iter().all(|a| a.shift_type == ShiftType::EarlyPrep));

        // a fifth day exceeds what the cap allows
        assert!(scheduler.run(&sandwich, &week()[..5]).is_err());
    }

    #[test]
    fn test_ignores_other_roles() {
        let config = only(Role::Barista, 1, 1);
        let mut roster = staff(Role::Waiter, &[1, 2]);
        roster.extend(staff(Role::Barista, &[3]));
        let scheduler = RoleScheduler::new(RolePolicy::cohort(Role::Barista), &config).unwrap();

        let out = scheduler.run(&roster, &[Shift::new(1, monday())]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee_id, 3);
        assert_eq!(out[0].role, Role::Barista);
    }

    #[test]
    fn test_timestamps_carry_local_offset() {
        let config = only(Role::Manager, 1, 1);
        let scheduler = RoleScheduler::new(RolePolicy::manager(), &config).unwrap();
        let out = scheduler
            .run(&staff(Role::Manager, &[1]), &[Shift::new(1, monday())])
            .unwrap();
        // Sydney is UTC+10 in early September
        assert_eq!(out[0].start.to_rfc3339(), "2025-09-01T07:00:00+10:00");
        assert_eq!(out[0].end.to_rfc3339(), "2025-09-01T15:00:00+10:00");
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = SchedulerConfig::default();
        let baristas = staff(Role::Barista, &[5, 3, 9, 1]);
        let scheduler = RoleScheduler::new(RolePolicy::cohort(Role::Barista), &config).unwrap();
        let a = scheduler.run(&baristas, &week()).unwrap();
        let b = scheduler.run(&baristas, &week()).unwrap();
        assert_eq!(a, b);
    }
}
