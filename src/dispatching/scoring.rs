//! Candidate scoring.
//!
//! # Formula
//!
//! ```text
//! score = fitness - fairness_penalty - hours_penalty
//!
//! fitness          = Σ weight[s] · profile[s] · skill[s] / 100   (+ manager_weight for MANAGER)
//! fairness_penalty = f · (h - median) / σ      when h > median  (σ = 0 → raw excess)
//! hours_penalty    = below · (target_min - h)  when h < target_min
//!                  | above · (h - target_max)  when h > target_max
//! ```
//!
//! Higher is better. Unrated skills contribute zero, so the score is
//! total for every employee.

use super::DispatchContext;
use crate::config::{HoursPenalties, HoursPolicy, Weights};
use crate::models::{Employee, Role, Skill};
use crate::planning::DayProfile;

/// Scale of stored skill scores.
const SKILL_SCALE: f64 = 100.0;

fn skill_weight(weights: &Weights, skill: Skill) -> f64 {
    match skill {
        Skill::Coffee => weights.coffee,
        Skill::Sandwich => weights.sandwich,
        Skill::CustomerService => weights.customer_service,
        Skill::Speed => weights.speed,
    }
}

/// Skill part of the score: profile-weighted skills plus the manager bonus.
pub fn role_fitness(employee: &Employee, role: Role, weights: &Weights, profile: &DayProfile) -> f64 {
    let skills: f64 = Skill::ALL
        .iter()
        .map(|&skill| {
            let value = employee.skills.get(skill).unwrap_or(0.0) / SKILL_SCALE;
            skill_weight(weights, skill) * profile.multiplier(skill) * value
        })
        .sum();

    if role == Role::Manager {
        skills + weights.manager_weight
    } else {
        skills
    }
}

/// Fitness scaled into 0..=1 by the best fitness the weights allow.
pub fn normalized_fitness(
    employee: &Employee,
    role: Role,
    weights: &Weights,
    profile: &DayProfile,
) -> f64 {
    let mut max: f64 = Skill::ALL
        .iter()
        .map(|&skill| skill_weight(weights, skill))
        .sum();
    if role == Role::Manager {
        max += weights.manager_weight;
    }
    let max = if max > 0.0 { max } else { 1.0 };
    (role_fitness(employee, role, weights, profile) / max).clamp(0.0, 1.0)
}

/// Penalty for working more than the cohort median.
pub fn fairness_penalty(hours: f64, median: f64, std_dev: f64, per_std: f64) -> f64 {
    let excess = hours - median;
    if excess <= 0.0 {
        return 0.0;
    }
    if std_dev > 0.0 {
        per_std * excess / std_dev
    } else {
        per_std * excess
    }
}

/// Penalty for sitting outside the role's target band.
pub fn hours_penalty(hours: f64, policy: Option<&HoursPolicy>, penalties: &HoursPenalties) -> f64 {
    let Some(policy) = policy else {
        return 0.0;
    };
    if hours < policy.target_min {
        penalties.per_hour_below_target * (policy.target_min - hours)
    } else if hours > policy.target_max {
        penalties.per_hour_above_target * (hours - policy.target_max)
    } else {
        0.0
    }
}

/// Full candidate score given the candidate's current weekly hours.
pub fn score(employee: &Employee, hours: f64, ctx: &DispatchContext) -> f64 {
    let fitness = role_fitness(employee, ctx.role, &ctx.weights, &ctx.profile);
    let fairness = fairness_penalty(
        hours,
        ctx.cohort.median,
        ctx.cohort.std_dev,
        ctx.weights.fairness_penalty_per_std_above_median,
    );
    let band = hours_penalty(hours, ctx.hours_policy.as_ref(), &ctx.penalties);
    fitness - fairness - band
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(id: u32, skill: f64) -> Employee {
        Employee::new(id, Role::Manager)
            .with_skill(Skill::Coffee, skill)
            .with_skill(Skill::CustomerService, skill)
            .with_skill(Skill::Speed, skill)
    }

    #[test]
    fn test_role_fitness_weighted_sum() {
        let e = Employee::new(1, Role::Barista)
            .with_skill(Skill::Coffee, 80.0)
            .with_skill(Skill::Speed, 60.0);
        let f = role_fitness(&e, Role::Barista, &Weights::default(), &DayProfile::default());
        // 1.0 * 0.8 + 0.5 * 0.6, sandwich and service unrated
        assert!((f - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_manager_bonus_and_profile() {
        let e = manager(1, 100.0);
        let profile = DayProfile {
            coffee: 2.0,
            ..DayProfile::default()
        };
        let f = role_fitness(&e, Role::Manager, &Weights::default(), &profile);
        // coffee 2.0 + service 0.5 + speed 0.5 + manager 1.0
        assert!((f - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_fitness() {
        let weights = Weights::default();
        let profile = DayProfile::default();
        let perfect = Employee::new(1, Role::Waiter)
            .with_skill(Skill::Coffee, 100.0)
            .with_skill(Skill::Sandwich, 100.0)
            .with_skill(Skill::CustomerService, 100.0)
            .with_skill(Skill::Speed, 100.0);
        assert!((normalized_fitness(&perfect, Role::Waiter, &weights, &profile) - 1.0).abs() < 1e-9);

        let blank = Employee::new(2, Role::Waiter);
        assert!(normalized_fitness(&blank, Role::Waiter, &weights, &profile).abs() < 1e-9);

        // boosted profile would exceed 1 without the clamp
        let boosted = DayProfile {
            coffee: 3.0,
            ..DayProfile::default()
        };
        assert!((normalized_fitness(&perfect, Role::Waiter, &weights, &boosted) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_fitness_zero_weights() {
        let weights = Weights {
            manager_weight: 0.0,
            coffee: 0.0,
            sandwich: 0.0,
            speed: 0.0,
            customer_service: 0.0,
            fairness_penalty_per_std_above_median: 0.0,
        };
        let e = manager(1, 90.0);
        assert!(normalized_fitness(&e, Role::Manager, &weights, &DayProfile::default()).abs() < 1e-9);
    }

    #[test]
    fn test_fairness_penalty() {
        assert_eq!(fairness_penalty(10.0, 20.0, 10.0, 0.25), 0.0);
        assert_eq!(fairness_penalty(20.0, 20.0, 10.0, 0.25), 0.0);
        assert!((fairness_penalty(30.0, 20.0, 10.0, 0.25) - 0.25).abs() < 1e-9);
        // zero spread falls back to the raw excess
        assert!((fairness_penalty(8.0, 0.0, 0.0, 0.25) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hours_penalty() {
        let policy = HoursPolicy {
            target_min: 16.0,
            target_max: 32.0,
            hard_cap: 40.0,
        };
        let penalties = HoursPenalties::default();
        assert!((hours_penalty(10.0, Some(&policy), &penalties) - 3.0).abs() < 1e-9);
        assert_eq!(hours_penalty(20.0, Some(&policy), &penalties), 0.0);
        assert!((hours_penalty(36.0, Some(&policy), &penalties) - 3.0).abs() < 1e-9);
        assert_eq!(hours_penalty(0.0, None, &penalties), 0.0);
    }

    #[test]
    fn test_fairness_prefers_fewer_hours() {
        let a = manager(1, 80.0);
        let b = manager(2, 80.0);
        let ctx = DispatchContext::new(Role::Manager).with_cohort_hours(&[30.0, 10.0]);
        assert!(score(&b, 10.0, &ctx) > score(&a, 30.0, &ctx));
    }

    #[test]
    fn test_score_is_deterministic() {
        let e = manager(1, 75.0);
        let ctx = DispatchContext::new(Role::Manager).with_cohort_hours(&[8.0, 0.0, 16.0]);
        assert_eq!(score(&e, 8.0, &ctx), score(&e, 8.0, &ctx));
    }
}
