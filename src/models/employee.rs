//! Employee model.
//!
//! Employees are the staff members assigned to shifts. Each has exactly
//! one primary role and up to four skill scores. Skills that make no sense
//! for a role (a manager's sandwich skill, say) may simply be absent.
//!
//! # Skill Scale
//! Scores are stored on a 0-100 scale. The scoring engine rescales them
//! to 0.0-1.0 before weighting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role. Every employee has exactly one primary role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Shift supervisor.
    #[serde(alias = "manager", alias = "Manager")]
    Manager,
    /// Coffee station.
    #[serde(alias = "barista", alias = "Barista")]
    Barista,
    /// Floor service.
    #[serde(alias = "waiter", alias = "Waiter")]
    Waiter,
    /// Early-morning sandwich prep.
    #[serde(alias = "sandwich", alias = "Sandwich")]
    Sandwich,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 4] = [Role::Manager, Role::Barista, Role::Waiter, Role::Sandwich];

    /// Upper-case identifier used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Barista => "BARISTA",
            Role::Waiter => "WAITER",
            Role::Sandwich => "SANDWICH",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MANAGER" => Ok(Role::Manager),
            "BARISTA" => Ok(Role::Barista),
            "WAITER" => Ok(Role::Waiter),
            "SANDWICH" => Ok(Role::Sandwich),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// A scored skill dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    Coffee,
    Sandwich,
    CustomerService,
    Speed,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Coffee,
        Skill::Sandwich,
        Skill::CustomerService,
        Skill::Speed,
    ];
}

/// Skill scores (0-100). `None` = not rated for this employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default, alias = "skill_coffee")]
    pub coffee: Option<f64>,
    #[serde(default, alias = "skill_sandwich")]
    pub sandwich: Option<f64>,
    #[serde(default, alias = "customer_service_rating")]
    pub customer_service: Option<f64>,
    #[serde(default, alias = "skill_speed")]
    pub speed: Option<f64>,
}

impl SkillSet {
    /// Returns the score for a skill, if rated.
    pub fn get(&self, skill: Skill) -> Option<f64> {
        match skill {
            Skill::Coffee => self.coffee,
            Skill::Sandwich => self.sandwich,
            Skill::CustomerService => self.customer_service,
            Skill::Speed => self.speed,
        }
    }

    /// Sets a skill score, clamped to 0-100.
    pub fn set(&mut self, skill: Skill, score: f64) {
        let score = Some(score.clamp(0.0, 100.0));
        match skill {
            Skill::Coffee => self.coffee = score,
            Skill::Sandwich => self.sandwich = score,
            Skill::CustomerService => self.customer_service = score,
            Skill::Speed => self.speed = score,
        }
    }
}

/// A staff member who can be assigned to shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier. Also the deterministic tie-breaker.
    #[serde(alias = "employee_id")]
    pub id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Primary role. Schedulers only consider employees whose primary role matches.
    #[serde(alias = "primary_role")]
    pub role: Role,
    /// Skill scores.
    #[serde(flatten)]
    pub skills: SkillSet,
}

impl Employee {
    /// Creates an employee with no name and no rated skills.
    pub fn new(id: u32, role: Role) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            role,
            skills: SkillSet::default(),
        }
    }

    /// Sets first and last name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Rates a skill (clamped to 0-100).
    pub fn with_skill(mut self, skill: Skill, score: f64) -> Self {
        self.skills.set(skill, score);
        self
    }

    /// "First Last", or `#id` when unnamed.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            format!("#{}", self.id)
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_builder() {
        let e = Employee::new(7, Role::Barista)
            .with_name("Ada", "Lovelace")
            .with_skill(Skill::Coffee, 92.0)
            .with_skill(Skill::Speed, 150.0);

        assert_eq!(e.id, 7);
        assert_eq!(e.role, Role::Barista);
        assert_eq!(e.display_name(), "Ada Lovelace");
        assert_eq!(e.skills.get(Skill::Coffee), Some(92.0));
        assert_eq!(e.skills.get(Skill::Speed), Some(100.0));
        assert_eq!(e.skills.get(Skill::Sandwich), None);
    }

    #[test]
    fn test_unnamed_display() {
        assert_eq!(Employee::new(3, Role::Waiter).display_name(), "#3");
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("manager".parse::<Role>(), Ok(Role::Manager));
        assert_eq!(" SANDWICH ".parse::<Role>(), Ok(Role::Sandwich));
        assert!("chef".parse::<Role>().is_err());
        assert_eq!(Role::Waiter.to_string(), "WAITER");
    }

    #[test]
    fn test_employee_deserialize_flat_skills() {
        let json = r#"{
            "employee_id": 1001,
            "first_name": "Sam",
            "last_name": "Lee",
            "primary_role": "MANAGER",
            "skill_coffee": 80.0,
            "customer_service_rating": 90.0
        }"#;
        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, 1001);
        assert_eq!(e.role, Role::Manager);
        assert_eq!(e.skills.coffee, Some(80.0));
        assert_eq!(e.skills.customer_service, Some(90.0));
        assert_eq!(e.skills.sandwich, None);
    }
}
