//! Demand resolution.
//!
//! Maps a date to per-role headcounts and a day profile.
//!
//! # Precedence
//! - Headcount: weekday/weekend defaults, then date-keyed overrides merged
//!   on top (an override only replaces the roles it names).
//! - Day profile: a date-keyed override replaces the whole profile;
//!   otherwise the weekday table entry applies.
//!
//! Both lookups are pure: the same date and config always resolve to the
//! same result.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SchedulerConfig;
use crate::models::{DayType, Role, Skill};

/// Expected customer traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traffic {
    #[serde(alias = "LOW", alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(alias = "HIGH", alias = "High")]
    High,
}

/// Dominant kind of demand on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Specialty {
    #[serde(alias = "COFFEE", alias = "coffee")]
    Coffee,
    #[serde(alias = "SANDWICHES", alias = "Sandwich", alias = "SANDWICH", alias = "sandwich")]
    Sandwiches,
    #[default]
    #[serde(alias = "MIXED", alias = "mixed")]
    Mixed,
}

impl Specialty {
    /// Demand label for the role that dominates a day.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Barista => Specialty::Coffee,
            Role::Sandwich => Specialty::Sandwiches,
            _ => Specialty::Mixed,
        }
    }
}

/// Per-day skill multipliers and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayProfile {
    pub coffee: f64,
    pub sandwich: f64,
    pub speed: f64,
    pub customer_service: f64,
    /// Normalised fitness below this counts as a skill mismatch.
    pub threshold: f64,
    pub traffic: Traffic,
    pub primary: Specialty,
    /// Expected share of staff available (0.0..=1.0).
    pub availability: f64,
}

impl Default for DayProfile {
    fn default() -> Self {
        Self {
            coffee: 1.0,
            sandwich: 1.0,
            speed: 1.0,
            customer_service: 1.0,
            threshold: 0.70,
            traffic: Traffic::Medium,
            primary: Specialty::Mixed,
            availability: 0.80,
        }
    }
}

impl DayProfile {
    /// Multiplier applied to a skill weight on this day.
    pub fn multiplier(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Coffee => self.coffee,
            Skill::Sandwich => self.sandwich,
            Skill::CustomerService => self.customer_service,
            Skill::Speed => self.speed,
        }
    }
}

/// Day profiles by weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekdayProfiles {
    #[serde(rename = "MON", alias = "Mon", alias = "mon")]
    pub mon: DayProfile,
    #[serde(rename = "TUE", alias = "Tue", alias = "tue")]
    pub tue: DayProfile,
    #[serde(rename = "WED", alias = "Wed", alias = "wed")]
    pub wed: DayProfile,
    #[serde(rename = "THU", alias = "Thu", alias = "thu")]
    pub thu: DayProfile,
    #[serde(rename = "FRI", alias = "Fri", alias = "fri")]
    pub fri: DayProfile,
    #[serde(rename = "SAT", alias = "Sat", alias = "sat")]
    pub sat: DayProfile,
    #[serde(rename = "SUN", alias = "Sun", alias = "sun")]
    pub sun: DayProfile,
}

impl Default for WeekdayProfiles {
    /// Neutral Monday-Thursday; Friday-Sunday lean towards coffee.
    fn default() -> Self {
        Self {
            mon: DayProfile::default(),
            tue: DayProfile::default(),
            wed: DayProfile::default(),
            thu: DayProfile::default(),
            fri: DayProfile {
                traffic: Traffic::High,
                coffee: 1.3,
                speed: 1.1,
                threshold: 0.75,
                availability: 0.90,
                primary: Specialty::Coffee,
                ..DayProfile::default()
            },
            sat: DayProfile {
                traffic: Traffic::High,
                coffee: 1.4,
                sandwich: 1.1,
                speed: 1.1,
                threshold: 0.75,
                availability: 0.95,
                primary: Specialty::Coffee,
                ..DayProfile::default()
            },
            sun: DayProfile {
                traffic: Traffic::Medium,
                coffee: 1.2,
                customer_service: 1.1,
                threshold: 0.70,
                availability: 0.85,
                primary: Specialty::Coffee,
                ..DayProfile::default()
            },
        }
    }
}

impl WeekdayProfiles {
    pub fn get(&self, weekday: Weekday) -> &DayProfile {
        match weekday {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Weekday, &DayProfile)> {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(move |wd| (wd, self.get(wd)))
    }
}

/// Weekday profile table plus date-keyed overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandConfig {
    pub weekdays: WeekdayProfiles,
    pub overrides: BTreeMap<NaiveDate, DayProfile>,
}

/// Resolved demand for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayDemand {
    pub date: NaiveDate,
    pub day_type: DayType,
    /// Required headcount per role. Roles not present need nobody.
    pub requirements: BTreeMap<Role, u32>,
    pub profile: DayProfile,
}

impl DayDemand {
    /// Headcount required for a role (0 if not configured).
    #[inline]
    pub fn needed(&self, role: Role) -> u32 {
        self.requirements.get(&role).copied().unwrap_or(0)
    }
}

/// Resolves per-role headcounts and the day profile for a date.
pub fn resolve_demand(date: NaiveDate, config: &SchedulerConfig) -> DayDemand {
    DayDemand {
        date,
        day_type: DayType::of(date),
        requirements: resolve_requirements(date, config),
        profile: resolve_day_profile(date, config).clone(),
    }
}

/// Per-role headcounts: day-type defaults with date overrides merged on top.
pub fn resolve_requirements(date: NaiveDate, config: &SchedulerConfig) -> BTreeMap<Role, u32> {
    let mut requirements = if DayType::of(date).is_weekend() {
        config.weekend_requirements.clone()
    } else {
        config.default_requirements.clone()
    };
    if let Some(overrides) = config.overrides.get(&date) {
        requirements.extend(overrides.iter().map(|(role, count)| (*role, *count)));
    }
    requirements
}

/// Day profile: date override, else weekday table entry.
pub fn resolve_day_profile(date: NaiveDate, config: &SchedulerConfig) -> &DayProfile {
    config
        .demand
        .overrides
        .get(&date)
        .unwrap_or_else(|| config.demand.weekdays.get(date.weekday()))
}
