//! Scheduler configuration.
//!
//! A typed, validated configuration loaded once per run. Every field has
//! a default, so a config file only needs to name what it changes.
//!
//! # Formats
//! `.yaml`/`.yml` files are read with `serde_yaml`, `.json` with
//! `serde_json`. Times are written `HH:MM`; role keys are upper-case
//! (`MANAGER`, `BARISTA`, `WAITER`, `SANDWICH`).
//!
//! # Effective Cap
//! The weekly-hour ceiling for an employee is the role's
//! `hours_policy.hard_cap`, else `global_hard_cap`, else
//! [`DEFAULT_HOURS_CEILING`].

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::models::{hhmm, Role, ShiftWindow};
use crate::planning::{DemandConfig, RoleWindows};

/// Weekly-hour ceiling when neither a role nor a global cap is configured.
pub const DEFAULT_HOURS_CEILING: f64 = 50.0;

/// Fallback window used when a role has no window for a date/slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultShift {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub duration_hours: f64,
}

impl Default for DefaultShift {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN),
            duration_hours: 8.0,
        }
    }
}

impl DefaultShift {
    #[inline]
    pub fn window(&self) -> ShiftWindow {
        ShiftWindow::new(self.start, self.end)
    }
}

/// Per-role weekly hours targets and cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursPolicy {
    pub target_min: f64,
    pub target_max: f64,
    pub hard_cap: f64,
}

/// Scoring weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Flat bonus for the MANAGER role.
    pub manager_weight: f64,
    pub coffee: f64,
    pub sandwich: f64,
    pub speed: f64,
    pub customer_service: f64,
    /// Penalty per cohort standard deviation above the median hours.
    pub fairness_penalty_per_std_above_median: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            manager_weight: 1.0,
            coffee: 1.0,
            sandwich: 1.0,
            speed: 0.5,
            customer_service: 0.5,
            fairness_penalty_per_std_above_median: 0.25,
        }
    }
}

/// Per-hour penalties for straying outside a role's target band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursPenalties {
    pub per_hour_below_target: f64,
    pub per_hour_above_target: f64,
}

impl Default for HoursPenalties {
    fn default() -> Self {
        Self {
            per_hour_below_target: 0.5,
            per_hour_above_target: 0.75,
        }
    }
}

/// Permission to leave weekend slots unfilled when understaffed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    #[serde(default)]
    pub enabled: bool,
    /// Slots below this index must still be filled.
    #[serde(default = "default_min_required")]
    pub min_required: u32,
}

fn default_min_required() -> u32 {
    1
}

impl FallbackRule {
    /// Whether a shortfall at `slot` may be skipped.
    #[inline]
    pub fn waives(&self, slot: u32) -> bool {
        self.enabled && slot >= self.min_required
    }
}

/// Complete scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// IANA timezone for assignment timestamps.
    pub timezone: String,
    pub default_shift: DefaultShift,
    /// Weekday headcount per role. Roles a loaded file leaves out keep
    /// their built-in headcount; an explicit `0` means nobody.
    #[serde(deserialize_with = "weekday_requirements")]
    pub default_requirements: BTreeMap<Role, u32>,
    /// Saturday/Sunday headcount per role, filled the same way.
    #[serde(deserialize_with = "weekend_requirements")]
    pub weekend_requirements: BTreeMap<Role, u32>,
    /// Date-keyed headcount overrides, merged over the day-type defaults.
    pub overrides: BTreeMap<NaiveDate, BTreeMap<Role, u32>>,
    pub role_time_windows: BTreeMap<Role, RoleWindows>,
    pub hours_policy: BTreeMap<Role, HoursPolicy>,
    pub global_hard_cap: Option<f64>,
    pub weights: Weights,
    pub hours_penalties: HoursPenalties,
    pub weekend_fallback: BTreeMap<Role, FallbackRule>,
    pub demand: DemandConfig,
}

fn builtin_weekday_requirements() -> BTreeMap<Role, u32> {
    BTreeMap::from([
        (Role::Manager, 1),
        (Role::Barista, 2),
        (Role::Waiter, 1),
        (Role::Sandwich, 1),
    ])
}

fn builtin_weekend_requirements() -> BTreeMap<Role, u32> {
    BTreeMap::from([
        (Role::Manager, 2),
        (Role::Barista, 1),
        (Role::Waiter, 2),
        (Role::Sandwich, 1),
    ])
}

fn weekday_requirements<'de, D>(deserializer: D) -> Result<BTreeMap<Role, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    merge_requirements(deserializer, builtin_weekday_requirements())
}

fn weekend_requirements<'de, D>(deserializer: D) -> Result<BTreeMap<Role, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    merge_requirements(deserializer, builtin_weekend_requirements())
}

/// Overlays a partial headcount map on `base`.
fn merge_requirements<'de, D>(
    deserializer: D,
    mut base: BTreeMap<Role, u32>,
) -> Result<BTreeMap<Role, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    base.extend(BTreeMap::<Role, u32>::deserialize(deserializer)?);
    Ok(base)
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: "Australia/Sydney".to_string(),
            default_shift: DefaultShift::default(),
            default_requirements: builtin_weekday_requirements(),
            weekend_requirements: builtin_weekend_requirements(),
            overrides: BTreeMap::new(),
            role_time_windows: BTreeMap::new(),
            hours_policy: BTreeMap::new(),
            global_hard_cap: None,
            weights: Weights::default(),
            hours_penalties: HoursPenalties::default(),
            weekend_fallback: BTreeMap::new(),
            demand: DemandConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Loads and validates a config file, picking the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&raw)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parsed timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::invalid("timezone", format!("unknown timezone '{}'", self.timezone)))
    }

    #[inline]
    pub fn hours_policy_for(&self, role: Role) -> Option<&HoursPolicy> {
        self.hours_policy.get(&role)
    }

    #[inline]
    pub fn fallback_for(&self, role: Role) -> Option<&FallbackRule> {
        self.weekend_fallback.get(&role)
    }

    /// Binding weekly-hour ceiling for employees of `role`.
    pub fn effective_cap(&self, role: Role) -> f64 {
        self.hours_policy_for(role)
            .map(|p| p.hard_cap)
            .or(self.global_hard_cap)
            .unwrap_or(DEFAULT_HOURS_CEILING)
    }

    /// Checks internal consistency. Called by every loader.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tz()?;

        let ds = &self.default_shift;
        if !(ds.duration_hours.is_finite() && ds.duration_hours > 0.0) {
            return Err(ConfigError::invalid(
                "default_shift.duration_hours",
                "must be positive",
            ));
        }
        if ds.start >= ds.end {
            return Err(ConfigError::invalid(
                "default_shift",
                "start must be before end",
            ));
        }

        for (role, windows) in &self.role_time_windows {
            if let Some(bad) = windows.all().find(|w| !w.is_valid()) {
                return Err(ConfigError::invalid(
                    format!("role_time_windows.{role}"),
                    format!(
                        "window {}-{} must start before it ends",
                        bad.start.format("%H:%M"),
                        bad.end.format("%H:%M")
                    ),
                ));
            }
        }

        for (role, policy) in &self.hours_policy {
            let field = format!("hours_policy.{role}");
            let bounds = [policy.target_min, policy.target_max, policy.hard_cap];
            if bounds.iter().any(|v| !v.is_finite()) {
                return Err(ConfigError::invalid(field, "hours must be finite numbers"));
            }
            if policy.hard_cap <= 0.0 {
                return Err(ConfigError::invalid(field, "hard_cap must be positive"));
            }
            if policy.target_min < 0.0 {
                return Err(ConfigError::invalid(field, "target_min must not be negative"));
            }
            if policy.target_min > policy.target_max {
                return Err(ConfigError::invalid(field, "target_min > target_max"));
            }
        }

        if let Some(cap) = self.global_hard_cap {
            if !(cap.is_finite() && cap > 0.0) {
                return Err(ConfigError::invalid("global_hard_cap", "must be a positive number"));
            }
        }

        let w = &self.weights;
        let weights = [
            ("manager_weight", w.manager_weight),
            ("coffee", w.coffee),
            ("sandwich", w.sandwich),
            ("speed", w.speed),
            ("customer_service", w.customer_service),
            (
                "fairness_penalty_per_std_above_median",
                w.fairness_penalty_per_std_above_median,
            ),
            ("per_hour_below_target", self.hours_penalties.per_hour_below_target),
            ("per_hour_above_target", self.hours_penalties.per_hour_above_target),
        ];
        if let Some((name, _)) = weights.iter().find(|(_, v)| *v < 0.0 || !v.is_finite()) {
            return Err(ConfigError::invalid(name.to_string(), "must be a non-negative number"));
        }

        let profiles = self
            .demand
            .weekdays
            .iter()
            .map(|(wd, p)| (wd.to_string(), p))
            .chain(self.demand.overrides.iter().map(|(d, p)| (d.to_string(), p)));
        for (key, profile) in profiles {
            if !(0.0..=1.0).contains(&profile.availability) {
                return Err(ConfigError::invalid(
                    format!("demand.{key}.availability"),
                    "must be within 0..=1",
                ));
            }
        }

        Ok(())
    }
}
