//! Assignment (engine output) model.
//!
//! An assignment places one employee on one shift for a concrete
//! time window. It has no identity until the caller persists it;
//! within one run, `(shift_id, employee_id)` is unique.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DayType, Role};

/// Kind of shift an assignment covers.
///
/// Serialized as a plain tag: `weekday`, `weekend`, `weekend_slot2`,
/// `early_prep`, `weekend_prep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ShiftType {
    Weekday,
    Weekend,
    /// Staggered weekend slot, numbered from 1.
    WeekendSlot(u32),
    EarlyPrep,
    WeekendPrep,
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftType::Weekday => f.write_str("weekday"),
            ShiftType::Weekend => f.write_str("weekend"),
            ShiftType::WeekendSlot(n) => write!(f, "weekend_slot{n}"),
            ShiftType::EarlyPrep => f.write_str("early_prep"),
            ShiftType::WeekendPrep => f.write_str("weekend_prep"),
        }
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekday" => Ok(ShiftType::Weekday),
            "weekend" => Ok(ShiftType::Weekend),
            "early_prep" => Ok(ShiftType::EarlyPrep),
            "weekend_prep" => Ok(ShiftType::WeekendPrep),
            other => other
                .strip_prefix("weekend_slot")
                .and_then(|n| n.parse().ok())
                .map(ShiftType::WeekendSlot)
                .ok_or_else(|| format!("unknown shift type '{other}'")),
        }
    }
}

impl From<ShiftType> for String {
    fn from(value: ShiftType) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ShiftType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An employee placed on a shift for a concrete time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Covered shift.
    pub shift_id: u32,
    /// Assigned employee.
    #[serde(alias = "emp_id")]
    pub employee_id: u32,
    /// Start timestamp (local time with offset).
    pub start: DateTime<FixedOffset>,
    /// End timestamp (local time with offset).
    pub end: DateTime<FixedOffset>,
    /// Role the employee works in this assignment.
    pub role: Role,
    pub shift_type: ShiftType,
    pub day_type: DayType,
}

impl Assignment {
    /// Dedupe key.
    #[inline]
    pub fn key(&self) -> (u32, u32) {
        (self.shift_id, self.employee_id)
    }

    /// Calendar date of the assignment (local).
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Duration in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }
}
