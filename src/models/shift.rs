//! Shift model.
//!
//! A shift is "a day requiring staffing". It carries no trusted start/end
//! time: the engine derives concrete windows per role and slot.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A calendar day that requires staffing within a scheduling week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    #[serde(alias = "shift_id")]
    pub id: u32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Week label (ISO `YYYY-Www`).
    pub week_id: String,
}

/// Weekday vs weekend classification of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Saturday and Sunday are weekend days.
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    #[inline]
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayType::Weekend)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
        }
    }
}

impl Shift {
    /// Creates a shift, deriving the ISO week label from the date.
    pub fn new(id: u32, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            week_id: Self::week_id_for(date),
        }
    }

    /// Overrides the week label.
    pub fn with_week_id(mut self, week_id: impl Into<String>) -> Self {
        self.week_id = week_id.into();
        self
    }

    /// ISO week label for a date, e.g. `2025-W36`.
    pub fn week_id_for(date: NaiveDate) -> String {
        let iso = date.iso_week();
        format!("{}-W{:02}", iso.year(), iso.week())
    }

    #[inline]
    pub fn day_type(&self) -> DayType {
        DayType::of(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_id() {
        assert_eq!(Shift::week_id_for(date(2025, 9, 1)), "2025-W36");
        // ISO year differs from calendar year at the boundary
        assert_eq!(Shift::week_id_for(date(2024, 12, 30)), "2025-W01");
    }

    #[test]
    fn test_day_type() {
        assert_eq!(Shift::new(1, date(2025, 9, 5)).day_type(), DayType::Weekday); // Fri
        assert_eq!(Shift::new(2, date(2025, 9, 6)).day_type(), DayType::Weekend); // Sat
        assert!(DayType::of(date(2025, 9, 7)).is_weekend()); // Sun
    }

    #[test]
    fn test_week_id_override() {
        let s = Shift::new(1, date(2025, 9, 1)).with_week_id("custom");
        assert_eq!(s.week_id, "custom");
    }
}
