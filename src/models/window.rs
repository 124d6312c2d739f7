//! Time-of-day shift windows.
//!
//! A window is a half-open interval [start, end) within one calendar day.
//! Windows never cross midnight: a valid window has `start < end`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A working window within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Window start (inclusive).
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Window end (exclusive).
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl ShiftWindow {
    /// Creates a new window.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Creates a window from hour/minute pairs. Returns `None` on an invalid time.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
            end: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
        })
    }

    /// Whether `start < end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Duration in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Serde adapter for `HH:MM` (also accepts `HH:MM:SS`).
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }
}
