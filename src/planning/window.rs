//! Time window resolution.
//!
//! Picks the concrete (start, end) window for a role, date and slot.
//!
//! # Resolution Order
//! 1. Role has no configured windows → config default window.
//! 2. Weekend date:
//!    - `weekend_staggered[slot]` if the list covers the slot;
//!    - `weekend` (list entry for the slot, or the single window).
//! 3. `weekday` (list entry for the slot, or the single window).
//!    Weekend dates reach this step when nothing above matched.
//! 4. Config default window.
//!
//! Resolution never fails. Validated configs only contain windows with
//! `start < end`, so every resolved window is non-empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::models::{DayType, Role, ShiftWindow};

/// A window table entry: one window for every slot, or one per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindowSpec {
    Single(ShiftWindow),
    Slots(Vec<ShiftWindow>),
}

impl WindowSpec {
    /// Window for a slot. Out-of-range slots of a list resolve to `None`.
    pub fn for_slot(&self, slot: usize) -> Option<ShiftWindow> {
        match self {
            WindowSpec::Single(window) => Some(*window),
            WindowSpec::Slots(windows) => windows.get(slot).copied(),
        }
    }

    pub(crate) fn windows(&self) -> &[ShiftWindow] {
        match self {
            WindowSpec::Single(window) => std::slice::from_ref(window),
            WindowSpec::Slots(windows) => windows,
        }
    }
}

/// Configured windows for one role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWindows {
    pub weekday: Option<WindowSpec>,
    pub weekend: Option<WindowSpec>,
    /// Ordered staggered weekend slots.
    pub weekend_staggered: Option<Vec<ShiftWindow>>,
}

impl RoleWindows {
    pub fn is_empty(&self) -> bool {
        self.weekday.is_none() && self.weekend.is_none() && self.weekend_staggered.is_none()
    }

    pub(crate) fn all(&self) -> impl Iterator<Item = &ShiftWindow> {
        self.weekday
            .iter()
            .chain(self.weekend.iter())
            .flat_map(WindowSpec::windows)
            .chain(self.weekend_staggered.iter().flatten())
    }
}

/// Resolves the working window for `role` on `date`, slot `slot`.
pub fn resolve_window(
    role: Role,
    date: NaiveDate,
    slot: usize,
    config: &SchedulerConfig,
) -> ShiftWindow {
    let default = config.default_shift.window();
    let windows = match config.role_time_windows.get(&role) {
        Some(windows) if !windows.is_empty() => windows,
        _ => return default,
    };

    if DayType::of(date).is_weekend() {
        let staggered = windows
            .weekend_staggered
            .as_ref()
            .and_then(|list| list.get(slot).copied());
        if let Some(window) = staggered {
            return window;
        }
        if let Some(window) = windows.weekend.as_ref().and_then(|w| w.for_slot(slot)) {
            return window;
        }
    }

    windows
        .weekday
        .as_ref()
        .and_then(|w| w.for_slot(slot))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(start: (u32, u32), end: (u32, u32)) -> ShiftWindow {
        ShiftWindow::from_hm(start, end).unwrap()
    }

    fn config_with(role: Role, windows: RoleWindows) -> SchedulerConfig {
        let mut config = SchedulerConfig::default();
        config.role_time_windows.insert(role, windows);
        config
    }

    fn monday() -> NaiveDate {
        date(2025, 9, 1)
    }

    fn saturday() -> NaiveDate {
        date(2025, 9, 6)
    }

    #[test]
    fn test_unconfigured_role_uses_default() {
        let config = SchedulerConfig::default();
        let w = resolve_window(Role::Manager, monday(), 0, &config);
        assert_eq!(w, hm((7, 0), (15, 0)));
    }

    #[test]
    fn test_weekend_staggered_slots() {
        let config = config_with(
            Role::Barista,
            RoleWindows {
                weekday: Some(WindowSpec::Single(hm((7, 0), (15, 0)))),
                weekend_staggered: Some(vec![hm((7, 0), (12, 0)), hm((11, 0), (15, 0))]),
                ..RoleWindows::default()
            },
        );
        assert_eq!(resolve_window(Role::Barista, saturday(), 0, &config), hm((7, 0), (12, 0)));
        assert_eq!(resolve_window(Role::Barista, saturday(), 1, &config), hm((11, 0), (15, 0)));
        // slot beyond the staggered list falls through to the weekday window
        assert_eq!(resolve_window(Role::Barista, saturday(), 2, &config), hm((7, 0), (15, 0)));
    }

    #[test]
    fn test_weekend_single_window() {
        let config = config_with(
            Role::Sandwich,
            RoleWindows {
                weekday: Some(WindowSpec::Single(hm((5, 0), (12, 0)))),
                weekend: Some(WindowSpec::Single(hm((5, 0), (13, 30)))),
                ..RoleWindows::default()
            },
        );
        assert_eq!(resolve_window(Role::Sandwich, saturday(), 3, &config), hm((5, 0), (13, 30)));
        assert_eq!(resolve_window(Role::Sandwich, monday(), 0, &config), hm((5, 0), (12, 0)));
    }

    #[test]
    fn test_weekend_slot_list() {
        let config = config_with(
            Role::Waiter,
            RoleWindows {
                weekday: Some(WindowSpec::Single(hm((9, 0), (17, 0)))),
                weekend: Some(WindowSpec::Slots(vec![hm((8, 0), (13, 0)), hm((12, 0), (17, 0))])),
                ..RoleWindows::default()
            },
        );
        assert_eq!(resolve_window(Role::Waiter, saturday(), 0, &config), hm((8, 0), (13, 0)));
        assert_eq!(resolve_window(Role::Waiter, saturday(), 1, &config), hm((12, 0), (17, 0)));
        // past the end of the weekend list: weekday window
        assert_eq!(resolve_window(Role::Waiter, saturday(), 2, &config), hm((9, 0), (17, 0)));
        assert_eq!(resolve_window(Role::Waiter, monday(), 1, &config), hm((9, 0), (17, 0)));
    }

    #[test]
    fn test_weekday_list_out_of_range_uses_default() {
        let config = config_with(
            Role::Waiter,
            RoleWindows {
                weekday: Some(WindowSpec::Slots(vec![hm((8, 0), (14, 0))])),
                ..RoleWindows::default()
            },
        );
        assert_eq!(resolve_window(Role::Waiter, monday(), 0, &config), hm((8, 0), (14, 0)));
        assert_eq!(resolve_window(Role::Waiter, monday(), 1, &config), hm((7, 0), (15, 0)));
    }

    #[test]
    fn test_staggered_ignored_on_weekdays() {
        let config = config_with(
            Role::Barista,
            RoleWindows {
                weekend_staggered: Some(vec![hm((7, 0), (12, 0))]),
                ..RoleWindows::default()
            },
        );
        assert_eq!(resolve_window(Role::Barista, monday(), 0, &config), hm((7, 0), (15, 0)));
    }

    #[test]
    fn test_window_spec_yaml_shapes() {
        let yaml = "weekday:\n  start: \"07:00\"\n  end: \"15:00\"\nweekend:\n  - start: \"07:00\"\n    end: \"12:00\"\n  - start: \"11:00\"\n    end: \"15:00\"\n";
        let windows: RoleWindows = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(windows.weekday, Some(WindowSpec::Single(_))));
        assert!(matches!(windows.weekend, Some(WindowSpec::Slots(ref v)) if v.len() == 2));
        assert_eq!(windows.all().count(), 3);
    }
}
