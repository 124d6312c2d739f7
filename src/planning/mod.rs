//! Per-date planning inputs.
//!
//! Pure resolvers that turn a date and a config into what the role
//! schedulers need: how many people per role, which skills matter more
//! today, and which hours each slot covers.

mod demand;
mod window;

pub use demand::{
    resolve_day_profile, resolve_demand, resolve_requirements, DayDemand, DayProfile,
    DemandConfig, Specialty, Traffic, WeekdayProfiles,
};
pub use window::{resolve_window, RoleWindows, WindowSpec};
