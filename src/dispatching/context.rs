//! Scoring context for one slot.

use crate::config::{HoursPenalties, HoursPolicy, Weights};
use crate::models::Role;
use crate::planning::DayProfile;

/// Median and spread of a cohort's weekly hours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CohortStats {
    /// Median weekly hours.
    pub median: f64,
    /// Population standard deviation of weekly hours.
    pub std_dev: f64,
}

impl CohortStats {
    /// Computes stats from a snapshot of cohort hours. Empty → zeros.
    pub fn from_hours(hours: &[f64]) -> Self {
        if hours.is_empty() {
            return Self::default();
        }
        let mut sorted = hours.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n as f64;

        Self {
            median,
            std_dev: variance.sqrt(),
        }
    }
}

/// Everything the scoring engine needs besides the candidate itself.
///
/// Built per slot by the role scheduler: the cohort snapshot changes as
/// assignments are committed, the rest per date.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    /// Role being filled.
    pub role: Role,
    pub weights: Weights,
    /// Day-profile multipliers for the date being filled.
    pub profile: DayProfile,
    /// Hours band for the role, if configured.
    pub hours_policy: Option<HoursPolicy>,
    pub penalties: HoursPenalties,
    /// Cohort hours distribution at the time of scoring.
    pub cohort: CohortStats,
}

impl DispatchContext {
    /// Creates a context with default weights, a neutral profile and no policy.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            weights: Weights::default(),
            profile: DayProfile::default(),
            hours_policy: None,
            penalties: HoursPenalties::default(),
            cohort: CohortStats::default(),
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_profile(mut self, profile: DayProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_hours_policy(mut self, policy: Option<HoursPolicy>) -> Self {
        self.hours_policy = policy;
        self
    }

    pub fn with_penalties(mut self, penalties: HoursPenalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets the cohort snapshot from the peers' current weekly hours.
    pub fn with_cohort_hours(mut self, hours: &[f64]) -> Self {
        self.cohort = CohortStats::from_hours(hours);
        self
    }
}
