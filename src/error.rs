//! Error types.
//!
//! Three fatal failure classes abort a run: configuration problems (before
//! any scheduling), insufficient staff (during scheduling), and validation
//! failures (after scheduling). Skipping a slot under an enabled weekend
//! fallback is the only soft failure and is not an error.

use chrono::{NaiveDate, NaiveTime};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Role;
use crate::validation::ValidationReport;

/// Malformed or inconsistent configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension for {0} (use .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid config: {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by the external repository collaborator.
#[derive(Debug, Error)]
#[error("repository error: {0}")]
pub struct RepositoryError(pub String);

/// Any failure that aborts a scheduling run.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no shifts found for week {week_id}")]
    NoShifts { week_id: String },
    #[error("cannot assign {role} for {date} (slot {slot}): insufficient eligible staff")]
    InsufficientStaff {
        role: Role,
        date: NaiveDate,
        slot: u32,
    },
    #[error("local time {date} {time} does not exist in timezone {timezone}")]
    InvalidLocalTime {
        date: NaiveDate,
        time: NaiveTime,
        timezone: String,
    },
    #[error("schedule validation failed: {0}")]
    Validation(ValidationReport),
}

pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
