//! u-roster CLI: generate, validate and demo weekly rosters.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use u_roster::config::SchedulerConfig;
use u_roster::demo;
use u_roster::models::{Assignment, Employee, Shift};
use u_roster::repository::InMemoryRepository;
use u_roster::scheduler::{Indicators, Orchestrator};
use u_roster::validation::validate_schedule;

/// Weekly staff rostering engine
#[derive(Parser)]
#[command(name = "u-roster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scheduler config (.yaml, .yml or .json); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a week and print the assignments as JSON
    Generate {
        /// Employee roster (JSON array)
        #[arg(long)]
        employees: PathBuf,

        /// Shifts (JSON array)
        #[arg(long)]
        shifts: PathBuf,

        /// Week to schedule, e.g. 2025-W36
        #[arg(long)]
        week: String,

        /// Also print daily indicators
        #[arg(long)]
        indicators: bool,
    },
    /// Re-validate an assignment file against a roster and shifts
    Validate {
        #[arg(long)]
        employees: PathBuf,

        #[arg(long)]
        shifts: PathBuf,

        /// Assignments (JSON array) as printed by `generate`
        #[arg(long)]
        assignments: PathBuf,
    },
    /// Schedule one week of generated demo data
    Demo {
        /// Monday of the week to schedule
        #[arg(long)]
        week_start: NaiveDate,

        /// Roster seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Serialize)]
struct Output<'a> {
    assignments: &'a [Assignment],
    #[serde(skip_serializing_if = "Option::is_none")]
    indicators: Option<Indicators>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => SchedulerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            employees,
            shifts,
            week,
            indicators,
        } => {
            let roster: Vec<Employee> = read_json(&employees)?;
            let shifts: Vec<Shift> = read_json(&shifts)?;
            let repo = InMemoryRepository::from_parts(roster.clone(), shifts);

            let assignments = Orchestrator::new(&config)
                .run_week(&repo, &week)
                .with_context(|| format!("scheduling week {week}"))?;
            let indicators = indicators.then(|| Indicators::calculate(&assignments, &roster, &config));
            print_json(&Output {
                assignments: &assignments,
                indicators,
            })
        }
        Commands::Validate {
            employees,
            shifts,
            assignments,
        } => {
            let roster: Vec<Employee> = read_json(&employees)?;
            let shifts: Vec<Shift> = read_json(&shifts)?;
            let assignments: Vec<Assignment> = read_json(&assignments)?;

            let report = validate_schedule(&assignments, &roster, &shifts, &config);
            if report.passed() {
                info!(assignments = assignments.len(), "schedule is valid");
                return Ok(());
            }
            for v in &report.violations {
                eprintln!("{:?}: {}", v.kind, v.message);
            }
            bail!("{} violation(s)", report.violations.len())
        }
        Commands::Demo { week_start, seed } => {
            if week_start.weekday() != Weekday::Mon {
                bail!("--week-start must be a Monday, got {week_start} ({})", week_start.weekday());
            }
            let roster = demo::roster(seed, &demo::DEFAULT_COUNTS);
            let shifts = demo::week_shifts(week_start, 1);

            let assignments = Orchestrator::new(&config).schedule(&roster, &shifts)?;
            let indicators = Indicators::calculate(&assignments, &roster, &config);
            print_json(&Output {
                assignments: &assignments,
                indicators: Some(indicators),
            })
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
