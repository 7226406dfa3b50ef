//! Maintenance report binary
//!
//! Loads the dashboard configuration and data store, runs one engine
//! operation and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! maint-report [--config FILE] due
//! maint-report kpis "Howden MK6D (5)" 2024-02
//! maint-report trend "Howden MK6D (5)"
//! maint-report fleet 2024-02
//! maint-report last-maintenance
//! maint-report months
//! maint-report log --machine "Howden MK6D (5)" --from 2024-01-01 --to 2024-03-31
//! maint-report record-hours "Howden MK6D (5)" 2024-03-01 41250
//! maint-report record-maintenance "Howden MK6D (5)" 2024-03-01 5000h 41250
//! ```
//!
//! # Environment Variables
//!
//! - `MAINT_REPOSITORY`: Override the configured store (`csv` or `local`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use plant_maint::db::{DashboardConfig, FullRepository, RepositoryFactory};
use plant_maint::models::{MachineKind, MaintenanceInterval, Month};
use plant_maint::services::{entries, kpis, log, maintenance};

#[derive(Debug, Parser)]
#[command(name = "maint-report", about = "Plant maintenance and KPI reports")]
struct Cli {
    /// Configuration file (default: maintenance.toml search)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Maintenance due status of every compressor
    Due,
    /// KPIs over all history or one month
    Kpis {
        machine: String,
        #[arg(value_parser = parse_month)]
        month: Option<Month>,
    },
    /// Monthly KPI series
    Trend { machine: String },
    /// Running hours of every machine in a month
    Fleet {
        #[arg(value_parser = parse_month)]
        month: Month,
    },
    /// Latest maintenance event per machine
    LastMaintenance,
    /// Months present in the hours sheet
    Months,
    /// Maintenance log entries
    Log {
        #[arg(long)]
        machine: Option<String>,
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Store a counter reading
    RecordHours {
        machine: String,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        hours: f64,
    },
    /// Store a completed maintenance event
    RecordMaintenance {
        machine: String,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(value_parser = parse_interval)]
        interval: MaintenanceInterval,
        hours: f64,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn parse_month(value: &str) -> Result<Month, String> {
    value.parse().map_err(|e: plant_maint::EngineError| e.to_string())
}

fn parse_interval(value: &str) -> Result<MaintenanceInterval, String> {
    value.parse().map_err(|e: plant_maint::EngineError| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Command, config: &DashboardConfig, repo: &dyn FullRepository) -> anyhow::Result<()> {
    let roster = config.roster().context("invalid roster")?;

    match command {
        Command::Due => {
            let records = repo.hours_records()?;
            let compressors = roster.of_kind(MachineKind::Compressor);
            let statuses =
                maintenance::compute_due_status(&records, &compressors, &MaintenanceInterval::ALL)?;
            for interval in maintenance::intervals_needing_parts(&statuses) {
                info!("Spare parts needed for {} maintenance", interval);
            }
            print_json(&statuses)
        }
        Command::Kpis { machine, month } => {
            let records = repo.hours_records()?;
            print_json(&kpis::compute_kpis(&records, &roster, &machine, month)?)
        }
        Command::Trend { machine } => {
            let records = repo.hours_records()?;
            print_json(&kpis::compute_kpi_trend(&records, &roster, &machine)?)
        }
        Command::Fleet { month } => {
            let records = repo.hours_records()?;
            print_json(&kpis::compute_fleet_month(&records, &roster, month)?)
        }
        Command::LastMaintenance => {
            let records = repo.hours_records()?;
            print_json(&maintenance::last_maintenance_records(&records, &roster)?)
        }
        Command::Months => {
            let records = repo.hours_records()?;
            print_json(&kpis::available_months(&records))
        }
        Command::Log { machine, from, to } => {
            let entries = repo.log_entries()?;
            print_json(&log::filter_log(
                &entries,
                &roster,
                machine.as_deref(),
                from,
                to,
            )?)
        }
        Command::RecordHours {
            machine,
            date,
            hours,
        } => {
            entries::record_total_hours(repo, &roster, date, &machine, hours)?;
            Ok(())
        }
        Command::RecordMaintenance {
            machine,
            date,
            interval,
            hours,
        } => {
            entries::record_maintenance_event(repo, &roster, date, &machine, interval, hours)?;
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => DashboardConfig::from_default_location().unwrap_or_else(|e| {
            info!("{}; using defaults", e);
            DashboardConfig::default()
        }),
    };

    let repo = RepositoryFactory::from_config(&config).context("failed to open data store")?;
    info!("Running {:?}", cli.command);

    run(cli.command, &config, repo.as_ref())
}
