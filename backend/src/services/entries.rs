//! Operator data entry: validated appends through a repository.

use chrono::NaiveDate;
use log::{info, warn};
use qtty::Hours;

use crate::db::repository::{HoursRepository, LogRepository, RepositoryError, RepositoryResult};
use crate::error::ErrorContext;
use crate::models::{HoursRecord, MachineRoster, MaintenanceInterval};
use crate::services::log::LogEventBatch;

fn validate_hours(value: f64, field: &str, operation: &str) -> RepositoryResult<Hours> {
    if value.is_finite() && value >= 0.0 {
        Ok(Hours::new(value))
    } else {
        Err(RepositoryError::validation_with_context(
            format!("{} must be a non-negative number, got {}", field, value),
            ErrorContext::new(operation).with_entity(field),
        ))
    }
}

/// Store a cumulative counter reading for `machine`.
///
/// # Errors
/// Validation error for an unknown machine or a negative/non-finite value;
/// storage errors from the repository.
pub fn record_total_hours<R: HoursRepository + ?Sized>(
    repo: &R,
    roster: &MachineRoster,
    date: NaiveDate,
    machine: &str,
    total_hours: f64,
) -> RepositoryResult<()> {
    roster
        .ensure_known(machine)
        .map_err(|e| e.with_operation("record_total_hours"))?;
    let total = validate_hours(total_hours, "total_hours", "record_total_hours")?;

    let mut record = HoursRecord::reading(machine, date, 0.0);
    record.total_hours = Some(total);
    repo.append_hours_record(record)?;
    info!("Recorded {} h on {} for {}", total.value(), date, machine);
    Ok(())
}

/// Store a completed maintenance event for `machine`.
///
/// # Errors
/// Validation error for an unknown machine or a negative/non-finite value;
/// storage errors from the repository.
pub fn record_maintenance_event<R: HoursRepository + ?Sized>(
    repo: &R,
    roster: &MachineRoster,
    date: NaiveDate,
    machine: &str,
    interval: MaintenanceInterval,
    hours_at_maintenance: f64,
) -> RepositoryResult<()> {
    roster
        .ensure_known(machine)
        .map_err(|e| e.with_operation("record_maintenance_event"))?;
    let hours_at = validate_hours(
        hours_at_maintenance,
        "hours_at_maintenance",
        "record_maintenance_event",
    )?;

    repo.append_hours_record(HoursRecord::maintenance_event(
        machine,
        date,
        interval,
        hours_at.value(),
    ))?;
    info!(
        "Recorded {} maintenance on {} for {} at {} h",
        interval,
        date,
        machine,
        hours_at.value()
    );
    Ok(())
}

/// Save every pending event of `batch` as log entries dated `date`.
///
/// Returns the number of entries written; an empty batch writes nothing and
/// returns 0.
///
/// # Errors
/// Validation error if any event names an unknown machine (nothing is
/// written in that case); storage errors from the repository.
pub fn record_log_events<R: LogRepository + ?Sized>(
    repo: &R,
    roster: &MachineRoster,
    date: NaiveDate,
    batch: LogEventBatch,
) -> RepositoryResult<usize> {
    if batch.is_empty() {
        warn!("No maintenance events were entered for {}", date);
        return Ok(0);
    }
    let entries = batch.into_entries(date, roster)?;
    repo.append_log_entries(entries)
}
