//! Remaining hours to the next scheduled maintenance.

use std::collections::HashMap;

use log::debug;
use qtty::Hours;

use crate::error::EngineResult;
use crate::models::{
    HoursRecord, LastMaintenance, MachineRoster, MaintenanceDueStatus, MaintenanceInterval,
};

/// Running hours counted as one month when converting remaining hours.
///
/// Fixed plant convention, not a calendar month.
pub const HOURS_PER_MONTH: f64 = 360.0;

/// A due date closer than this many months raises a spare-parts warning.
pub const WARNING_HORIZON_MONTHS: f64 = 6.0;

/// Whether a due date `remaining_months` away needs a warning.
///
/// Both bounds are exclusive: overdue (`<= 0`) and exactly six months away
/// do not warn.
pub fn needs_warning(remaining_months: f64) -> bool {
    remaining_months > 0.0 && remaining_months < WARNING_HORIZON_MONTHS
}

/// Collapse duplicate intervals, keeping first-occurrence order.
fn distinct_intervals(intervals: &[MaintenanceInterval]) -> Vec<MaintenanceInterval> {
    let mut out: Vec<MaintenanceInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if !out.contains(interval) {
            out.push(*interval);
        }
    }
    out
}

/// Group records by machine, keeping input order within each group.
pub(crate) fn records_by_machine(records: &[HoursRecord]) -> HashMap<&str, Vec<&HoursRecord>> {
    let mut groups: HashMap<&str, Vec<&HoursRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.machine.as_str()).or_default().push(record);
    }
    groups
}

/// Latest maintenance event of `interval` among `records`.
///
/// Only rows carrying `hours_at_maintenance` count. Ties on date go to the
/// row that comes later in the input.
fn latest_event<'a>(
    records: &[&'a HoursRecord],
    interval: Option<MaintenanceInterval>,
) -> Option<&'a HoursRecord> {
    let mut best: Option<&HoursRecord> = None;
    for record in records.iter().copied() {
        let Some(kind) = record.maintenance_type else {
            continue;
        };
        if record.hours_at_maintenance.is_none() {
            continue;
        }
        if interval.is_some_and(|wanted| wanted != kind) {
            continue;
        }
        match best {
            Some(current) if record.date < current.date => {}
            _ => best = Some(record),
        }
    }
    best
}

/// Highest counter reading among `records`, if any row has one.
pub(crate) fn max_total_hours(records: &[&HoursRecord]) -> Option<Hours> {
    records
        .iter()
        .filter_map(|r| r.total_hours)
        .fold(None, |acc: Option<Hours>, h| match acc {
            Some(best) if best.value() >= h.value() => Some(best),
            _ => Some(h),
        })
}

fn due_status_for(
    machine: &str,
    interval: MaintenanceInterval,
    current_hours: Hours,
    records: &[&HoursRecord],
) -> MaintenanceDueStatus {
    let last = latest_event(records, Some(interval));

    let Some((date, last_hours)) = last.and_then(|r| r.hours_at_maintenance.map(|h| (r.date, h)))
    else {
        return MaintenanceDueStatus {
            machine: machine.to_string(),
            interval,
            last_maintenance_date: None,
            last_hours_at_maintenance: None,
            current_hours,
            next_due_hours: None,
            remaining_hours: None,
            remaining_months: None,
            warning: false,
        };
    };

    let next_due = last_hours + interval.hours();
    let remaining = next_due - current_hours;
    let remaining_months = remaining.value() / HOURS_PER_MONTH;

    MaintenanceDueStatus {
        machine: machine.to_string(),
        interval,
        last_maintenance_date: Some(date),
        last_hours_at_maintenance: Some(last_hours),
        current_hours,
        next_due_hours: Some(next_due),
        remaining_hours: Some(remaining),
        remaining_months: Some(remaining_months),
        warning: needs_warning(remaining_months),
    }
}

/// Compute the maintenance due status of every machine on `machines` for
/// each interval in `intervals`.
///
/// Machines without records, or whose records carry no counter reading,
/// are skipped. Each remaining machine yields one entry per distinct
/// interval, in roster order then interval order.
///
/// # Errors
/// `InvalidInput` if a record names a machine outside `machines`.
pub fn compute_due_status(
    records: &[HoursRecord],
    machines: &MachineRoster,
    intervals: &[MaintenanceInterval],
) -> EngineResult<Vec<MaintenanceDueStatus>> {
    machines
        .ensure_all_known(records.iter().map(|r| r.machine.as_str()))
        .map_err(|e| e.with_operation("compute_due_status"))?;

    let intervals = distinct_intervals(intervals);
    let groups = records_by_machine(records);
    let mut statuses = Vec::with_capacity(machines.len() * intervals.len());

    for machine in machines.ids() {
        let Some(machine_records) = groups.get(machine) else {
            continue;
        };
        let Some(current_hours) = max_total_hours(machine_records) else {
            debug!("Skipping {}: no counter reading", machine);
            continue;
        };

        for interval in &intervals {
            statuses.push(due_status_for(
                machine,
                *interval,
                current_hours,
                machine_records,
            ));
        }
    }

    debug!(
        "Computed {} due-status entries for {} intervals",
        statuses.len(),
        intervals.len()
    );
    Ok(statuses)
}

/// Intervals with at least one warning, shortest first.
pub fn intervals_needing_parts(statuses: &[MaintenanceDueStatus]) -> Vec<MaintenanceInterval> {
    MaintenanceInterval::ALL
        .into_iter()
        .filter(|interval| {
            statuses
                .iter()
                .any(|s| s.interval == *interval && s.warning)
        })
        .collect()
}

/// Latest logged maintenance event of each machine, sorted by machine id.
///
/// Only complete events (type and hours at maintenance present) count;
/// machines without one are left out.
///
/// # Errors
/// `InvalidInput` if a record names a machine outside `roster`.
pub fn last_maintenance_records(
    records: &[HoursRecord],
    roster: &MachineRoster,
) -> EngineResult<Vec<LastMaintenance>> {
    roster
        .ensure_all_known(records.iter().map(|r| r.machine.as_str()))
        .map_err(|e| e.with_operation("last_maintenance_records"))?;

    let groups = records_by_machine(records);
    let mut rows: Vec<LastMaintenance> = groups
        .iter()
        .filter_map(|(machine, machine_records)| {
            let event = latest_event(machine_records, None)?;
            Some(LastMaintenance {
                machine: machine.to_string(),
                date: event.date,
                interval: event.maintenance_type?,
                hours_at_maintenance: event.hours_at_maintenance?,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.machine.cmp(&b.machine));
    Ok(rows)
}
