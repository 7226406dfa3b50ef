//! Availability, MTTR and MTBF from running-hour counters.
//!
//! Running hours are not stored; they are the differences between
//! consecutive counter readings of a machine. Differencing always runs over
//! the machine's whole date-ordered series, so the first reading of a month
//! is measured against the last reading of the month before.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use qtty::Hours;

use crate::error::EngineResult;
use crate::models::{
    FleetMonthEntry, HoursRecord, KpiSnapshot, KpiTrendPoint, MachineRoster, Month,
};
use crate::services::maintenance::records_by_machine;

/// A record paired with the running hours it contributes.
pub(crate) type RunningRow<'a> = (&'a HoursRecord, Hours);

/// Running-hours contribution of each record of one machine, in date order.
///
/// The sort is stable, so rows sharing a date keep their input order. The
/// first reading contributes zero, rows without a reading contribute zero
/// and are skipped when looking for the previous reading, and a counter
/// that goes backwards contributes zero instead of a negative value.
pub(crate) fn running_hour_deltas<'a>(records: &[&'a HoursRecord]) -> Vec<RunningRow<'a>> {
    let mut sorted: Vec<&'a HoursRecord> = records.to_vec();
    sorted.sort_by_key(|r| r.date);

    let mut previous: Option<Hours> = None;
    sorted
        .into_iter()
        .map(|record| {
            let delta = match (previous, record.total_hours) {
                (Some(prev), Some(current)) => Hours::new((current - prev).value().max(0.0)),
                _ => Hours::new(0.0),
            };
            if record.total_hours.is_some() {
                previous = record.total_hours;
            }
            (record, delta)
        })
        .collect()
}

fn sum_hours(values: impl Iterator<Item = Hours>) -> Hours {
    Hours::new(values.fold(0.0, |acc, h| acc + h.value()))
}

fn max_hours(values: impl Iterator<Item = Hours>) -> Hours {
    values
        .map(|h| h.value())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |best| best.max(v))))
        .map(Hours::new)
        .unwrap_or(Hours::new(0.0))
}

/// Aggregate a selection of running rows into a snapshot.
pub(crate) fn aggregate(rows: &[RunningRow<'_>]) -> KpiSnapshot {
    if rows.is_empty() {
        return KpiSnapshot::zero();
    }

    let running_hours = sum_hours(rows.iter().map(|(_, delta)| *delta));
    let downtime_hours = sum_hours(rows.iter().filter_map(|(r, _)| r.downtime));
    let fault_count = rows
        .iter()
        .filter_map(|(r, _)| r.fault_count)
        .fold(0u32, |acc, n| acc.saturating_add(n));
    let total_hours = max_hours(rows.iter().filter_map(|(r, _)| r.total_hours));

    let running = running_hours.value();
    let downtime = downtime_hours.value();

    let availability_pct = if running > 0.0 {
        (running - downtime) / running * 100.0
    } else {
        0.0
    };
    let (mttr, mtbf) = if fault_count > 0 {
        let faults = f64::from(fault_count);
        (Hours::new(downtime / faults), Hours::new(running / faults))
    } else {
        (Hours::new(0.0), Hours::new(0.0))
    };

    KpiSnapshot {
        running_hours,
        downtime_hours,
        fault_count,
        total_hours,
        availability_pct,
        mttr,
        mtbf,
    }
}

fn validate(
    records: &[HoursRecord],
    roster: &MachineRoster,
    machine: &str,
    operation: &str,
) -> EngineResult<()> {
    roster
        .ensure_known(machine)
        .and_then(|_| roster.ensure_all_known(records.iter().map(|r| r.machine.as_str())))
        .map_err(|e| e.with_operation(operation))
}

fn machine_rows<'a>(records: &'a [HoursRecord], machine: &str) -> Vec<RunningRow<'a>> {
    let machine_records: Vec<&HoursRecord> =
        records.iter().filter(|r| r.machine == machine).collect();
    running_hour_deltas(&machine_records)
}

/// KPIs of `machine`, optionally restricted to one calendar month.
///
/// # Errors
/// `InvalidInput` if `machine` or any record's machine is not on `roster`.
pub fn compute_kpis(
    records: &[HoursRecord],
    roster: &MachineRoster,
    machine: &str,
    period_filter: Option<Month>,
) -> EngineResult<KpiSnapshot> {
    validate(records, roster, machine, "compute_kpis")?;

    let rows: Vec<RunningRow<'_>> = machine_rows(records, machine)
        .into_iter()
        .filter(|(record, _)| period_filter.map_or(true, |month| month.contains(record.date)))
        .collect();

    debug!(
        "KPIs for {} over {} rows (period: {})",
        machine,
        rows.len(),
        period_filter.map_or_else(|| "all".to_string(), |m| m.to_string())
    );
    Ok(aggregate(&rows))
}

/// [`compute_kpis`] with the period given as a `YYYY-MM` label.
///
/// # Errors
/// `InvalidInput` for a malformed label, as well as for unknown machines.
pub fn compute_kpis_for_period(
    records: &[HoursRecord],
    roster: &MachineRoster,
    machine: &str,
    period_filter: Option<&str>,
) -> EngineResult<KpiSnapshot> {
    let month = period_filter
        .map(str::parse::<Month>)
        .transpose()
        .map_err(|e| e.with_operation("compute_kpis"))?;
    compute_kpis(records, roster, machine, month)
}

/// Monthly KPI series of `machine`, oldest month first.
///
/// # Errors
/// `InvalidInput` if `machine` or any record's machine is not on `roster`.
pub fn compute_kpi_trend(
    records: &[HoursRecord],
    roster: &MachineRoster,
    machine: &str,
) -> EngineResult<Vec<KpiTrendPoint>> {
    validate(records, roster, machine, "compute_kpi_trend")?;

    let mut by_month: BTreeMap<Month, Vec<RunningRow<'_>>> = BTreeMap::new();
    for row in machine_rows(records, machine) {
        by_month.entry(Month::of(row.0.date)).or_default().push(row);
    }

    Ok(by_month
        .into_iter()
        .map(|(period, rows)| KpiTrendPoint {
            period,
            snapshot: aggregate(&rows),
        })
        .collect())
}

/// Running hours and highest counter reading of every machine with rows
/// in `month`, in roster order.
///
/// # Errors
/// `InvalidInput` if a record names a machine outside `roster`.
pub fn compute_fleet_month(
    records: &[HoursRecord],
    roster: &MachineRoster,
    month: Month,
) -> EngineResult<Vec<FleetMonthEntry>> {
    roster
        .ensure_all_known(records.iter().map(|r| r.machine.as_str()))
        .map_err(|e| e.with_operation("compute_fleet_month"))?;

    let groups = records_by_machine(records);
    let mut entries = Vec::new();

    for machine in roster.ids() {
        let Some(machine_records) = groups.get(machine) else {
            continue;
        };
        let rows: Vec<RunningRow<'_>> = running_hour_deltas(machine_records)
            .into_iter()
            .filter(|(record, _)| month.contains(record.date))
            .collect();
        if rows.is_empty() {
            continue;
        }

        entries.push(FleetMonthEntry {
            machine: machine.to_string(),
            running_hours: sum_hours(rows.iter().map(|(_, delta)| *delta)),
            total_hours: max_hours(rows.iter().filter_map(|(r, _)| r.total_hours)),
        });
    }

    Ok(entries)
}

/// Distinct months present in `records`, oldest first.
pub fn available_months(records: &[HoursRecord]) -> Vec<Month> {
    records
        .iter()
        .map(|r| Month::of(r.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
