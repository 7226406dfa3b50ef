//! End-to-end tests: data entry through a repository, then the engine over
//! what was stored.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use plant_maint::db::repositories::LocalRepository;
use plant_maint::db::repository::{HoursRepository, LogRepository};
use plant_maint::models::{HoursRecord, MachineRoster, MaintenanceInterval, Month};
use plant_maint::services::entries::{
    record_log_events, record_maintenance_event, record_total_hours,
};
use plant_maint::services::log::{filter_log, LogEventBatch, PendingLogEvent};
use plant_maint::services::maintenance::WARNING_HORIZON_MONTHS;
use plant_maint::services::{compute_due_status, compute_kpi_trend, compute_kpis};

const MACHINE: &str = "Howden MK6D (5)";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_entry_then_due_status() {
    let roster = MachineRoster::plant_default();
    let repo = LocalRepository::new();

    record_maintenance_event(
        &repo,
        &roster,
        date(2024, 1, 1),
        MACHINE,
        MaintenanceInterval::H5000,
        0.0,
    )
    .unwrap();
    record_total_hours(&repo, &roster, date(2024, 1, 1), MACHINE, 0.0).unwrap();
    record_total_hours(&repo, &roster, date(2024, 2, 1), MACHINE, 4000.0).unwrap();

    let records = repo.hours_records().unwrap();
    let statuses = compute_due_status(&records, &roster, &[MaintenanceInterval::H5000]).unwrap();

    assert_eq!(statuses.len(), 1);
    let s = &statuses[0];
    assert_eq!(s.last_hours_at_maintenance.unwrap().value(), 0.0);
    assert_eq!(s.next_due_hours.unwrap().value(), 5000.0);
    assert_eq!(s.remaining_hours.unwrap().value(), 1000.0);
    assert!((s.remaining_months.unwrap() - 2.78).abs() < 0.01);
    assert!(s.warning);
}

#[test]
fn test_entry_validation() {
    let roster = MachineRoster::plant_default();
    let repo = LocalRepository::new();

    let unknown = record_total_hours(&repo, &roster, date(2024, 1, 1), "Nobody", 10.0);
    assert!(unknown.unwrap_err().is_validation());

    let negative = record_total_hours(&repo, &roster, date(2024, 1, 1), MACHINE, -1.0);
    assert!(negative.unwrap_err().is_validation());

    let nan = record_maintenance_event(
        &repo,
        &roster,
        date(2024, 1, 1),
        MACHINE,
        MaintenanceInterval::H10000,
        f64::NAN,
    );
    assert!(nan.unwrap_err().is_validation());

    assert!(repo.hours_records().unwrap().is_empty());
}

#[test]
fn test_log_batch_roundtrip() {
    let roster = MachineRoster::plant_default();
    let repo = LocalRepository::new();

    assert_eq!(
        record_log_events(&repo, &roster, date(2024, 3, 1), LogEventBatch::new()).unwrap(),
        0
    );

    let mut batch = LogEventBatch::new();
    batch.push(PendingLogEvent::new(MACHINE, 45, "oil change").with_spare_parts("oil filter"));
    batch.push(PendingLogEvent::new("Cooling Tower (1)", 20, "fan belt"));
    assert_eq!(
        record_log_events(&repo, &roster, date(2024, 3, 1), batch).unwrap(),
        2
    );

    let mut bad = LogEventBatch::new();
    bad.push(PendingLogEvent::new("Nobody", 5, "x"));
    assert!(record_log_events(&repo, &roster, date(2024, 3, 2), bad).is_err());

    let entries = repo.log_entries().unwrap();
    assert_eq!(entries.len(), 2);
    let own = filter_log(&entries, &roster, Some(MACHINE), None, None).unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].spare_parts, "oil filter");
}

#[test]
fn test_trend_over_stored_history() {
    let roster = MachineRoster::plant_default();
    let repo = LocalRepository::new();
    for (i, total) in [100.0, 400.0, 700.0, 900.0].iter().enumerate() {
        let d = date(2024, 1, 15) + Duration::days(30 * i as i64);
        record_total_hours(&repo, &roster, d, MACHINE, *total).unwrap();
    }

    let records = repo.hours_records().unwrap();
    let trend = compute_kpi_trend(&records, &roster, MACHINE).unwrap();
    let running: Vec<f64> = trend
        .iter()
        .map(|p| p.snapshot.running_hours.value())
        .collect();
    assert_eq!(running, vec![0.0, 300.0, 300.0, 200.0]);
    assert_eq!(trend[1].period, Month::new(2024, 2).unwrap());
}

#[test]
fn test_seeded_repository_fleet_view() {
    let roster = MachineRoster::plant_default();
    let seeded = vec![
        HoursRecord::reading(MACHINE, date(2024, 4, 30), 2000.0),
        HoursRecord::reading(MACHINE, date(2024, 5, 31), 2310.0),
        HoursRecord::reading("Howden MK6D (6)", date(2024, 5, 31), 800.0),
    ];
    let repo = LocalRepository::with_data(seeded, Vec::new());
    let view = repo.clone();

    let may = Month::new(2024, 5).unwrap();
    let fleet =
        plant_maint::services::compute_fleet_month(&view.hours_records().unwrap(), &roster, may)
            .unwrap();
    assert_eq!(fleet.len(), 2);
    assert_eq!(fleet[0].machine, MACHINE);
    assert_eq!(fleet[0].running_hours.value(), 310.0);
    assert_eq!(fleet[1].running_hours.value(), 0.0);

    repo.clear().unwrap();
    assert!(view.hours_records().unwrap().is_empty());
}

fn arb_history() -> impl Strategy<Value = Vec<HoursRecord>> {
    prop::collection::vec(
        (
            0i64..400,
            prop::option::of(0.0f64..50_000.0),
            prop::option::of((0usize..3, 0.0f64..50_000.0)),
            prop::option::of(0.0f64..24.0),
            prop::option::of(0u32..5),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(day, total, maintenance, downtime, faults)| {
                let mut record = HoursRecord::reading(MACHINE, date(2023, 1, 1), 0.0);
                record.date = date(2023, 1, 1) + Duration::days(day);
                record.total_hours = total.map(qtty::Hours::new);
                if let Some((idx, at)) = maintenance {
                    record = record.with_maintenance(MaintenanceInterval::ALL[idx], at);
                }
                if let Some(d) = downtime {
                    record = record.with_downtime(d);
                }
                record.fault_count = faults;
                record
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_warning_iff_within_horizon(records in arb_history()) {
        let roster = MachineRoster::compressors([MACHINE]).unwrap();
        let statuses = compute_due_status(&records, &roster, &MaintenanceInterval::ALL).unwrap();

        let has_reading = records.iter().any(|r| r.total_hours.is_some());
        prop_assert_eq!(statuses.len(), if has_reading { 3 } else { 0 });

        for s in &statuses {
            match s.remaining_months {
                Some(m) => prop_assert_eq!(s.warning, m > 0.0 && m < WARNING_HORIZON_MONTHS),
                None => {
                    prop_assert!(!s.warning);
                    prop_assert!(s.remaining_hours.is_none());
                }
            }
        }
    }

    #[test]
    fn prop_running_hours_never_negative(records in arb_history()) {
        let roster = MachineRoster::compressors([MACHINE]).unwrap();
        let kpis = compute_kpis(&records, &roster, MACHINE, None).unwrap();
        prop_assert!(kpis.running_hours.value() >= 0.0);
        prop_assert!(kpis.availability_pct <= 100.0);

        for point in compute_kpi_trend(&records, &roster, MACHINE).unwrap() {
            prop_assert!(point.snapshot.running_hours.value() >= 0.0);
        }
    }

    #[test]
    fn prop_engine_is_deterministic(records in arb_history()) {
        let roster = MachineRoster::compressors([MACHINE]).unwrap();
        prop_assert_eq!(
            compute_due_status(&records, &roster, &MaintenanceInterval::ALL).unwrap(),
            compute_due_status(&records, &roster, &MaintenanceInterval::ALL).unwrap()
        );
        prop_assert_eq!(
            compute_kpis(&records, &roster, MACHINE, None).unwrap(),
            compute_kpis(&records, &roster, MACHINE, None).unwrap()
        );
        prop_assert_eq!(
            compute_kpi_trend(&records, &roster, MACHINE).unwrap(),
            compute_kpi_trend(&records, &roster, MACHINE).unwrap()
        );
    }
}
