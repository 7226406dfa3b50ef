#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::{HoursRecord, KpiSnapshot, MachineRoster, Month};
    use crate::services::kpis::{
        available_months, compute_fleet_month, compute_kpi_trend, compute_kpis,
        compute_kpis_for_period, running_hour_deltas,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn roster() -> MachineRoster {
        MachineRoster::compressors(["A", "B"]).unwrap()
    }

    /// Three months of readings for machine A.
    fn sample_records() -> Vec<HoursRecord> {
        vec![
            HoursRecord::reading("A", date(2024, 1, 5), 1000.0),
            HoursRecord::reading("A", date(2024, 1, 20), 1300.0)
                .with_downtime(10.0)
                .with_faults(1),
            HoursRecord::reading("A", date(2024, 2, 10), 1600.0)
                .with_downtime(6.0)
                .with_faults(2),
            HoursRecord::reading("A", date(2024, 3, 1), 1750.0),
        ]
    }

    #[test]
    fn test_empty_selection_is_zero_snapshot() {
        let records: Vec<HoursRecord> = Vec::new();
        let kpis = compute_kpis(&records, &roster(), "A", None).unwrap();
        assert_eq!(kpis, KpiSnapshot::zero());
        assert_eq!(kpis.running_hours.value(), 0.0);
        assert_eq!(kpis.availability_pct, 0.0);
    }

    #[test]
    fn test_decreasing_counter_contributes_zero() {
        let records = vec![
            HoursRecord::reading("A", date(2024, 1, 1), 100.0),
            HoursRecord::reading("A", date(2024, 1, 2), 80.0),
        ];
        let kpis = compute_kpis(&records, &roster(), "A", None).unwrap();
        assert_eq!(kpis.running_hours.value(), 0.0);
        assert_eq!(kpis.total_hours.value(), 100.0);
    }

    #[test]
    fn test_deltas_follow_date_order() {
        let records = vec![
            HoursRecord::reading("A", date(2024, 1, 3), 130.0),
            HoursRecord::reading("A", date(2024, 1, 1), 100.0),
            HoursRecord::reading("A", date(2024, 1, 2), 110.0),
        ];
        let refs: Vec<&HoursRecord> = records.iter().collect();
        let deltas: Vec<f64> = running_hour_deltas(&refs)
            .iter()
            .map(|(_, h)| h.value())
            .collect();
        assert_eq!(deltas, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_rows_without_reading_are_skipped_for_previous() {
        let mut downtime_only = HoursRecord::reading("A", date(2024, 1, 2), 0.0).with_downtime(3.0);
        downtime_only.total_hours = None;

        let records = vec![
            HoursRecord::reading("A", date(2024, 1, 1), 100.0),
            downtime_only,
            HoursRecord::reading("A", date(2024, 1, 3), 150.0),
        ];
        let kpis = compute_kpis(&records, &roster(), "A", None).unwrap();
        assert_eq!(kpis.running_hours.value(), 50.0);
        assert_eq!(kpis.downtime_hours.value(), 3.0);
    }

    #[test]
    fn test_whole_history() {
        let kpis = compute_kpis(&sample_records(), &roster(), "A", None).unwrap();

        assert_eq!(kpis.running_hours.value(), 750.0);
        assert_eq!(kpis.downtime_hours.value(), 16.0);
        assert_eq!(kpis.fault_count, 3);
        assert_eq!(kpis.total_hours.value(), 1750.0);
        assert!((kpis.availability_pct - (750.0 - 16.0) / 750.0 * 100.0).abs() < 1e-9);
        assert!((kpis.mttr.value() - 16.0 / 3.0).abs() < 1e-9);
        assert_eq!(kpis.mtbf.value(), 250.0);
    }

    #[test]
    fn test_period_filter_keeps_cross_month_delta() {
        // February's only reading is measured against January's last one.
        let kpis =
            compute_kpis(&sample_records(), &roster(), "A", Some(month(2024, 2))).unwrap();

        assert_eq!(kpis.running_hours.value(), 300.0);
        assert_eq!(kpis.downtime_hours.value(), 6.0);
        assert_eq!(kpis.fault_count, 2);
        assert_eq!(kpis.total_hours.value(), 1600.0);
        assert!((kpis.availability_pct - 98.0).abs() < 1e-9);
        assert_eq!(kpis.mttr.value(), 3.0);
        assert_eq!(kpis.mtbf.value(), 150.0);
    }

    #[test]
    fn test_no_faults_means_zero_mttr_and_mtbf() {
        let kpis =
            compute_kpis(&sample_records(), &roster(), "A", Some(month(2024, 3))).unwrap();
        assert_eq!(kpis.running_hours.value(), 150.0);
        assert_eq!(kpis.fault_count, 0);
        assert_eq!(kpis.mttr.value(), 0.0);
        assert_eq!(kpis.mtbf.value(), 0.0);
        assert_eq!(kpis.availability_pct, 100.0);
    }

    #[test]
    fn test_other_machines_are_ignored() {
        let mut records = sample_records();
        records.push(HoursRecord::reading("B", date(2024, 1, 1), 9000.0).with_faults(7));
        let kpis = compute_kpis(&records, &roster(), "A", None).unwrap();
        assert_eq!(kpis.fault_count, 3);
        assert_eq!(kpis.total_hours.value(), 1750.0);
    }

    #[test]
    fn test_unknown_machine() {
        assert!(compute_kpis(&sample_records(), &roster(), "Z", None).is_err());

        let mut records = sample_records();
        records.push(HoursRecord::reading("Z", date(2024, 1, 1), 1.0));
        let err = compute_kpis(&records, &roster(), "A", None).unwrap_err();
        assert_eq!(err.context().entity_id.as_deref(), Some("Z"));
    }

    #[test]
    fn test_period_label() {
        let kpis = compute_kpis_for_period(&sample_records(), &roster(), "A", Some("2024-02"))
            .unwrap();
        assert_eq!(kpis.running_hours.value(), 300.0);

        let all = compute_kpis_for_period(&sample_records(), &roster(), "A", None).unwrap();
        assert_eq!(all.running_hours.value(), 750.0);

        let err = compute_kpis_for_period(&sample_records(), &roster(), "A", Some("2024-13"))
            .unwrap_err();
        assert_eq!(err.context().operation.as_deref(), Some("compute_kpis"));
        assert!(compute_kpis_for_period(&sample_records(), &roster(), "A", Some("Feb 2024"))
            .is_err());
    }

    #[test]
    fn test_trend_is_monthly_and_ordered() {
        let mut records = sample_records();
        records.reverse();
        let trend = compute_kpi_trend(&records, &roster(), "A").unwrap();

        let periods: Vec<String> = trend.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03"]);

        assert_eq!(trend[0].snapshot.running_hours.value(), 300.0);
        assert_eq!(trend[1].snapshot.running_hours.value(), 300.0);
        assert_eq!(trend[2].snapshot.running_hours.value(), 150.0);
    }

    #[test]
    fn test_trend_matches_filtered_kpis() {
        let records = sample_records();
        for point in compute_kpi_trend(&records, &roster(), "A").unwrap() {
            let kpis = compute_kpis(&records, &roster(), "A", Some(point.period)).unwrap();
            assert_eq!(point.snapshot, kpis);
        }
    }

    #[test]
    fn test_trend_of_machine_without_rows() {
        assert!(compute_kpi_trend(&sample_records(), &roster(), "B")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_fleet_month() {
        let mut records = sample_records();
        records.push(HoursRecord::reading("B", date(2024, 1, 31), 500.0));
        records.push(HoursRecord::reading("B", date(2024, 2, 28), 620.0));

        let fleet = compute_fleet_month(&records, &roster(), month(2024, 2)).unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].machine, "A");
        assert_eq!(fleet[0].running_hours.value(), 300.0);
        assert_eq!(fleet[1].machine, "B");
        assert_eq!(fleet[1].running_hours.value(), 120.0);
        assert_eq!(fleet[1].total_hours.value(), 620.0);

        let march = compute_fleet_month(&records, &roster(), month(2024, 3)).unwrap();
        assert_eq!(march.len(), 1);
    }

    #[test]
    fn test_available_months() {
        let mut records = sample_records();
        records.push(HoursRecord::reading("B", date(2023, 12, 31), 1.0));
        let months: Vec<String> = available_months(&records)
            .iter()
            .map(Month::to_string)
            .collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02", "2024-03"]);
        assert!(available_months(&[]).is_empty());
    }
}
