//! Service layer.
//!
//! The engine modules ([`maintenance`], [`kpis`]) are pure functions over
//! record slices: no I/O, no state kept between calls. [`log`] filters the
//! maintenance log and holds the operator's pending events. [`entries`] is
//! the only service that writes, and it does so through a repository.

pub mod entries;
pub mod kpis;
pub mod log;
pub mod maintenance;

#[cfg(test)]
mod kpis_tests;

pub use kpis::{
    available_months, compute_fleet_month, compute_kpi_trend, compute_kpis,
    compute_kpis_for_period,
};
pub use maintenance::{
    compute_due_status, intervals_needing_parts, last_maintenance_records, HOURS_PER_MONTH,
    WARNING_HORIZON_MONTHS,
};
