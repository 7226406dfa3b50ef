use chrono::NaiveDate;
use qtty::Hours;
use serde::{Deserialize, Serialize};

use super::MaintenanceInterval;

/// Maintenance due status of one machine for one interval.
///
/// `last_*`, `next_due_hours`, `remaining_hours` and `remaining_months` are
/// all absent when the machine has no logged event of this interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDueStatus {
    pub machine: String,
    pub interval: MaintenanceInterval,
    pub last_maintenance_date: Option<NaiveDate>,
    pub last_hours_at_maintenance: Option<Hours>,
    pub current_hours: Hours,
    pub next_due_hours: Option<Hours>,
    pub remaining_hours: Option<Hours>,
    pub remaining_months: Option<f64>,
    /// Spare parts should be ordered: the next service falls inside the
    /// warning horizon.
    pub warning: bool,
}

/// Latest logged maintenance event of a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMaintenance {
    pub machine: String,
    pub date: NaiveDate,
    pub interval: MaintenanceInterval,
    pub hours_at_maintenance: Hours,
}
