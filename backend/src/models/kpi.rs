use qtty::Hours;
use serde::{Deserialize, Serialize};

use super::Month;

/// Performance indicators of one machine over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub running_hours: Hours,
    pub downtime_hours: Hours,
    pub fault_count: u32,
    pub total_hours: Hours,
    pub availability_pct: f64,
    pub mttr: Hours,
    pub mtbf: Hours,
}

impl KpiSnapshot {
    /// Snapshot of an empty selection: every figure is zero.
    pub fn zero() -> Self {
        Self {
            running_hours: Hours::new(0.0),
            downtime_hours: Hours::new(0.0),
            fault_count: 0,
            total_hours: Hours::new(0.0),
            availability_pct: 0.0,
            mttr: Hours::new(0.0),
            mtbf: Hours::new(0.0),
        }
    }
}

/// One point of a machine's monthly KPI series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTrendPoint {
    pub period: Month,
    pub snapshot: KpiSnapshot,
}

/// Running and total hours of one machine within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetMonthEntry {
    pub machine: String,
    pub running_hours: Hours,
    pub total_hours: Hours,
}
