use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the maintenance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceLogEntry {
    pub date: NaiveDate,
    pub machine: String,
    /// Time spent on the job, in minutes.
    pub minutes: u32,
    pub event: String,
    pub spare_parts: String,
}
