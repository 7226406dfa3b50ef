use chrono::NaiveDate;
use qtty::Hours;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, ErrorContext};

/// Scheduled maintenance interval, in running hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaintenanceInterval {
    #[serde(rename = "5000h")]
    H5000,
    #[serde(rename = "10000h")]
    H10000,
    #[serde(rename = "40000h")]
    H40000,
}

impl MaintenanceInterval {
    /// All intervals, shortest first.
    pub const ALL: [MaintenanceInterval; 3] = [Self::H5000, Self::H10000, Self::H40000];

    /// Interval length in running hours.
    pub fn hours(self) -> Hours {
        Hours::new(match self {
            Self::H5000 => 5_000.0,
            Self::H10000 => 10_000.0,
            Self::H40000 => 40_000.0,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::H5000 => "5000h",
            Self::H10000 => "10000h",
            Self::H40000 => "40000h",
        }
    }
}

impl fmt::Display for MaintenanceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaintenanceInterval {
    type Err = EngineError;

    /// Parse `5000h`, `10000h` or `40000h` (the `h` suffix is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix(['h', 'H']).unwrap_or(trimmed);
        match digits {
            "5000" => Ok(Self::H5000),
            "10000" => Ok(Self::H10000),
            "40000" => Ok(Self::H40000),
            _ => Err(EngineError::invalid_input_with_context(
                format!("unknown maintenance interval '{}'", s),
                ErrorContext::default()
                    .with_entity("maintenance_type")
                    .with_entity_id(s),
            )),
        }
    }
}

/// One observation of a machine's cumulative runtime counter.
///
/// Rows that log a maintenance event carry `maintenance_type` and
/// `hours_at_maintenance`; they may have no counter reading of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursRecord {
    pub machine: String,
    pub date: NaiveDate,
    pub total_hours: Option<Hours>,
    pub maintenance_type: Option<MaintenanceInterval>,
    pub hours_at_maintenance: Option<Hours>,
    /// Downtime hours booked against this observation.
    pub downtime: Option<Hours>,
    pub fault_count: Option<u32>,
}

impl HoursRecord {
    /// A plain counter reading.
    pub fn reading(machine: impl Into<String>, date: NaiveDate, total_hours: f64) -> Self {
        Self {
            machine: machine.into(),
            date,
            total_hours: Some(Hours::new(total_hours)),
            maintenance_type: None,
            hours_at_maintenance: None,
            downtime: None,
            fault_count: None,
        }
    }

    /// A maintenance event row without a counter reading.
    pub fn maintenance_event(
        machine: impl Into<String>,
        date: NaiveDate,
        interval: MaintenanceInterval,
        hours_at_maintenance: f64,
    ) -> Self {
        Self {
            machine: machine.into(),
            date,
            total_hours: None,
            maintenance_type: Some(interval),
            hours_at_maintenance: Some(Hours::new(hours_at_maintenance)),
            downtime: None,
            fault_count: None,
        }
    }

    pub fn with_maintenance(mut self, interval: MaintenanceInterval, hours_at: f64) -> Self {
        self.maintenance_type = Some(interval);
        self.hours_at_maintenance = Some(Hours::new(hours_at));
        self
    }

    pub fn with_downtime(mut self, downtime_hours: f64) -> Self {
        self.downtime = Some(Hours::new(downtime_hours));
        self
    }

    pub fn with_faults(mut self, faults: u32) -> Self {
        self.fault_count = Some(faults);
        self
    }
}
