//! Maintenance log filtering and the pending-event batch.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, ErrorContext};
use crate::models::{MachineRoster, MaintenanceLogEntry};

/// Entries for `machine` (every machine when `None`) dated within
/// `from..=to`, sorted by date. Either bound may be omitted.
///
/// # Errors
/// `InvalidInput` if `machine` is not on the roster or `from` is after `to`.
pub fn filter_log(
    entries: &[MaintenanceLogEntry],
    roster: &MachineRoster,
    machine: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> EngineResult<Vec<MaintenanceLogEntry>> {
    if let Some(machine) = machine {
        roster
            .ensure_known(machine)
            .map_err(|e| e.with_operation("filter_log"))?;
    }
    if let (Some(start), Some(end)) = (from, to) {
        if start > end {
            return Err(EngineError::invalid_input_with_context(
                format!("date range is inverted: {} is after {}", start, end),
                ErrorContext::new("filter_log").with_entity("date_range"),
            ));
        }
    }

    let mut selected: Vec<MaintenanceLogEntry> = entries
        .iter()
        .filter(|e| machine.map_or(true, |m| e.machine == m))
        .filter(|e| from.map_or(true, |start| e.date >= start))
        .filter(|e| to.map_or(true, |end| e.date <= end))
        .cloned()
        .collect();
    selected.sort_by_key(|e| e.date);

    debug!("Log filter kept {} of {} entries", selected.len(), entries.len());
    Ok(selected)
}

/// An event typed into the log form but not yet saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogEvent {
    pub machine: String,
    pub minutes: u32,
    pub event: String,
    pub spare_parts: String,
}

impl PendingLogEvent {
    pub fn new(machine: impl Into<String>, minutes: u32, event: impl Into<String>) -> Self {
        Self {
            machine: machine.into(),
            minutes,
            event: event.into(),
            spare_parts: String::new(),
        }
    }

    pub fn with_spare_parts(mut self, spare_parts: impl Into<String>) -> Self {
        self.spare_parts = spare_parts.into();
        self
    }
}

/// Events the operator is composing for one log date.
///
/// Rows can be added and removed freely; nothing is validated until the
/// batch is turned into log entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEventBatch {
    events: Vec<PendingLogEvent>,
}

impl LogEventBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PendingLogEvent) {
        self.events.push(event);
    }

    /// Remove the row at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<PendingLogEvent> {
        if index < self.events.len() {
            Some(self.events.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Log entries for `date`, one per pending row.
    ///
    /// # Errors
    /// `InvalidInput` on the first row naming a machine outside `roster`.
    pub fn into_entries(
        self,
        date: NaiveDate,
        roster: &MachineRoster,
    ) -> EngineResult<Vec<MaintenanceLogEntry>> {
        roster
            .ensure_all_known(self.events.iter().map(|e| e.machine.as_str()))
            .map_err(|e| e.with_operation("log_event_batch"))?;

        Ok(self
            .events
            .into_iter()
            .map(|e| MaintenanceLogEntry {
                date,
                machine: e.machine,
                minutes: e.minutes,
                event: e.event,
                spare_parts: e.spare_parts,
            })
            .collect())
    }
}
