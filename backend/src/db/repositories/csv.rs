//! CSV-file repository implementation.
//!
//! The plant keeps two sheets: the compressor hours sheet (counter readings
//! and maintenance events) and the maintenance log. Both are stored as CSV
//! with the sheet's original column headers. Appending rewrites the whole
//! file; there is no transactional guarantee across the two files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use polars::prelude::{
    Column, CsvReadOptions, CsvWriter, DataFrame, DataType, SerReader, SerWriter,
};
use qtty::Hours;

use crate::db::repository::*;
use crate::error::ErrorContext;
use crate::models::{HoursRecord, MaintenanceInterval, MaintenanceLogEntry};

pub const COL_DATE: &str = "Date";
pub const COL_COMPRESSOR: &str = "Compressor";
pub const COL_TOTAL_HOURS: &str = "Total Hours";
pub const COL_MAINTENANCE_TYPE: &str = "Maintenance Type";
pub const COL_HOURS_AT_MAINTENANCE: &str = "Hours at Maintenance";
pub const COL_DOWNTIME: &str = "DOWN TIME (HRS)";
pub const COL_FAULTS: &str = "NO. OF FAULTS";

pub const COL_MACHINE: &str = "Machine";
pub const COL_MINUTES: &str = "Time (min)";
pub const COL_EVENT: &str = "Event";
pub const COL_SPARE_PARTS: &str = "Spare Parts";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository backed by the hours sheet and the log sheet on disk.
pub struct CsvRepository {
    hours_path: PathBuf,
    log_path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRepository {
    pub fn new(hours_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            hours_path: hours_path.into(),
            log_path: log_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn hours_path(&self) -> &Path {
        &self.hours_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| RepositoryError::internal("csv repository lock poisoned"))
    }
}

/// Parse a sheet date. A trailing time part, as written by spreadsheet
/// exports, is accepted and dropped.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn read_frame(path: &Path) -> RepositoryResult<Option<DataFrame>> {
    if !path.exists() {
        debug!("{} does not exist yet, reading as empty", path.display());
        return Ok(None);
    }
    // No schema inference: every column is text, converted value by value below.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .map_err(|e| {
            RepositoryError::storage_with_context(
                e.to_string(),
                ErrorContext::new("read_csv").with_entity_id(path.display()),
            )
        })?;
    Ok(Some(df))
}

fn required<'a>(df: &'a DataFrame, name: &str, path: &Path) -> RepositoryResult<&'a Column> {
    df.column(name).map_err(|_| {
        RepositoryError::storage_with_context(
            format!("missing column '{}'", name),
            ErrorContext::new("read_csv").with_entity_id(path.display()),
        )
    })
}

fn strings(column: Option<&Column>, height: usize) -> RepositoryResult<Vec<Option<String>>> {
    let Some(column) = column else {
        return Ok(vec![None; height]);
    };
    let column = column.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        .collect())
}

fn floats(column: Option<&Column>, height: usize) -> RepositoryResult<Vec<Option<f64>>> {
    let Some(column) = column else {
        return Ok(vec![None; height]);
    };
    let column = column.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|f| f.is_finite()))
        .collect())
}

fn counts(values: Vec<Option<f64>>) -> Vec<Option<u32>> {
    values
        .into_iter()
        .map(|v| v.map(|f| f.max(0.0).round() as u32))
        .collect()
}

fn read_hours(path: &Path) -> RepositoryResult<Vec<HoursRecord>> {
    let Some(df) = read_frame(path)? else {
        return Ok(Vec::new());
    };
    let height = df.height();

    let dates = strings(Some(required(&df, COL_DATE, path)?), height)?;
    let machines = strings(Some(required(&df, COL_COMPRESSOR, path)?), height)?;
    let totals = floats(df.column(COL_TOTAL_HOURS).ok(), height)?;
    let types = strings(df.column(COL_MAINTENANCE_TYPE).ok(), height)?;
    let hours_at = floats(df.column(COL_HOURS_AT_MAINTENANCE).ok(), height)?;
    let downtime = floats(df.column(COL_DOWNTIME).ok(), height)?;
    let faults = counts(floats(df.column(COL_FAULTS).ok(), height)?);

    let mut records = Vec::with_capacity(height);
    for i in 0..height {
        let Some(date) = dates[i].as_deref().and_then(parse_sheet_date) else {
            warn!("{}: skipping row {} with unreadable date", path.display(), i + 1);
            continue;
        };
        let Some(machine) = machines[i].clone() else {
            warn!("{}: skipping row {} without a machine", path.display(), i + 1);
            continue;
        };
        let maintenance_type = match types[i].as_deref() {
            Some(raw) => match raw.parse::<MaintenanceInterval>() {
                Ok(interval) => Some(interval),
                Err(_) => {
                    warn!(
                        "{}: ignoring unknown maintenance type '{}' on row {}",
                        path.display(),
                        raw,
                        i + 1
                    );
                    None
                }
            },
            None => None,
        };

        records.push(HoursRecord {
            machine,
            date,
            total_hours: totals[i].map(Hours::new),
            maintenance_type,
            hours_at_maintenance: hours_at[i].map(Hours::new),
            downtime: downtime[i].map(Hours::new),
            fault_count: faults[i],
        });
    }

    debug!("Read {} hours records from {}", records.len(), path.display());
    Ok(records)
}

fn ensure_parent(path: &Path) -> RepositoryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn write_frame(path: &Path, mut df: DataFrame) -> RepositoryResult<()> {
    ensure_parent(path)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

fn write_hours(path: &Path, records: &[HoursRecord]) -> RepositoryResult<()> {
    let hours = |f: fn(&HoursRecord) -> Option<Hours>| -> Vec<Option<f64>> {
        records.iter().map(|r| f(r).map(|h| h.value())).collect()
    };

    let dates: Vec<String> = records
        .iter()
        .map(|r| r.date.format(DATE_FORMAT).to_string())
        .collect();
    let machines: Vec<String> = records.iter().map(|r| r.machine.clone()).collect();
    let types: Vec<Option<String>> = records
        .iter()
        .map(|r| r.maintenance_type.map(|t| t.label().to_string()))
        .collect();
    let faults: Vec<Option<u32>> = records.iter().map(|r| r.fault_count).collect();

    let df = DataFrame::new(vec![
        Column::new(COL_DATE.into(), dates),
        Column::new(COL_COMPRESSOR.into(), machines),
        Column::new(COL_TOTAL_HOURS.into(), hours(|r| r.total_hours)),
        Column::new(COL_MAINTENANCE_TYPE.into(), types),
        Column::new(
            COL_HOURS_AT_MAINTENANCE.into(),
            hours(|r| r.hours_at_maintenance),
        ),
        Column::new(COL_DOWNTIME.into(), hours(|r| r.downtime)),
        Column::new(COL_FAULTS.into(), faults),
    ])?;
    write_frame(path, df)
}

fn read_log(path: &Path) -> RepositoryResult<Vec<MaintenanceLogEntry>> {
    let Some(df) = read_frame(path)? else {
        return Ok(Vec::new());
    };
    let height = df.height();

    let dates = strings(Some(required(&df, COL_DATE, path)?), height)?;
    let machines = strings(Some(required(&df, COL_MACHINE, path)?), height)?;
    let minutes = counts(floats(df.column(COL_MINUTES).ok(), height)?);
    let events = strings(df.column(COL_EVENT).ok(), height)?;
    let spare_parts = strings(df.column(COL_SPARE_PARTS).ok(), height)?;

    let mut entries = Vec::with_capacity(height);
    for i in 0..height {
        let Some(date) = dates[i].as_deref().and_then(parse_sheet_date) else {
            warn!("{}: skipping row {} with unreadable date", path.display(), i + 1);
            continue;
        };
        let Some(machine) = machines[i].clone() else {
            warn!("{}: skipping row {} without a machine", path.display(), i + 1);
            continue;
        };
        entries.push(MaintenanceLogEntry {
            date,
            machine,
            minutes: minutes[i].unwrap_or(0),
            event: events[i].clone().unwrap_or_default(),
            spare_parts: spare_parts[i].clone().unwrap_or_default(),
        });
    }

    debug!("Read {} log entries from {}", entries.len(), path.display());
    Ok(entries)
}

fn write_log(path: &Path, entries: &[MaintenanceLogEntry]) -> RepositoryResult<()> {
    let dates: Vec<String> = entries
        .iter()
        .map(|e| e.date.format(DATE_FORMAT).to_string())
        .collect();
    let machines: Vec<String> = entries.iter().map(|e| e.machine.clone()).collect();
    let minutes: Vec<u32> = entries.iter().map(|e| e.minutes).collect();
    let events: Vec<String> = entries.iter().map(|e| e.event.clone()).collect();
    let spare_parts: Vec<String> = entries.iter().map(|e| e.spare_parts.clone()).collect();

    let df = DataFrame::new(vec![
        Column::new(COL_DATE.into(), dates),
        Column::new(COL_MACHINE.into(), machines),
        Column::new(COL_MINUTES.into(), minutes),
        Column::new(COL_EVENT.into(), events),
        Column::new(COL_SPARE_PARTS.into(), spare_parts),
    ])?;
    write_frame(path, df)
}

impl HoursRepository for CsvRepository {
    fn hours_records(&self) -> RepositoryResult<Vec<HoursRecord>> {
        read_hours(&self.hours_path).map_err(|e| e.with_operation("hours_records"))
    }

    fn append_hours_record(&self, record: HoursRecord) -> RepositoryResult<()> {
        let _guard = self.lock()?;
        let mut records = read_hours(&self.hours_path)?;
        info!(
            "Saving hours record for {} on {} to {}",
            record.machine,
            record.date,
            self.hours_path.display()
        );
        records.push(record);
        write_hours(&self.hours_path, &records).map_err(|e| e.with_operation("append_hours_record"))
    }
}

impl LogRepository for CsvRepository {
    fn log_entries(&self) -> RepositoryResult<Vec<MaintenanceLogEntry>> {
        read_log(&self.log_path).map_err(|e| e.with_operation("log_entries"))
    }

    fn append_log_entries(&self, entries: Vec<MaintenanceLogEntry>) -> RepositoryResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }
        let _guard = self.lock()?;
        let mut existing = read_log(&self.log_path)?;
        let count = entries.len();
        existing.extend(entries);
        write_log(&self.log_path, &existing).map_err(|e| e.with_operation("append_log_entries"))?;
        info!("Saved {} log entries to {}", count, self.log_path.display());
        Ok(count)
    }
}
