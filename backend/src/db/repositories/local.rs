//! In-memory local repository implementation.
//!
//! Suitable for unit tests and for running the report against seeded data
//! without touching the filesystem.

use std::sync::{Arc, RwLock};

use log::debug;

use crate::db::repository::*;
use crate::models::{HoursRecord, MaintenanceLogEntry};

/// In-memory local repository.
///
/// Clones share the same underlying data.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use plant_maint::db::repositories::LocalRepository;
/// use plant_maint::db::repository::HoursRepository;
/// use plant_maint::models::HoursRecord;
///
/// let repo = LocalRepository::new();
/// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// repo.append_hours_record(HoursRecord::reading("Howden MK6D (5)", date, 1200.0)).unwrap();
/// assert_eq!(repo.hours_records().unwrap().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    hours: Vec<HoursRecord>,
    log: Vec<MaintenanceLogEntry>,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with records and log entries.
    pub fn with_data(hours: Vec<HoursRecord>, log: Vec<MaintenanceLogEntry>) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData { hours, log })),
        }
    }

    /// Remove everything.
    pub fn clear(&self) -> RepositoryResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.hours.clear();
        data.log.clear();
        Ok(())
    }
}

fn lock_error<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::internal("local repository lock poisoned")
}

impl HoursRepository for LocalRepository {
    fn hours_records(&self) -> RepositoryResult<Vec<HoursRecord>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.hours.clone())
    }

    fn append_hours_record(&self, record: HoursRecord) -> RepositoryResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        debug!("Appending hours record for {} on {}", record.machine, record.date);
        data.hours.push(record);
        Ok(())
    }
}

impl LogRepository for LocalRepository {
    fn log_entries(&self) -> RepositoryResult<Vec<MaintenanceLogEntry>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.log.clone())
    }

    fn append_log_entries(&self, entries: Vec<MaintenanceLogEntry>) -> RepositoryResult<usize> {
        let mut data = self.data.write().map_err(lock_error)?;
        let count = entries.len();
        data.log.extend(entries);
        Ok(count)
    }
}
