//! Repository trait definitions for the data store.
//!
//! The engine never reads files; the presentation layer pulls a snapshot of
//! records from a repository, hands it to the engine, and appends whatever
//! the operator enters back through the same repository.
//!
//! - [`HoursRepository`]: running-hour counter readings and maintenance events
//! - [`LogRepository`]: the free-text maintenance log
//!
//! For functions that need both, use the [`FullRepository`] bound:
//!
//! ```ignore
//! fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let hours = repo.hours_records()?;
//!     let log = repo.log_entries()?;
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{RepositoryError, RepositoryResult};

use crate::models::{HoursRecord, MaintenanceLogEntry};

/// Storage of counter readings and maintenance events.
pub trait HoursRepository: Send + Sync {
    /// Every stored record, in storage order.
    fn hours_records(&self) -> RepositoryResult<Vec<HoursRecord>>;

    /// Append one record.
    fn append_hours_record(&self, record: HoursRecord) -> RepositoryResult<()>;
}

/// Storage of maintenance log entries.
pub trait LogRepository: Send + Sync {
    /// Every stored entry, in storage order.
    fn log_entries(&self) -> RepositoryResult<Vec<MaintenanceLogEntry>>;

    /// Append entries, returning how many were written.
    fn append_log_entries(&self, entries: Vec<MaintenanceLogEntry>) -> RepositoryResult<usize>;
}

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both traits.
pub trait FullRepository: HoursRepository + LogRepository {}

impl<T: HoursRepository + LogRepository> FullRepository for T {}
