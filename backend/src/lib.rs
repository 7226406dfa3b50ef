//! # Plant Maintenance Backend
//!
//! Maintenance-due and KPI computation for an ammonia plant's rotating
//! equipment (refrigeration compressors and cooling towers).
//!
//! The crate is organised around a pure computation engine that takes
//! tabular hour-counter records and returns derived records for a
//! presentation layer. File access lives in a separate data store layer so
//! the engine never touches the filesystem.
//!
//! ## Architecture
//!
//! - [`models`]: Input records, machine roster, calendar months and the
//!   derived result records
//! - [`services`]: The engine (maintenance due status, KPIs, fleet views),
//!   the maintenance log filter and the data-entry operations
//! - [`db`]: Repository traits with in-memory and CSV-file backends, plus
//!   TOML configuration
//! - [`error`]: Engine error type
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use plant_maint::models::{HoursRecord, MachineRoster, MaintenanceInterval};
//! use plant_maint::services::maintenance::compute_due_status;
//!
//! let roster = MachineRoster::compressors(["A"]).unwrap();
//! let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let records = vec![
//!     HoursRecord::reading("A", jan, 0.0).with_maintenance(MaintenanceInterval::H5000, 0.0),
//!     HoursRecord::reading("A", feb, 4000.0),
//! ];
//!
//! let statuses = compute_due_status(&records, &roster, &[MaintenanceInterval::H5000]).unwrap();
//! assert_eq!(statuses[0].remaining_hours.map(|h| h.value()), Some(1000.0));
//! assert!(statuses[0].warning);
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{EngineError, EngineResult, ErrorContext};
