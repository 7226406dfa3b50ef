//! Data store for the dashboard's sheets.
//!
//! The engine in [`crate::services`] is pure; this module is where records
//! come from and where operator input goes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Presentation layer (report binary, UI)                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Services: engine (pure) + data entry (validating)      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  LocalRepository │ CsvRepository │
//!     │   (in-memory)    │  (CSV files)  │
//!     └──────────────────────────────┘
//! ```
//!
//! - `repository`: Trait definitions and error types
//! - `repositories::local`: In-memory implementation
//! - `repositories::csv`: CSV-file implementation (feature `csv-repo`)
//! - `factory`: Creates repository instances from configuration
//! - `config`: TOML configuration

pub mod config;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use config::DashboardConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repository::{FullRepository, HoursRepository, LogRepository, RepositoryError, RepositoryResult};
