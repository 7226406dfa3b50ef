//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing and seeded runs
//! - `csv`: The plant's hours and log sheets stored as CSV files
pub mod local;
#[cfg(feature = "csv-repo")]
pub mod csv;

pub use local::LocalRepository;
#[cfg(feature = "csv-repo")]
pub use csv::CsvRepository;
