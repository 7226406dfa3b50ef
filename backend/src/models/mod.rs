//! Domain models: input records, the machine roster and derived results.

pub mod hours;
pub mod kpi;
pub mod log;
pub mod machine;
pub mod maintenance;
pub mod period;

pub use hours::*;
pub use kpi::*;
pub use log::*;
pub use machine::*;
pub use maintenance::*;
pub use period::*;
