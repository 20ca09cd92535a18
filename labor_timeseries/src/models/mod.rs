//! Core data model: periods, observations, and the wide table.

pub mod observation;
pub mod period;
pub mod wide;

pub use observation::{LongSeries, Observation};
pub use period::{Period, PeriodError, PeriodUnit};
pub use wide::WideTable;
