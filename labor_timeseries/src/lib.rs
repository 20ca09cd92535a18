//! Time-series reshaping for labor-statistics dashboards.
//!
//! Warehouse queries hand back long-format rows (one observation per
//! category and period). The modules here turn those into the shapes the
//! charts want: period-indexed wide tables, period-over-period percentage
//! changes, percentage lookups joined back onto the long rows, and a
//! geography-indexed pivot for single-period cross sections.
//!
//! Every transform returns a new value; nothing is edited in place after
//! construction, so cached source tables can be reused across view renders
//! without aliasing surprises.

#![deny(missing_docs)]

pub mod join;
pub mod models;
pub mod percent;
pub mod pivot;
pub mod reshape;
