//! The dashboard's view pipelines.
//!
//! Each view is a pure function of an executor plus the user's selection:
//! fetch, reshape, derive, and hand back render-ready tables and chart
//! specs. Nothing is kept between calls — a fresh request re-runs the
//! whole pipeline (the executor may be a [`crate::cache::CachedExecutor`]
//! to make that cheap).

pub mod cpi_annual;
pub mod cpi_monthly;
pub mod jolts_by_state;
pub mod jolts_national;
pub mod state_metro;

pub use crate::errors::ViewError;
