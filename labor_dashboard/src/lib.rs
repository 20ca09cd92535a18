//! View layer for the labor-statistics dashboard.
//!
//! Each module maps onto one stage of a view render: the warehouse executor
//! seam ([`warehouse`]), the memoizing result cache ([`cache`]), the SQL
//! catalog and row decoding ([`queries`]), the view pipelines themselves
//! ([`views`]), and the chart specs and plain-text tables handed to the
//! presentation adapter ([`charts`], [`render`]).

pub mod cache;
pub mod charts;
pub mod errors;
pub mod queries;
pub mod render;
pub mod views;
pub mod warehouse;
