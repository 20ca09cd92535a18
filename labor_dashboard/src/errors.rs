use thiserror::Error;

use crate::warehouse::FetchError;
use labor_timeseries::join::JoinError;

/// The unified error type for a view render.
///
/// Every variant is local to one view's pipeline; a failed render never
/// corrupts cached rows another view holds.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The warehouse/query layer failed before any transform ran.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A category label failed to resolve against a percentage column.
    #[error(transparent)]
    Join(#[from] JoinError),

    /// The user selected nothing; the pipeline short-circuits instead of
    /// querying with an empty filter.
    #[error("empty selection: {0}")]
    EmptySelection(&'static str),

    /// The warehouse holds no rows for this view at all.
    #[error("no data available for this view")]
    NoData,
}
