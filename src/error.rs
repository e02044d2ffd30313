use thiserror::Error;

/// Failures while loading or assembling an attachment graph.
///
/// Both variants are fatal: there is no partial-success mode, and a failed
/// load never renders anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A data row did not yield three usable string fields. `row` is the
    /// zero-based index of the record in input order.
    #[error("row {row}: record must have non-empty muscle, origin and insertion fields")]
    MalformedRecord { row: usize },

    /// The input resource could not be read or its header is unusable.
    #[error("failed to load muscle table: {0}")]
    LoadFailure(String),
}
