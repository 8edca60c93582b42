//! Error type shared by the lineage layout engine.

use crate::layout::RowLabel;
use crate::relation::ResearcherId;

/// Errors produced while expanding, sizing or connecting a lineage chart.
#[derive(Debug, thiserror::Error)]
pub enum LineageError {
    /// The queried root is not part of the relation index.
    #[error("researcher {id} not found")]
    NotFound { id: ResearcherId },

    /// A row's group lengths do not add up to the span count of the row
    /// below it. Forests built by the expander never trigger this.
    #[error("malformed forest at row {row}: groups consume {actual} spans but {expected} are available")]
    MalformedForest {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("depth {depth} is outside the accepted range")]
    InvalidDepth { depth: usize },

    #[error("no researcher matches {query:?}")]
    UnknownResearcher { query: String },

    /// A node has no measured box; the rendering surface has not finished
    /// laying out the current rows.
    #[error("no rendered box for {id} in row {row}")]
    MissingBox { id: ResearcherId, row: RowLabel },

    #[error("invalid row label {label:?}")]
    InvalidRowLabel { label: String },

    #[error("invalid direction {value:?} (expected \"ancestors\" or \"descendants\")")]
    InvalidDirection { value: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineageError>;
