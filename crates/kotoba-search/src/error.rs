//! Search error types for kotoba-search.

use kotoba_core::query::{Extent, Field};

/// Errors from planning or evaluating a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Error from the libSQL store.
    #[error("database error: {0}")]
    Database(#[from] kotoba_db::error::DatabaseError),

    /// Invalid or empty search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An explicitly requested field/extent pair that cannot be evaluated.
    #[error("{extent} matching is not supported on the {field} field")]
    Unsupported { field: Field, extent: Extent },

    /// A pattern-mode query that is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl From<libsql::Error> for SearchError {
    fn from(error: libsql::Error) -> Self {
        Self::Database(error.into())
    }
}
