//! Ingestion error types.

use std::path::PathBuf;

use kotoba_db::error::DatabaseError;
use kotoba_db::staging::StagingError;
use thiserror::Error;

/// Errors from parsing a source document or building a store from it.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The element structure does not match the expected entry layout.
    #[error("malformed document near byte {position}: {message}")]
    Structure { position: usize, message: String },

    /// Tag text that no declared abbreviation expands to.
    #[error("entry {ent_seq}: <{field}> value '{expansion}' matches no declared abbreviation")]
    InconsistentAbbreviation {
        field: &'static str,
        ent_seq: i64,
        expansion: String,
    },

    /// Tag text shared by more than one declared abbreviation.
    #[error("entry {ent_seq}: <{field}> value '{expansion}' is ambiguous between {codes:?}")]
    AmbiguousAbbreviation {
        field: &'static str,
        ent_seq: i64,
        expansion: String,
        codes: Vec<String>,
    },

    /// The source document could not be opened.
    #[error("cannot read source document {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid build options: {0}")]
    InvalidOptions(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
