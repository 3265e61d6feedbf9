//! Cross-cutting error types for kotoba.
//!
//! Domain-specific errors (`DatabaseError`, `IngestError`, `SearchError`) live
//! in their respective crates. The binary converges them with `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any kotoba crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (unknown enum value, empty field, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
