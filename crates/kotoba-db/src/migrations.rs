//! Schema and index creation.
//!
//! Embeds the SQL files at compile time. The base schema is created on open;
//! the index script runs once, after the last batch has been written.

use crate::KotobaDb;
use crate::error::DatabaseError;

/// Base schema: 10 tables, no secondary indexes.
const SCHEMA: &str = include_str!("../migrations/001_schema.sql");
/// Secondary indexes and the FTS5 table over kanji, reading and gloss text.
const INDEXES: &str = include_str!("../migrations/002_indexes.sql");

impl KotobaDb {
    pub(crate) async fn create_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_schema: {e}")))?;
        Ok(())
    }

    pub(crate) async fn build_indexes(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(INDEXES)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_indexes: {e}")))?;
        Ok(())
    }
}
