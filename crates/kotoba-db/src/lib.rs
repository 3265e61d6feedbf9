//! # kotoba-db
//!
//! libSQL storage for the dictionary store.
//!
//! Owns the normalized schema (entries, kanji spellings, readings, senses,
//! glosses, restrictions, abbreviations, version marker), the bulk
//! [`writer::StoreWriter`] used during a build, the [`reader`] used to
//! reassemble entries, and the [`staging`] area that keeps a build isolated
//! from the published store until it completes.
//!
//! Uses the `libsql` crate (C `SQLite` fork) for native FTS5.

pub mod error;
pub mod helpers;
mod migrations;
pub mod reader;
pub mod staging;
pub mod writer;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;

/// Schema version written into the `versions` table.
pub const SCHEMA_VERSION: &str = "1";

/// Handle over one dictionary store.
pub struct KotobaDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl std::fmt::Debug for KotobaDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KotobaDb").finish_non_exhaustive()
    }
}

impl KotobaDb {
    /// Open (or create) a store at `path` and make sure the base schema exists.
    ///
    /// Pass `":memory:"` for an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the schema
    /// cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let store = Self { db, conn };
        store.create_schema().await?;
        Ok(store)
    }

    /// Open an already published store for lookups.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreMissing` if nothing exists at `path`.
    pub async fn open_existing(path: &Path) -> Result<Self, DatabaseError> {
        if !path.is_file() {
            return Err(DatabaseError::StoreMissing(path.to_path_buf()));
        }
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        Ok(Self { db, conn })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a query expected to return a single integer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the query yields no row.
    pub async fn query_scalar(&self, sql: &str) -> Result<i64, DatabaseError> {
        let mut rows = self.conn.query(sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
