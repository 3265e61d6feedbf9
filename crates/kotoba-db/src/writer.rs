//! Bulk writer used during a build.
//!
//! Each batch is written inside one transaction. Reading and sense ids are
//! assigned here, continuing from the highest id already stored, so the
//! writer can be called any number of times within a build without reusing
//! an id. Secondary indexes and the full-text table are only built by
//! [`StoreWriter::finish`].

use std::path::Path;

use chrono::Utc;
use kotoba_core::abbrev::AbbreviationTable;
use kotoba_core::model::{Entry, INFO_SEPARATOR, Reading, Sense, TAG_SEPARATOR, join_tags};

use crate::error::DatabaseError;
use crate::helpers::flag;
use crate::reader::StoreCounts;
use crate::{KotobaDb, SCHEMA_VERSION};

/// Surrogate ids assigned while writing one batch, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchIds {
    pub readings: Vec<i64>,
    pub senses: Vec<i64>,
}

pub struct StoreWriter {
    db: KotobaDb,
}

impl StoreWriter {
    /// Create a writer over a fresh store file, tuned for bulk loading.
    ///
    /// The pragmas trade crash durability for speed; a build that fails is
    /// thrown away rather than recovered.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be created.
    pub async fn create(path: &Path) -> Result<Self, DatabaseError> {
        let path = path
            .to_str()
            .ok_or_else(|| DatabaseError::Query(format!("non UTF-8 store path {}", path.display())))?;
        let db = KotobaDb::open_local(path).await?;
        for pragma in ["PRAGMA journal_mode = MEMORY", "PRAGMA synchronous = OFF"] {
            db.conn().query(pragma, ()).await?;
        }
        Ok(Self { db })
    }

    /// Wrap an already opened store (in-memory stores in tests).
    #[must_use]
    pub const fn from_db(db: KotobaDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &KotobaDb {
        &self.db
    }

    /// Release the store handle, closing it once dropped.
    #[must_use]
    pub fn into_inner(self) -> KotobaDb {
        self.db
    }

    /// Persist the abbreviation table, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any insert fails.
    pub async fn write_abbreviations(&self, table: &AbbreviationTable) -> Result<(), DatabaseError> {
        let tx = self.db.conn().transaction().await?;
        tx.execute("DELETE FROM abbreviations", ()).await?;
        for abbrev in table.entries() {
            tx.execute(
                "INSERT INTO abbreviations (abbrev, short_expansion, long_expansion, provisional)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    abbrev.code.as_str(),
                    abbrev.short.as_str(),
                    abbrev.long.as_str(),
                    flag(abbrev.provisional)
                ],
            )
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Insert one batch of entries with all their children.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any insert fails; the batch is rolled back.
    pub async fn write_batch(&self, entries: &[Entry]) -> Result<BatchIds, DatabaseError> {
        let tx = self.db.conn().transaction().await?;
        match insert_entries(&tx, entries).await {
            Ok(ids) => {
                tx.commit().await?;
                tracing::debug!(
                    entries = entries.len(),
                    readings = ids.readings.len(),
                    senses = ids.senses.len(),
                    "batch written"
                );
                Ok(ids)
            }
            Err(error) => {
                tx.rollback().await?;
                Err(error)
            }
        }
    }

    /// Build deferred indexes and the full-text table, then stamp the version.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if index creation or the version write fails.
    pub async fn finish(&self) -> Result<StoreCounts, DatabaseError> {
        tracing::info!("building indexes");
        self.db.build_indexes().await?;

        let tx = self.db.conn().transaction().await?;
        tx.execute("DELETE FROM versions", ()).await?;
        tx.execute(
            "INSERT INTO versions (dbversion, built_at) VALUES (?1, ?2)",
            libsql::params![SCHEMA_VERSION, Utc::now().to_rfc3339()],
        )
        .await?;
        tx.commit().await?;

        let counts = self.db.counts().await?;
        tracing::info!(?counts, "store finished");
        Ok(counts)
    }
}

async fn insert_entries(
    conn: &libsql::Connection,
    entries: &[Entry],
) -> Result<BatchIds, DatabaseError> {
    let mut next_reading = max_id(conn, "readings").await? + 1;
    let mut next_sense = max_id(conn, "senses").await? + 1;
    let mut ids = BatchIds::default();

    for entry in entries {
        let frequent = entry.derive_frequent();
        conn.execute(
            "INSERT INTO entries (ent_seq, frequent) VALUES (?1, ?2)",
            libsql::params![entry.ent_seq, flag(frequent)],
        )
        .await?;

        for (ord, kanji) in (0_i64..).zip(&entry.kanjis) {
            conn.execute(
                "INSERT INTO kanjis (ent_seq, ord, kanji, info, frequent) VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    entry.ent_seq,
                    ord,
                    kanji.text.as_str(),
                    join_tags(&kanji.info, INFO_SEPARATOR),
                    flag(kanji.frequent)
                ],
            )
            .await?;
        }

        for (ord, reading) in (0_i64..).zip(&entry.readings) {
            insert_reading(conn, entry.ent_seq, ord, next_reading, reading).await?;
            ids.readings.push(next_reading);
            next_reading += 1;
        }

        for (ord, sense) in (0_i64..).zip(&entry.senses) {
            insert_sense(conn, entry.ent_seq, ord, next_sense, sense, frequent).await?;
            ids.senses.push(next_sense);
            next_sense += 1;
        }
    }
    Ok(ids)
}

async fn max_id(conn: &libsql::Connection, table: &str) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT COALESCE(MAX(id), 0) FROM {table}"), ())
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}

async fn insert_reading(
    conn: &libsql::Connection,
    ent_seq: i64,
    ord: i64,
    id: i64,
    reading: &Reading,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO readings (id, ent_seq, ord, reading, no_kanji, info, frequent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            id,
            ent_seq,
            ord,
            reading.text.as_str(),
            flag(reading.no_kanji),
            join_tags(&reading.info, INFO_SEPARATOR),
            flag(reading.frequent)
        ],
    )
    .await?;

    for kanji in &reading.restrictions {
        conn.execute(
            "INSERT INTO reading_restrictions (reading_id, kanji) VALUES (?1, ?2)",
            libsql::params![id, kanji.as_str()],
        )
        .await?;
    }
    Ok(())
}

async fn insert_sense(
    conn: &libsql::Connection,
    ent_seq: i64,
    ord: i64,
    id: i64,
    sense: &Sense,
    frequent: bool,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO senses (id, ent_seq, ord, pos, field, misc, dial, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        libsql::params![
            id,
            ent_seq,
            ord,
            join_tags(&sense.tags.pos, TAG_SEPARATOR),
            join_tags(&sense.tags.field, TAG_SEPARATOR),
            join_tags(&sense.tags.misc, TAG_SEPARATOR),
            join_tags(&sense.tags.dial, TAG_SEPARATOR),
            sense.note.as_deref()
        ],
    )
    .await?;

    for kanji in &sense.stagk {
        conn.execute(
            "INSERT INTO sense_kanji_restrictions (sense_id, kanji) VALUES (?1, ?2)",
            libsql::params![id, kanji.as_str()],
        )
        .await?;
    }
    for reading in &sense.stagr {
        conn.execute(
            "INSERT INTO sense_reading_restrictions (sense_id, reading) VALUES (?1, ?2)",
            libsql::params![id, reading.as_str()],
        )
        .await?;
    }
    for (ord, gloss) in (0_i64..).zip(&sense.glosses) {
        conn.execute(
            "INSERT INTO glosses (sense_id, ent_seq, ord, gloss, frequent) VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![id, ent_seq, ord, gloss.as_str(), flag(frequent)],
        )
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotoba_core::model::{Kanji, SenseTags};
    use pretty_assertions::assert_eq;

    async fn test_writer() -> StoreWriter {
        StoreWriter::from_db(KotobaDb::open_local(":memory:").await.unwrap())
    }

    fn entry(ent_seq: i64, readings: usize, senses: usize) -> Entry {
        let mut entry = Entry::new(ent_seq);
        entry.kanjis.push(Kanji {
            text: format!("漢{ent_seq}"),
            ..Kanji::default()
        });
        for i in 0..readings {
            entry.readings.push(Reading {
                text: format!("かな{i}"),
                ..Reading::default()
            });
        }
        for i in 0..senses {
            entry.senses.push(Sense {
                tags: SenseTags {
                    pos: vec!["n".into()],
                    ..SenseTags::default()
                },
                glosses: vec![format!("gloss {i}")],
                ..Sense::default()
            });
        }
        entry
    }

    #[tokio::test]
    async fn ids_continue_across_batches() {
        let writer = test_writer().await;

        let first = writer
            .write_batch(&[entry(1, 2, 1), entry(2, 1, 2)])
            .await
            .unwrap();
        let second = writer.write_batch(&[entry(3, 2, 2)]).await.unwrap();

        assert_eq!(first.readings, vec![1, 2, 3]);
        assert_eq!(first.senses, vec![1, 2, 3]);
        assert_eq!(second.readings, vec![4, 5]);
        assert_eq!(second.senses, vec![4, 5]);
    }

    #[tokio::test]
    async fn ids_continue_from_existing_rows() {
        let writer = test_writer().await;
        writer
            .db()
            .conn()
            .execute("INSERT INTO entries (ent_seq, frequent) VALUES (99, 0)", ())
            .await
            .unwrap();
        writer
            .db()
            .conn()
            .execute(
                "INSERT INTO readings (id, ent_seq, ord, reading) VALUES (41, 99, 0, 'x')",
                (),
            )
            .await
            .unwrap();

        let ids = writer.write_batch(&[entry(1, 1, 0)]).await.unwrap();
        assert_eq!(ids.readings, vec![42]);
    }

    #[tokio::test]
    async fn gloss_rows_copy_entry_frequency() {
        let writer = test_writer().await;
        let mut common = entry(10, 1, 1);
        common.readings[0].frequent = true;
        writer.write_batch(&[common, entry(11, 1, 1)]).await.unwrap();

        let mut rows = writer
            .db()
            .conn()
            .query("SELECT ent_seq, frequent FROM glosses ORDER BY ent_seq", ())
            .await
            .unwrap();
        let mut seen = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            seen.push((row.get::<i64>(0).unwrap(), row.get::<i64>(1).unwrap()));
        }
        assert_eq!(seen, vec![(10, 1), (11, 0)]);

        let frequent = writer
            .db()
            .query_scalar("SELECT frequent FROM entries WHERE ent_seq = 10")
            .await
            .unwrap();
        assert_eq!(frequent, 1);
    }

    #[tokio::test]
    async fn duplicate_ent_seq_rolls_back_batch() {
        let writer = test_writer().await;
        writer.write_batch(&[entry(1, 1, 1)]).await.unwrap();

        let result = writer.write_batch(&[entry(2, 1, 1), entry(1, 1, 1)]).await;
        assert!(result.is_err());

        let entries = writer.db().query_scalar("SELECT COUNT(*) FROM entries").await.unwrap();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn finish_builds_indexes_and_version() {
        let writer = test_writer().await;
        writer.write_batch(&[entry(1, 1, 2)]).await.unwrap();
        writer
            .write_abbreviations(&AbbreviationTable::builtin())
            .await
            .unwrap();

        let counts = writer.finish().await.unwrap();
        assert_eq!(
            counts,
            StoreCounts {
                entries: 1,
                kanjis: 1,
                readings: 1,
                senses: 2,
                glosses: 2,
            }
        );

        let db = writer.db();
        let indexes = db
            .query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'")
            .await
            .unwrap();
        assert!(indexes > 0);

        // kanji + reading + two glosses
        let fts_rows = db.query_scalar("SELECT COUNT(*) FROM search_fts").await.unwrap();
        assert_eq!(fts_rows, 4);

        let versions = db.query_scalar("SELECT COUNT(*) FROM versions").await.unwrap();
        assert_eq!(versions, 1);
    }
}
