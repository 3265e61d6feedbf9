//! Read side of a published store: entry reassembly and store metadata.

use chrono::{DateTime, Utc};
use kotoba_core::abbrev::Abbreviation;
use kotoba_core::model::{
    Entry, INFO_SEPARATOR, Kanji, Reading, Sense, SenseTags, TAG_SEPARATOR, split_tags,
};
use serde::Serialize;

use crate::KotobaDb;
use crate::error::DatabaseError;
use crate::helpers::{get_flag, get_opt_string, parse_datetime};

/// The single-row version marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreVersion {
    pub schema: String,
    pub built_at: DateTime<Utc>,
}

/// Row counts of the main tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub entries: i64,
    pub kanjis: i64,
    pub readings: i64,
    pub senses: i64,
    pub glosses: i64,
}

impl KotobaDb {
    /// Reassemble entries in the order of `ent_seqs`, skipping unknown ids.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn fetch_entries(&self, ent_seqs: &[i64]) -> Result<Vec<Entry>, DatabaseError> {
        let mut entries = Vec::with_capacity(ent_seqs.len());
        for &ent_seq in ent_seqs {
            if let Some(entry) = self.fetch_entry(ent_seq).await? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Reassemble one entry with its spellings, readings, senses and glosses.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn fetch_entry(&self, ent_seq: i64) -> Result<Option<Entry>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT frequent FROM entries WHERE ent_seq = ?1", [ent_seq])
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };

        Ok(Some(Entry {
            ent_seq,
            frequent: get_flag(&row, 0)?,
            kanjis: self.fetch_kanjis(ent_seq).await?,
            readings: self.fetch_readings(ent_seq).await?,
            senses: self.fetch_senses(ent_seq).await?,
        }))
    }

    async fn fetch_kanjis(&self, ent_seq: i64) -> Result<Vec<Kanji>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT kanji, info, frequent FROM kanjis WHERE ent_seq = ?1 ORDER BY ord",
                [ent_seq],
            )
            .await?;
        let mut kanjis = Vec::new();
        while let Some(row) = rows.next().await? {
            kanjis.push(Kanji {
                text: row.get::<String>(0)?,
                info: split_tags(get_opt_string(&row, 1)?.as_deref(), INFO_SEPARATOR),
                frequent: get_flag(&row, 2)?,
            });
        }
        Ok(kanjis)
    }

    async fn fetch_readings(&self, ent_seq: i64) -> Result<Vec<Reading>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, reading, no_kanji, info, frequent FROM readings
                 WHERE ent_seq = ?1 ORDER BY ord",
                [ent_seq],
            )
            .await?;
        let mut readings = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = row.get::<i64>(0)?;
            readings.push(Reading {
                id: Some(id),
                text: row.get::<String>(1)?,
                no_kanji: get_flag(&row, 2)?,
                info: split_tags(get_opt_string(&row, 3)?.as_deref(), INFO_SEPARATOR),
                frequent: get_flag(&row, 4)?,
                restrictions: self
                    .fetch_strings(
                        "SELECT kanji FROM reading_restrictions WHERE reading_id = ?1 ORDER BY rowid",
                        id,
                    )
                    .await?,
            });
        }
        Ok(readings)
    }

    async fn fetch_senses(&self, ent_seq: i64) -> Result<Vec<Sense>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, pos, field, misc, dial, note FROM senses WHERE ent_seq = ?1 ORDER BY ord",
                [ent_seq],
            )
            .await?;
        let mut senses = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = row.get::<i64>(0)?;
            let tag = |idx| -> Result<Vec<String>, DatabaseError> {
                Ok(split_tags(get_opt_string(&row, idx)?.as_deref(), TAG_SEPARATOR))
            };
            let tags = SenseTags {
                pos: tag(1)?,
                field: tag(2)?,
                misc: tag(3)?,
                dial: tag(4)?,
            };
            let note = get_opt_string(&row, 5)?;

            senses.push(Sense {
                id: Some(id),
                tags,
                note,
                stagk: self
                    .fetch_strings(
                        "SELECT kanji FROM sense_kanji_restrictions WHERE sense_id = ?1 ORDER BY rowid",
                        id,
                    )
                    .await?,
                stagr: self
                    .fetch_strings(
                        "SELECT reading FROM sense_reading_restrictions WHERE sense_id = ?1 ORDER BY rowid",
                        id,
                    )
                    .await?,
                glosses: self
                    .fetch_strings(
                        "SELECT gloss FROM glosses WHERE sense_id = ?1 ORDER BY ord",
                        id,
                    )
                    .await?,
            });
        }
        Ok(senses)
    }

    async fn fetch_strings(&self, sql: &str, id: i64) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self.conn().query(sql, [id]).await?;
        let mut values = Vec::new();
        while let Some(row) = rows.next().await? {
            values.push(row.get::<String>(0)?);
        }
        Ok(values)
    }

    /// The version marker, or `None` for a store that was never finished.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the timestamp is malformed.
    pub async fn version(&self) -> Result<Option<StoreVersion>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT dbversion, built_at FROM versions LIMIT 1", ())
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        Ok(Some(StoreVersion {
            schema: row.get::<String>(0)?,
            built_at: parse_datetime(&row.get::<String>(1)?)?,
        }))
    }

    /// Row counts of the main tables.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any count query fails.
    pub async fn counts(&self) -> Result<StoreCounts, DatabaseError> {
        Ok(StoreCounts {
            entries: self.query_scalar("SELECT COUNT(*) FROM entries").await?,
            kanjis: self.query_scalar("SELECT COUNT(*) FROM kanjis").await?,
            readings: self.query_scalar("SELECT COUNT(*) FROM readings").await?,
            senses: self.query_scalar("SELECT COUNT(*) FROM senses").await?,
            glosses: self.query_scalar("SELECT COUNT(*) FROM glosses").await?,
        })
    }

    /// Stored abbreviations ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn abbreviations(&self) -> Result<Vec<Abbreviation>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT abbrev, short_expansion, long_expansion, provisional
                 FROM abbreviations ORDER BY abbrev",
                (),
            )
            .await?;
        let mut abbrevs = Vec::new();
        while let Some(row) = rows.next().await? {
            abbrevs.push(Abbreviation {
                code: row.get::<String>(0)?,
                short: row.get::<String>(1)?,
                long: row.get::<String>(2)?,
                provisional: get_flag(&row, 3)?,
            });
        }
        Ok(abbrevs)
    }
}
