//! Cascade evaluation against a published store.
//!
//! Literal conditions run as SQL over the indexed columns (word matching on
//! glosses goes through the FTS5 table and is verified afterwards). Pattern
//! conditions scan the raw field values and test them with [`regex`].

use std::path::Path;

use kotoba_core::query::{Extent, Field};
use kotoba_db::KotobaDb;
use serde::Serialize;

use crate::condition::{SearchCondition, SearchRequest, has_latin_letter, plan};
use crate::error::SearchError;
use crate::matcher;

/// Outcome of a cascade: the condition that matched and its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// `None` when no condition matched anything.
    pub condition: Option<SearchCondition>,
    /// Matching entries, frequent ones first, then by `ent_seq`.
    pub ent_seqs: Vec<i64>,
}

impl Resolution {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ent_seqs.is_empty()
    }
}

/// Row matched by one condition before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hit {
    ent_seq: i64,
    frequent: bool,
}

/// Read-only search handle over one store.
pub struct Resolver {
    db: KotobaDb,
}

impl Resolver {
    #[must_use]
    pub const fn new(db: KotobaDb) -> Self {
        Self { db }
    }

    /// Open the published store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Database` if the store is missing or unreadable.
    pub async fn open(path: &Path) -> Result<Self, SearchError> {
        Ok(Self::new(KotobaDb::open_existing(path).await?))
    }

    #[must_use]
    pub const fn db(&self) -> &KotobaDb {
        &self.db
    }

    /// Plan `request` and return the result of the first condition that
    /// matches anything.
    ///
    /// # Errors
    ///
    /// Planning errors are returned before the store is touched; query
    /// failures surface as `SearchError::Database`.
    pub async fn resolve(&self, request: &SearchRequest) -> Result<Resolution, SearchError> {
        let query = request.query.trim();
        for condition in plan(request)? {
            let ent_seqs = self
                .evaluate(&condition, query, request.frequent_only, request.limit)
                .await?;
            tracing::debug!(
                field = %condition.field,
                extent = %condition.extent,
                case_sensitive = condition.case_sensitive,
                regex = condition.regex,
                matches = ent_seqs.len(),
                "search condition evaluated"
            );
            if !ent_seqs.is_empty() {
                return Ok(Resolution {
                    condition: Some(condition),
                    ent_seqs,
                });
            }
        }
        Ok(Resolution {
            condition: None,
            ent_seqs: Vec::new(),
        })
    }

    /// Evaluate a single condition.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the query or pattern fails.
    pub async fn evaluate(
        &self,
        condition: &SearchCondition,
        query: &str,
        frequent_only: bool,
        limit: u32,
    ) -> Result<Vec<i64>, SearchError> {
        let hits = if condition.regex {
            self.scan_pattern(condition, query, frequent_only).await?
        } else {
            match condition.extent {
                Extent::Whole | Extent::Partial => {
                    self.literal(condition, query, frequent_only, limit).await?
                }
                Extent::Word => self.literal_word(condition, query, frequent_only).await?,
            }
        };
        Ok(rank(hits, limit))
    }

    async fn literal(
        &self,
        condition: &SearchCondition,
        query: &str,
        frequent_only: bool,
        limit: u32,
    ) -> Result<Vec<Hit>, SearchError> {
        let (table, column) = columns(condition.field);
        let (predicate, value) = match condition.extent {
            Extent::Whole => (
                whole_predicate(condition, column, query),
                query.to_string(),
            ),
            Extent::Partial if condition.case_sensitive => {
                (format!("instr(t.{column}, ?1) > 0"), query.to_string())
            }
            Extent::Partial | Extent::Word => (
                format!(r"t.{column} LIKE '%' || ?1 || '%' ESCAPE '\'"),
                escape_like(query),
            ),
        };
        let sql = format!(
            "SELECT DISTINCT e.ent_seq, e.frequent FROM {table} t
             JOIN entries e ON e.ent_seq = t.ent_seq
             WHERE {predicate}{frequent}
             ORDER BY e.frequent DESC, e.ent_seq
             LIMIT ?2",
            frequent = frequent_clause(frequent_only),
        );

        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params![value, i64::from(limit)])
            .await?;
        let mut hits = Vec::new();
        while let Some(row) = rows.next().await? {
            hits.push(Hit {
                ent_seq: row.get::<i64>(0)?,
                frequent: row.get::<i64>(1)? != 0,
            });
        }
        Ok(hits)
    }

    /// Gloss word matching: FTS5 phrase candidates, then a word-edge check
    /// honouring case sensitivity.
    async fn literal_word(
        &self,
        condition: &SearchCondition,
        query: &str,
        frequent_only: bool,
    ) -> Result<Vec<Hit>, SearchError> {
        if condition.field != Field::Gloss {
            return Err(SearchError::Unsupported {
                field: condition.field,
                extent: Extent::Word,
            });
        }
        // A phrase with no tokens matches nothing.
        if !query.chars().any(char::is_alphanumeric) {
            return Ok(Vec::new());
        }

        let verify = matcher::literal_word_regex(query, condition.case_sensitive)?;
        let sql = format!(
            "SELECT e.ent_seq, e.frequent, search_fts.text FROM search_fts
             JOIN entries e ON e.ent_seq = search_fts.ent_seq
             WHERE search_fts MATCH ?1 AND search_fts.kind = 'gloss'{}",
            frequent_clause(frequent_only),
        );
        let mut rows = self.db.conn().query(&sql, [fts_phrase(query)]).await?;

        let mut hits = Vec::new();
        while let Some(row) = rows.next().await? {
            let text = row.get::<String>(2)?;
            if verify.is_match(&text) {
                hits.push(Hit {
                    ent_seq: row.get::<i64>(0)?,
                    frequent: row.get::<i64>(1)? != 0,
                });
            }
        }
        Ok(hits)
    }

    async fn scan_pattern(
        &self,
        condition: &SearchCondition,
        pattern: &str,
        frequent_only: bool,
    ) -> Result<Vec<Hit>, SearchError> {
        let regex = matcher::pattern_regex(pattern, condition.extent, condition.case_sensitive)?;
        let (table, column) = columns(condition.field);
        let sql = format!(
            "SELECT e.ent_seq, e.frequent, t.{column} FROM {table} t
             JOIN entries e ON e.ent_seq = t.ent_seq{}",
            if frequent_only {
                " WHERE e.frequent = 1"
            } else {
                ""
            },
        );
        let mut rows = self.db.conn().query(&sql, ()).await?;

        let mut hits = Vec::new();
        while let Some(row) = rows.next().await? {
            let value = row.get::<String>(2)?;
            if regex.is_match(&value) {
                hits.push(Hit {
                    ent_seq: row.get::<i64>(0)?,
                    frequent: row.get::<i64>(1)? != 0,
                });
            }
        }
        Ok(hits)
    }
}

const fn columns(field: Field) -> (&'static str, &'static str) {
    match field {
        Field::Kanji => ("kanjis", "kanji"),
        Field::Reading => ("readings", "reading"),
        Field::Gloss => ("glosses", "gloss"),
    }
}

/// Equality on the whole value. Glosses are indexed NOCASE, kanji and
/// readings BINARY; NOCASE folds ASCII only.
fn whole_predicate(condition: &SearchCondition, column: &str, query: &str) -> String {
    match (condition.field, condition.case_sensitive) {
        (Field::Gloss, false) => format!("t.{column} = ?1"),
        (Field::Gloss, true) => format!("t.{column} = ?1 AND t.{column} = ?1 COLLATE BINARY"),
        (_, false) if has_latin_letter(query) => format!("t.{column} = ?1 COLLATE NOCASE"),
        _ => format!("t.{column} = ?1"),
    }
}

const fn frequent_clause(frequent_only: bool) -> &'static str {
    if frequent_only {
        " AND e.frequent = 1"
    } else {
        ""
    }
}

/// Order frequent entries first, then by `ent_seq`; drop duplicates; cap.
fn rank(mut hits: Vec<Hit>, limit: u32) -> Vec<i64> {
    hits.sort_by_key(|hit| (!hit.frequent, hit.ent_seq));
    let mut ent_seqs: Vec<i64> = hits.into_iter().map(|hit| hit.ent_seq).collect();
    ent_seqs.dedup();
    ent_seqs.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    ent_seqs
}

/// Escape `LIKE` wildcards with `\`.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Quote a literal as a single FTS5 phrase.
fn fts_phrase(query: &str) -> String {
    format!("\"{}\"", query.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hit(ent_seq: i64, frequent: bool) -> Hit {
        Hit { ent_seq, frequent }
    }

    #[test]
    fn rank_orders_frequent_first_and_dedups() {
        let hits = vec![
            hit(30, false),
            hit(20, true),
            hit(10, false),
            hit(20, true),
            hit(40, true),
        ];
        assert_eq!(rank(hits, 10), vec![20, 40, 10, 30]);
    }

    #[test]
    fn rank_applies_limit_after_dedup() {
        let hits = vec![hit(1, true), hit(1, true), hit(2, true), hit(3, false)];
        assert_eq!(rank(hits, 2), vec![1, 2]);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like(r"100%_a\b"), r"100\%\_a\\b");
    }

    #[test]
    fn fts_phrase_doubles_quotes() {
        assert_eq!(fts_phrase(r#"say "hi""#), r#""say ""hi""""#);
    }
}
