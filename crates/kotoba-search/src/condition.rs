//! Search requests and the cascade of concrete conditions they expand to.

use kotoba_core::query::{Extent, Field};
use serde::Serialize;

use crate::error::SearchError;
use crate::matcher;

/// Result cap when the caller does not give one.
pub const DEFAULT_LIMIT: u32 = 100;

const LATIN_FIRST: [Field; 3] = [Field::Gloss, Field::Kanji, Field::Reading];
const JAPANESE_FIRST: [Field; 3] = [Field::Kanji, Field::Reading, Field::Gloss];

/// What the caller asked for. `None` fields are decided by heuristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub field: Option<Field>,
    pub extent: Option<Extent>,
    pub case_sensitive: Option<bool>,
    /// Treat the query as a regular expression.
    pub regex: bool,
    /// Only return entries marked frequent.
    pub frequent_only: bool,
    pub limit: u32,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            field: None,
            extent: None,
            case_sensitive: None,
            regex: false,
            frequent_only: false,
            limit: DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub const fn field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    #[must_use]
    pub const fn extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    #[must_use]
    pub const fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.case_sensitive = Some(sensitive);
        self
    }

    #[must_use]
    pub const fn regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    #[must_use]
    pub const fn frequent_only(mut self, frequent_only: bool) -> Self {
        self.frequent_only = frequent_only;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// One concrete step of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchCondition {
    pub field: Field,
    pub extent: Extent,
    pub case_sensitive: bool,
    pub regex: bool,
}

/// Whether the query contains a Latin letter (suggests an English gloss).
#[must_use]
pub fn has_latin_letter(query: &str) -> bool {
    query.chars().any(|c| c.is_ascii_alphabetic())
}

/// Whether the query contains an uppercase Latin letter.
#[must_use]
pub fn has_uppercase_latin(query: &str) -> bool {
    query.chars().any(|c| c.is_ascii_uppercase())
}

/// Fields to try, in order.
#[must_use]
pub fn field_order(query: &str, explicit: Option<Field>) -> Vec<Field> {
    match explicit {
        Some(field) => vec![field],
        None if has_latin_letter(query) => LATIN_FIRST.to_vec(),
        None => JAPANESE_FIRST.to_vec(),
    }
}

/// Extents to try on `field`, in order.
///
/// Word matching is only meaningful on glosses; on the other fields a word
/// step would repeat the whole-field step, so it is folded into it.
#[must_use]
pub fn extent_order(field: Field, explicit: Option<Extent>) -> Vec<Extent> {
    let candidates = explicit.map_or_else(|| Extent::ALL.to_vec(), |extent| vec![extent]);
    let mut extents = Vec::with_capacity(candidates.len());
    for extent in candidates {
        let extent = if extent == Extent::Word && !field.supports_word_extent() {
            Extent::Whole
        } else {
            extent
        };
        if !extents.contains(&extent) {
            extents.push(extent);
        }
    }
    extents
}

/// Expand a request into its ordered cascade of conditions.
///
/// # Errors
///
/// - [`SearchError::InvalidQuery`] for an empty query or a zero limit.
/// - [`SearchError::Unsupported`] when word matching is requested
///   explicitly on the kanji or reading field.
/// - [`SearchError::InvalidPattern`] when a pattern-mode query does not
///   compile.
pub fn plan(request: &SearchRequest) -> Result<Vec<SearchCondition>, SearchError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(SearchError::InvalidQuery(
            "search query cannot be empty".to_string(),
        ));
    }
    if request.limit == 0 {
        return Err(SearchError::InvalidQuery(
            "limit must be at least 1".to_string(),
        ));
    }
    if let (Some(field), Some(Extent::Word)) = (request.field, request.extent)
        && !field.supports_word_extent()
    {
        return Err(SearchError::Unsupported {
            field,
            extent: Extent::Word,
        });
    }

    let case_sensitive = request
        .case_sensitive
        .unwrap_or_else(|| has_uppercase_latin(query));
    if request.regex {
        matcher::pattern_regex(query, Extent::Partial, case_sensitive)?;
    }

    let mut conditions = Vec::new();
    for field in field_order(query, request.field) {
        for extent in extent_order(field, request.extent) {
            conditions.push(SearchCondition {
                field,
                extent,
                case_sensitive,
                regex: request.regex,
            });
        }
    }
    Ok(conditions)
}
