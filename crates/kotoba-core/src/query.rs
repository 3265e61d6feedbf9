//! Search vocabulary: searchable fields and match extents.
//!
//! Both enums use `snake_case` serialization and parse from their lowercase
//! names, so the CLI, config files and JSON output agree on spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A searchable field of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Kanji,
    Reading,
    Gloss,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Kanji, Self::Reading, Self::Gloss];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kanji => "kanji",
            Self::Reading => "reading",
            Self::Gloss => "gloss",
        }
    }

    /// Whether word-boundary matching is meaningful on this field.
    ///
    /// Kanji and kana text has no word separators.
    #[must_use]
    pub const fn supports_word_extent(self) -> bool {
        matches!(self, Self::Gloss)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kanji" => Ok(Self::Kanji),
            "reading" => Ok(Self::Reading),
            "gloss" => Ok(Self::Gloss),
            other => Err(CoreError::Validation(format!("unknown field '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// How much of a field a query must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// The whole field value.
    Whole,
    /// A whole word inside the field value.
    Word,
    /// Any substring of the field value.
    Partial,
}

impl Extent {
    pub const ALL: [Self; 3] = [Self::Whole, Self::Word, Self::Partial];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::Word => "word",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whole" => Ok(Self::Whole),
            "word" => Ok(Self::Word),
            "partial" => Ok(Self::Partial),
            other => Err(CoreError::Validation(format!("unknown extent '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_its_own_name() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!("meaning".parse::<Field>().is_err());
    }

    #[test]
    fn extent_parses_its_own_name() {
        for extent in Extent::ALL {
            assert_eq!(extent.as_str().parse::<Extent>().unwrap(), extent);
        }
        assert!("prefix".parse::<Extent>().is_err());
    }

    #[test]
    fn only_gloss_supports_word_matching() {
        assert!(Field::Gloss.supports_word_extent());
        assert!(!Field::Kanji.supports_word_extent());
        assert!(!Field::Reading.supports_word_extent());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Extent::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
        let field: Field = serde_json::from_str("\"reading\"").unwrap();
        assert_eq!(field, Field::Reading);
    }
}
