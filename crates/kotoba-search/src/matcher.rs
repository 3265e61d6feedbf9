//! Regular expressions used by the resolver.

use kotoba_core::query::Extent;
use regex::{Regex, RegexBuilder};

use crate::error::SearchError;

/// Compile a pattern-mode query for one extent.
///
/// Whole-field patterns are anchored at both ends, word patterns at word
/// boundaries, partial patterns not at all.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPattern`] if the pattern does not compile.
pub fn pattern_regex(
    pattern: &str,
    extent: Extent,
    case_sensitive: bool,
) -> Result<Regex, SearchError> {
    let anchored = match extent {
        Extent::Whole => format!("^(?:{pattern})$"),
        Extent::Word => format!(r"\b(?:{pattern})\b"),
        Extent::Partial => pattern.to_string(),
    };
    build(&anchored, case_sensitive).map_err(|error| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: error.to_string(),
    })
}

/// Matcher for a literal query standing as a whole word inside a value.
///
/// Word edges are the start or end of the value or any non-word character,
/// so queries that begin or end with punctuation still match.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPattern`] if the escaped literal exceeds the
/// regex size limit.
pub fn literal_word_regex(literal: &str, case_sensitive: bool) -> Result<Regex, SearchError> {
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(literal));
    build(&pattern, case_sensitive).map_err(|error| SearchError::InvalidPattern {
        pattern: literal.to_string(),
        reason: error.to_string(),
    })
}

fn build(pattern: &str, case_sensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Extent::Whole, "aikido", true)]
    #[case(Extent::Whole, "aikido practitioner", false)]
    #[case(Extent::Word, "aikido practitioner", true)]
    #[case(Extent::Word, "aikidoka", false)]
    #[case(Extent::Partial, "the aikidoka", true)]
    fn pattern_extents(#[case] extent: Extent, #[case] value: &str, #[case] expected: bool) {
        let re = pattern_regex("aiki(do)?", extent, false).unwrap();
        assert_eq!(re.is_match(value), expected, "{extent} on '{value}'");
    }

    #[test]
    fn alternation_is_anchored_as_a_group() {
        let re = pattern_regex("ki|do", Extent::Whole, false).unwrap();
        assert!(re.is_match("do"));
        assert!(!re.is_match("kido"));
    }

    #[test]
    fn case_insensitive_pattern() {
        assert!(pattern_regex("aikido", Extent::Whole, false).unwrap().is_match("Aikido"));
        assert!(!pattern_regex("aikido", Extent::Whole, true).unwrap().is_match("Aikido"));
    }

    #[rstest]
    #[case("spirit", "fighting spirit", true)]
    #[case("spirit", "spirited", false)]
    #[case("C++", "C++ programming", true)]
    #[case("a.b", "axb", false)]
    #[case("sure", "100% sure", true)]
    fn literal_word_edges(#[case] literal: &str, #[case] value: &str, #[case] expected: bool) {
        let re = literal_word_regex(literal, true).unwrap();
        assert_eq!(re.is_match(value), expected, "'{literal}' in '{value}'");
    }

    #[test]
    fn invalid_pattern_reports_original_text() {
        let err = pattern_regex("(", Extent::Whole, false).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { pattern, .. } if pattern == "("));
    }
}
