//! Abbreviation table and the long-to-short tag resolver.
//!
//! The source document declares its tags as DTD entities (`<!ENTITY n "noun
//! (common) (futsuumeishi)">`) and references them in element text (`&n;`).
//! Text reaches the parser with entities expanded to their long form, so the
//! parser asks [`AbbreviationTable::resolve`] for the code behind it.
//!
//! The table starts from a built-in catalogue carrying short human
//! descriptions. Declarations the catalogue does not know are registered
//! provisionally with the long description standing in for the short one.
//! When several codes share a long description, the ones the document
//! declared take precedence over undeclared catalogue codes.

mod catalogue;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One tag code with its human descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    pub code: String,
    pub short: String,
    pub long: String,
    /// Declared by the document but missing from the built-in catalogue.
    pub provisional: bool,
}

/// Outcome of registering a document entity declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    /// The code was already in the table.
    Known,
    /// The code was new; its short description is a copy of the long one.
    Provisional,
}

/// Errors from the long-to-short resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbbrevError {
    /// No declared tag has this long description.
    #[error("no abbreviation declared for '{0}'")]
    Unknown(String),

    /// More than one code shares this long description.
    #[error("abbreviation '{long}' is ambiguous between codes {codes:?}")]
    Ambiguous { long: String, codes: Vec<String> },
}

/// Bidirectional mapping between tag codes and their descriptions.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationTable {
    by_code: BTreeMap<String, Abbreviation>,
    by_long: HashMap<String, Vec<String>>,
    declared: HashSet<String>,
}

impl AbbreviationTable {
    /// An empty table (no built-in catalogue).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table holding the built-in catalogue.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (code, short, long) in catalogue::BUILTIN {
            table.insert(Abbreviation {
                code: (*code).to_string(),
                short: (*short).to_string(),
                long: (*long).to_string(),
                provisional: false,
            });
        }
        table
    }

    /// Register an entity declared by the source document.
    ///
    /// A known code keeps its short description and adopts the declared long
    /// one. An unknown code is added provisionally and a warning is logged.
    pub fn declare(&mut self, code: &str, long: &str) -> Declared {
        self.declared.insert(code.to_string());
        if let Some(existing) = self.by_code.get(code) {
            if existing.long != long {
                tracing::debug!(code, old = %existing.long, new = long, "entity redeclared with new text");
                let mut updated = existing.clone();
                updated.long = long.to_string();
                self.insert(updated);
            }
            return Declared::Known;
        }

        tracing::warn!(code, long, "missing short description for document entity; using its long form");
        self.insert(Abbreviation {
            code: code.to_string(),
            short: long.to_string(),
            long: long.to_string(),
            provisional: true,
        });
        Declared::Provisional
    }

    /// Long description of a code, as an entity reference expands to.
    #[must_use]
    pub fn expand(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(|a| a.long.as_str())
    }

    /// Code behind a long description.
    ///
    /// # Errors
    ///
    /// [`AbbrevError::Unknown`] when nothing declares `long`;
    /// [`AbbrevError::Ambiguous`] when several codes remain after declared
    /// codes are preferred over undeclared catalogue ones.
    pub fn resolve(&self, long: &str) -> Result<&str, AbbrevError> {
        let Some(codes) = self.by_long.get(long).filter(|codes| !codes.is_empty()) else {
            return Err(AbbrevError::Unknown(long.to_string()));
        };
        let declared: Vec<&String> = codes
            .iter()
            .filter(|code| self.declared.contains(*code))
            .collect();
        let candidates: Vec<&String> = if declared.is_empty() {
            codes.iter().collect()
        } else {
            declared
        };

        match candidates.as_slice() {
            [code] => Ok(code.as_str()),
            _ => Err(AbbrevError::Ambiguous {
                long: long.to_string(),
                codes: candidates.into_iter().cloned().collect(),
            }),
        }
    }

    /// Whether the source document declared `code`.
    #[must_use]
    pub fn is_declared(&self, code: &str) -> bool {
        self.declared.contains(code)
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Abbreviation> {
        self.by_code.get(code)
    }

    /// All abbreviations ordered by code.
    pub fn entries(&self) -> impl Iterator<Item = &Abbreviation> {
        self.by_code.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    fn insert(&mut self, abbrev: Abbreviation) {
        if let Some(previous) = self.by_code.remove(&abbrev.code) {
            if let Some(codes) = self.by_long.get_mut(&previous.long) {
                codes.retain(|c| c != &previous.code);
                if codes.is_empty() {
                    self.by_long.remove(&previous.long);
                }
            }
        }
        self.by_long
            .entry(abbrev.long.clone())
            .or_default()
            .push(abbrev.code.clone());
        self.by_code.insert(abbrev.code.clone(), abbrev);
    }
}
