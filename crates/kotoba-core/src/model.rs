//! Lexical object model.
//!
//! Pure data: an [`Entry`] owns its kanji spellings, readings and senses.
//! Surrogate ids on [`Reading`] and [`Sense`] stay `None` until the storage
//! writer assigns them; entries read back from a store carry them.

use serde::{Deserialize, Serialize};

/// Priority codes that mark a kanji spelling or reading as frequent.
pub const PRIORITY_CODES: &[&str] = &["news1", "ichi1", "spec1", "spec2", "gai1"];

/// Separator for informational tags on kanji spellings and readings in storage.
pub const INFO_SEPARATOR: &str = ",";

/// Separator for sense tags of one category in storage.
pub const TAG_SEPARATOR: &str = ";";

/// Separator used when a sense carries more than one usage note.
pub const NOTE_SEPARATOR: &str = "; ";

/// Whether a `ke_pri` / `re_pri` value counts as a frequency marker.
#[must_use]
pub fn is_priority_code(code: &str) -> bool {
    PRIORITY_CODES.contains(&code)
}

/// One dictionary headword group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub ent_seq: i64,
    pub frequent: bool,
    pub kanjis: Vec<Kanji>,
    pub readings: Vec<Reading>,
    pub senses: Vec<Sense>,
}

impl Entry {
    #[must_use]
    pub fn new(ent_seq: i64) -> Self {
        Self {
            ent_seq,
            ..Self::default()
        }
    }

    /// True iff any owned kanji spelling or reading is frequent.
    #[must_use]
    pub fn derive_frequent(&self) -> bool {
        self.kanjis.iter().any(|k| k.frequent) || self.readings.iter().any(|r| r.frequent)
    }

    /// Recompute `frequent` from the owned spellings and readings.
    pub fn refresh_frequent(&mut self) {
        self.frequent = self.derive_frequent();
    }
}

/// A kanji spelling (`k_ele`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kanji {
    pub text: String,
    /// Informational tag codes (`ke_inf`).
    pub info: Vec<String>,
    pub frequent: bool,
}

/// A phonetic reading (`r_ele`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub id: Option<i64>,
    pub text: String,
    /// `re_nokanji`: the reading is not a true reading of the kanji.
    pub no_kanji: bool,
    pub frequent: bool,
    /// Informational tag codes (`re_inf`).
    pub info: Vec<String>,
    /// Kanji spellings this reading applies to; empty means all of them.
    pub restrictions: Vec<String>,
}

/// Sense tag categories, one per element name in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseTag {
    Pos,
    Field,
    Misc,
    Dial,
}

impl SenseTag {
    pub const ALL: [Self; 4] = [Self::Pos, Self::Field, Self::Misc, Self::Dial];

    /// Map a source element name to its tag category.
    #[must_use]
    pub fn from_element(name: &[u8]) -> Option<Self> {
        match name {
            b"pos" => Some(Self::Pos),
            b"field" => Some(Self::Field),
            b"misc" => Some(Self::Misc),
            b"dial" => Some(Self::Dial),
            _ => None,
        }
    }

    /// Column name in the `senses` table (also the source element name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Field => "field",
            Self::Misc => "misc",
            Self::Dial => "dial",
        }
    }
}

/// Tag codes of one sense, one named field per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseTags {
    pub pos: Vec<String>,
    pub field: Vec<String>,
    pub misc: Vec<String>,
    pub dial: Vec<String>,
}

impl SenseTags {
    #[must_use]
    pub fn get(&self, tag: SenseTag) -> &[String] {
        match tag {
            SenseTag::Pos => &self.pos,
            SenseTag::Field => &self.field,
            SenseTag::Misc => &self.misc,
            SenseTag::Dial => &self.dial,
        }
    }

    pub fn get_mut(&mut self, tag: SenseTag) -> &mut Vec<String> {
        match tag {
            SenseTag::Pos => &mut self.pos,
            SenseTag::Field => &mut self.field,
            SenseTag::Misc => &mut self.misc,
            SenseTag::Dial => &mut self.dial,
        }
    }

    pub fn push(&mut self, tag: SenseTag, code: impl Into<String>) {
        self.get_mut(tag).push(code.into());
    }
}

/// One meaning group of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub id: Option<i64>,
    pub tags: SenseTags,
    /// Usage note (`s_inf`).
    pub note: Option<String>,
    /// Kanji spellings this sense is restricted to (`stagk`).
    pub stagk: Vec<String>,
    /// Readings this sense is restricted to (`stagr`).
    pub stagr: Vec<String>,
    pub glosses: Vec<String>,
}

impl Sense {
    /// Attach a usage note, concatenating onto an existing one.
    ///
    /// Returns `true` when a note was already present.
    pub fn append_note(&mut self, note: &str) -> bool {
        match &mut self.note {
            Some(existing) => {
                existing.push_str(NOTE_SEPARATOR);
                existing.push_str(note);
                true
            }
            None => {
                self.note = Some(note.to_string());
                false
            }
        }
    }
}

/// Join a tag set for storage; an empty set is stored as NULL.
#[must_use]
pub fn join_tags(tags: &[String], separator: &str) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(separator))
    }
}

/// Split a stored tag set back into codes.
#[must_use]
pub fn split_tags(joined: Option<&str>, separator: &str) -> Vec<String> {
    joined
        .filter(|s| !s.is_empty())
        .map(|s| s.split(separator).map(String::from).collect())
        .unwrap_or_default()
}
