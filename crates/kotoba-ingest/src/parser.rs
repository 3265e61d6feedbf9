//! Pull parser turning the JMdict element stream into [`Entry`] values.
//!
//! The document is never held in memory: [`EntryParser::next_entry`] reads
//! events until one `<entry>` closes and returns it. A flat [`Cursor`] keeps
//! at most one entry, kanji spelling, reading and sense in progress; the
//! format never nests those any deeper.
//!
//! Tag elements (`ke_inf`, `re_inf`, `pos`, `field`, `misc`, `dial`) carry an
//! entity reference such as `&n;`. The reference is expanded to its declared
//! long text while unescaping and mapped back to its code through
//! [`AbbreviationTable::resolve`].

use std::io::BufRead;
use std::sync::LazyLock;

use kotoba_core::abbrev::{AbbrevError, AbbreviationTable, Declared};
use kotoba_core::model::{Entry, Kanji, Reading, Sense, SenseTag, is_priority_code};
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

use crate::error::IngestError;

static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s"%]+)\s+"([^"]*)"\s*>"#).expect("entity declaration pattern")
});

/// Register every `<!ENTITY code "long text">` of a DOCTYPE body.
///
/// Returns `(declared, provisional)` counts.
pub fn declare_entities(doctype: &str, table: &mut AbbreviationTable) -> (usize, usize) {
    let mut declared = 0;
    let mut provisional = 0;
    for caps in ENTITY_DECL.captures_iter(doctype) {
        declared += 1;
        if table.declare(&caps[1], &caps[2]) == Declared::Provisional {
            provisional += 1;
        }
    }
    tracing::debug!(declared, provisional, "entity declarations registered");
    (declared, provisional)
}

fn predefined_entity(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => None,
    }
}

fn structure_at(position: usize, message: impl Into<String>) -> IngestError {
    IngestError::Structure {
        position,
        message: message.into(),
    }
}

/// Streaming reader yielding one entry at a time.
pub struct EntryParser<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    cursor: Cursor,
}

impl<R: BufRead> EntryParser<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        reader.check_end_names(true);
        Self {
            reader,
            buf: Vec::new(),
            cursor: Cursor::default(),
        }
    }

    /// Read until the next `</entry>` and return the completed entry.
    ///
    /// DTD entity declarations met on the way are registered with `table`.
    /// Returns `Ok(None)` at the end of the document.
    ///
    /// # Errors
    ///
    /// `IngestError::Structure` for malformed nesting, the abbreviation
    /// variants for unresolvable tag text, `IngestError::Xml` for
    /// lower-level XML errors.
    pub fn next_entry(
        &mut self,
        table: &mut AbbreviationTable,
    ) -> Result<Option<Entry>, IngestError> {
        loop {
            self.buf.clear();
            self.cursor.position = self.reader.buffer_position();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(quick_xml::Error::EndEventMismatch { expected, found }) => {
                    let message = if expected.is_empty() {
                        format!("</{found}> without an open element")
                    } else {
                        format!("</{found}> closes <{expected}>")
                    };
                    return Err(self.cursor.structure(message));
                }
                Err(error) => return Err(error.into()),
            };

            match event {
                Event::DocType(doctype) => {
                    declare_entities(&String::from_utf8_lossy(&doctype), table);
                }
                Event::Start(start) => self.cursor.open(start.name().as_ref())?,
                Event::Empty(start) => {
                    let name = start.name();
                    self.cursor.open(name.as_ref())?;
                    if let Some(entry) = self.cursor.close(name.as_ref(), table)? {
                        return Ok(Some(entry));
                    }
                }
                Event::End(end) => {
                    if let Some(entry) = self.cursor.close(end.name().as_ref(), table)? {
                        return Ok(Some(entry));
                    }
                }
                Event::Text(text) => {
                    let entities: &AbbreviationTable = table;
                    let unescaped = text.unescape_with(|name| {
                        let predefined: Option<&str> = predefined_entity(name);
                        predefined.or_else(|| entities.expand(name))
                    })?;
                    self.cursor.text.push_str(&unescaped);
                }
                Event::CData(data) => {
                    self.cursor.text.push_str(&String::from_utf8_lossy(&data));
                }
                Event::Eof => {
                    self.cursor.finish()?;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

/// The objects under construction, at most one of each kind.
#[derive(Debug, Default)]
struct Cursor {
    entry: Option<Entry>,
    ent_seq: Option<i64>,
    kanji: Option<Kanji>,
    reading: Option<Reading>,
    sense: Option<Sense>,
    text: String,
    position: usize,
}

impl Cursor {
    fn structure(&self, message: impl Into<String>) -> IngestError {
        structure_at(self.position, message)
    }

    fn current_seq(&self) -> i64 {
        self.ent_seq.unwrap_or_default()
    }

    fn open(&mut self, name: &[u8]) -> Result<(), IngestError> {
        self.text.clear();
        match name {
            b"entry" => {
                if self.entry.is_some() {
                    return Err(self.structure(format!(
                        "<entry> opened inside entry {}",
                        self.current_seq()
                    )));
                }
                self.entry = Some(Entry::default());
                self.ent_seq = None;
            }
            b"k_ele" => {
                self.entry_mut("k_ele")?;
                if self.kanji.is_some() {
                    return Err(self.structure("<k_ele> opened inside <k_ele>"));
                }
                self.kanji = Some(Kanji::default());
            }
            b"r_ele" => {
                self.entry_mut("r_ele")?;
                if self.reading.is_some() {
                    return Err(self.structure("<r_ele> opened inside <r_ele>"));
                }
                self.reading = Some(Reading::default());
            }
            b"sense" => {
                self.entry_mut("sense")?;
                if self.sense.is_some() {
                    return Err(self.structure("<sense> opened inside <sense>"));
                }
                self.sense = Some(Sense::default());
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply the accumulated text to the element being closed.
    fn close(
        &mut self,
        name: &[u8],
        table: &AbbreviationTable,
    ) -> Result<Option<Entry>, IngestError> {
        let owned = std::mem::take(&mut self.text);
        let text = owned.trim();

        match name {
            b"entry" => return self.close_entry().map(Some),
            b"ent_seq" => {
                let seq = text
                    .parse::<i64>()
                    .map_err(|_| self.structure(format!("invalid ent_seq '{text}'")))?;
                self.entry_mut("ent_seq")?;
                self.ent_seq = Some(seq);
            }

            b"k_ele" => {
                let kanji = self
                    .kanji
                    .take()
                    .ok_or_else(|| self.structure("</k_ele> without <k_ele>"))?;
                if kanji.text.is_empty() {
                    return Err(self.structure("<k_ele> without <keb>"));
                }
                self.entry_mut("k_ele")?.kanjis.push(kanji);
            }
            b"keb" => self.kanji_mut("keb")?.text = text.to_string(),
            b"ke_inf" => {
                let code = self.resolve(table, "ke_inf", text)?;
                self.kanji_mut("ke_inf")?.info.push(code);
            }
            b"ke_pri" => {
                let kanji = self.kanji_mut("ke_pri")?;
                kanji.frequent |= is_priority_code(text);
            }

            b"r_ele" => {
                let reading = self
                    .reading
                    .take()
                    .ok_or_else(|| self.structure("</r_ele> without <r_ele>"))?;
                if reading.text.is_empty() {
                    return Err(self.structure("<r_ele> without <reb>"));
                }
                self.entry_mut("r_ele")?.readings.push(reading);
            }
            b"reb" => self.reading_mut("reb")?.text = text.to_string(),
            b"re_nokanji" => self.reading_mut("re_nokanji")?.no_kanji = true,
            b"re_restr" => self
                .reading_mut("re_restr")?
                .restrictions
                .push(text.to_string()),
            b"re_inf" => {
                let code = self.resolve(table, "re_inf", text)?;
                self.reading_mut("re_inf")?.info.push(code);
            }
            b"re_pri" => {
                let reading = self.reading_mut("re_pri")?;
                reading.frequent |= is_priority_code(text);
            }

            b"sense" => {
                let sense = self
                    .sense
                    .take()
                    .ok_or_else(|| self.structure("</sense> without <sense>"))?;
                self.entry_mut("sense")?.senses.push(sense);
            }
            b"s_inf" => {
                let ent_seq = self.current_seq();
                if self.sense_mut("s_inf")?.append_note(text) {
                    tracing::warn!(ent_seq, "sense has more than one usage note; concatenating");
                }
            }
            b"stagk" => self.sense_mut("stagk")?.stagk.push(text.to_string()),
            b"stagr" => self.sense_mut("stagr")?.stagr.push(text.to_string()),
            b"gloss" => {
                let sense = self.sense_mut("gloss")?;
                if !text.is_empty() {
                    sense.glosses.push(text.to_string());
                }
            }
            other => {
                if let Some(tag) = SenseTag::from_element(other) {
                    let code = self.resolve(table, tag.as_str(), text)?;
                    self.sense_mut(tag.as_str())?.tags.push(tag, code);
                }
            }
        }
        Ok(None)
    }

    fn close_entry(&mut self) -> Result<Entry, IngestError> {
        let mut entry = self
            .entry
            .take()
            .ok_or_else(|| self.structure("</entry> without <entry>"))?;
        if self.kanji.is_some() || self.reading.is_some() || self.sense.is_some() {
            return Err(self.structure(format!(
                "entry {} closed with an unfinished child element",
                self.current_seq()
            )));
        }
        entry.ent_seq = self
            .ent_seq
            .take()
            .ok_or_else(|| self.structure("entry without <ent_seq>"))?;
        entry.refresh_frequent();
        Ok(entry)
    }

    fn finish(&self) -> Result<(), IngestError> {
        if self.entry.is_some() {
            return Err(self.structure(format!(
                "document ended inside entry {}",
                self.current_seq()
            )));
        }
        Ok(())
    }

    fn resolve(
        &self,
        table: &AbbreviationTable,
        field: &'static str,
        expansion: &str,
    ) -> Result<String, IngestError> {
        table
            .resolve(expansion)
            .map(str::to_string)
            .map_err(|error| match error {
                AbbrevError::Unknown(expansion) => IngestError::InconsistentAbbreviation {
                    field,
                    ent_seq: self.current_seq(),
                    expansion,
                },
                AbbrevError::Ambiguous { long, codes } => IngestError::AmbiguousAbbreviation {
                    field,
                    ent_seq: self.current_seq(),
                    expansion: long,
                    codes,
                },
            })
    }

    fn entry_mut(&mut self, element: &str) -> Result<&mut Entry, IngestError> {
        let position = self.position;
        self.entry
            .as_mut()
            .ok_or_else(|| structure_at(position, format!("<{element}> outside <entry>")))
    }

    fn kanji_mut(&mut self, element: &str) -> Result<&mut Kanji, IngestError> {
        let position = self.position;
        self.kanji
            .as_mut()
            .ok_or_else(|| structure_at(position, format!("<{element}> outside <k_ele>")))
    }

    fn reading_mut(&mut self, element: &str) -> Result<&mut Reading, IngestError> {
        let position = self.position;
        self.reading
            .as_mut()
            .ok_or_else(|| structure_at(position, format!("<{element}> outside <r_ele>")))
    }

    fn sense_mut(&mut self, element: &str) -> Result<&mut Sense, IngestError> {
        let position = self.position;
        self.sense
            .as_mut()
            .ok_or_else(|| structure_at(position, format!("<{element}> outside <sense>")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
<!ELEMENT JMdict (entry*)>
<!ENTITY MA "martial arts">
<!ENTITY n "noun (common) (futsuumeishi)">
<!ENTITY adj-na "adjectival nouns or quasi-adjectives (keiyodoshi)">
<!ENTITY uk "word usually written using kana alone">
<!ENTITY ateji "ateji (phonetic) reading">
<!ENTITY ksb "Kansai-ben">
<!ENTITY bikkuri "surprise marker">
]>
<JMdict>
"#;

    fn document(body: &str) -> String {
        format!("{HEADER}{body}\n</JMdict>\n")
    }

    fn parse_all(xml: &str) -> Result<(Vec<Entry>, AbbreviationTable), IngestError> {
        let mut table = AbbreviationTable::builtin();
        let mut parser = EntryParser::new(xml.as_bytes());
        let mut entries = Vec::new();
        while let Some(entry) = parser.next_entry(&mut table)? {
            entries.push(entry);
        }
        Ok((entries, table))
    }

    const AIKIDO: &str = "<entry>
<ent_seq>1000000</ent_seq>
<k_ele><keb>合気道</keb></k_ele>
<r_ele><reb>あいきどう</reb><re_pri>spec1</re_pri></r_ele>
<sense><pos>&n;</pos><field>&MA;</field><gloss>aikido</gloss></sense>
</entry>";

    #[test]
    fn parses_aikido_entry() {
        let (entries, _) = parse_all(&document(AIKIDO)).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.ent_seq, 1_000_000);
        assert!(entry.frequent);
        assert_eq!(entry.kanjis[0].text, "合気道");
        assert!(!entry.kanjis[0].frequent);
        assert_eq!(entry.readings[0].text, "あいきどう");
        assert!(entry.readings[0].frequent);
        assert_eq!(entry.senses[0].tags.pos, vec!["n".to_string()]);
        assert_eq!(entry.senses[0].tags.field, vec!["MA".to_string()]);
        assert_eq!(entry.senses[0].glosses, vec!["aikido".to_string()]);
    }

    #[test]
    fn doctype_declarations_extend_table() {
        let (_, table) = parse_all(&document("")).unwrap();
        let bikkuri = table.get("bikkuri").unwrap();
        assert!(bikkuri.provisional);
        assert_eq!(bikkuri.short, "surprise marker");
        assert_eq!(table.get("ksb").unwrap().long, "Kansai-ben");
    }

    #[test]
    fn provisional_entity_resolves_in_entries() {
        let body = "<entry><ent_seq>7</ent_seq><r_ele><reb>びっくり</reb></r_ele>
<sense><misc>&bikkuri;</misc><gloss>surprise</gloss></sense></entry>";
        let (entries, _) = parse_all(&document(body)).unwrap();
        assert_eq!(entries[0].senses[0].tags.misc, vec!["bikkuri".to_string()]);
    }

    #[test]
    fn full_entry_fields_are_collected() {
        let body = "<entry>
<ent_seq>1000220</ent_seq>
<k_ele><keb>明白</keb><ke_pri>news1</ke_pri></k_ele>
<k_ele><keb>偸閑</keb><ke_inf>&ateji;</ke_inf></k_ele>
<r_ele><reb>めいはく</reb><re_restr>明白</re_restr></r_ele>
<r_ele><reb>あからさま</reb><re_nokanji/></r_ele>
<sense>
<stagk>明白</stagk><stagr>めいはく</stagr>
<pos>&adj-na;</pos><misc>&uk;</misc><dial>&ksb;</dial>
<xref>明らか</xref>
<s_inf>usu. written as 明白</s_inf>
<gloss>obvious</gloss><gloss>clear &amp; plain</gloss>
</sense>
</entry>";
        let (entries, _) = parse_all(&document(body)).unwrap();
        let entry = &entries[0];

        assert!(entry.frequent);
        assert!(entry.kanjis[0].frequent);
        assert_eq!(entry.kanjis[1].info, vec!["ateji".to_string()]);
        assert_eq!(entry.readings[0].restrictions, vec!["明白".to_string()]);
        assert!(entry.readings[1].no_kanji);

        let sense = &entry.senses[0];
        assert_eq!(sense.stagk, vec!["明白".to_string()]);
        assert_eq!(sense.stagr, vec!["めいはく".to_string()]);
        assert_eq!(sense.tags.pos, vec!["adj-na".to_string()]);
        assert_eq!(sense.tags.misc, vec!["uk".to_string()]);
        assert_eq!(sense.tags.dial, vec!["ksb".to_string()]);
        assert_eq!(sense.note.as_deref(), Some("usu. written as 明白"));
        assert_eq!(
            sense.glosses,
            vec!["obvious".to_string(), "clear & plain".to_string()]
        );
    }

    #[test]
    fn repeated_usage_notes_are_concatenated() {
        let body = "<entry><ent_seq>3</ent_seq><r_ele><reb>まじ</reb></r_ele>
<sense><s_inf>colloquial</s_inf><s_inf>esp. among young people</s_inf><gloss>serious</gloss></sense>
</entry>";
        let (entries, _) = parse_all(&document(body)).unwrap();
        assert_eq!(
            entries[0].senses[0].note.as_deref(),
            Some("colloquial; esp. among young people")
        );
        assert!(!entries[0].frequent);
    }

    #[test]
    fn entries_are_yielded_one_at_a_time() {
        let body = format!("{AIKIDO}\n{}", AIKIDO.replace("1000000", "1000001"));
        let xml = document(&body);
        let mut table = AbbreviationTable::builtin();
        let mut parser = EntryParser::new(xml.as_bytes());

        assert_eq!(parser.next_entry(&mut table).unwrap().unwrap().ent_seq, 1_000_000);
        assert_eq!(parser.next_entry(&mut table).unwrap().unwrap().ent_seq, 1_000_001);
        assert!(parser.next_entry(&mut table).unwrap().is_none());
    }

    #[test]
    fn tag_text_without_declaration_is_inconsistent() {
        let body = "<entry><ent_seq>42</ent_seq><r_ele><reb>あ</reb></r_ele>
<sense><pos>not a declared tag</pos><gloss>ah</gloss></sense></entry>";
        let err = parse_all(&document(body)).unwrap_err();
        match err {
            IngestError::InconsistentAbbreviation {
                field,
                ent_seq,
                expansion,
            } => {
                assert_eq!(field, "pos");
                assert_eq!(ent_seq, 42);
                assert_eq!(expansion, "not a declared tag");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undeclared_entity_reference_fails() {
        let body = "<entry><ent_seq>42</ent_seq><r_ele><reb>あ</reb></r_ele>
<sense><pos>&nosuchtag;</pos><gloss>ah</gloss></sense></entry>";
        assert!(matches!(
            parse_all(&document(body)),
            Err(IngestError::Xml(_))
        ));
    }

    #[rstest]
    #[case::keb_outside_kanji("<entry><ent_seq>1</ent_seq><keb>字</keb></entry>")]
    #[case::gloss_outside_sense("<entry><ent_seq>1</ent_seq><gloss>x</gloss></entry>")]
    #[case::kanji_outside_entry("<k_ele><keb>字</keb></k_ele>")]
    #[case::nested_entry("<entry><ent_seq>1</ent_seq><entry></entry></entry>")]
    #[case::missing_ent_seq("<entry><r_ele><reb>あ</reb></r_ele></entry>")]
    #[case::bad_ent_seq("<entry><ent_seq>abc</ent_seq></entry>")]
    #[case::kanji_without_keb("<entry><ent_seq>1</ent_seq><k_ele></k_ele></entry>")]
    #[case::mismatched_close("<entry><ent_seq>1</ent_seq><r_ele><reb>あ</reb></sense></entry>")]
    fn malformed_structure_is_fatal(#[case] body: &str) {
        let err = parse_all(&document(body)).unwrap_err();
        assert!(
            matches!(err, IngestError::Structure { .. }),
            "expected structure error, got {err}"
        );
    }

    #[test]
    fn document_ending_inside_entry_is_fatal() {
        let xml = format!("{HEADER}<entry><ent_seq>9</ent_seq>");
        let err = parse_all(&xml).unwrap_err();
        assert!(matches!(err, IngestError::Structure { .. }));
    }

    fn dialect_document(declarations: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
{declarations}
]>
<JMdict>
<entry><ent_seq>1</ent_seq><r_ele><reb>あかん</reb></r_ele>
<sense><dial>&kansai;</dial><gloss>no good</gloss></sense></entry>
</JMdict>
"#
        )
    }

    #[test]
    fn renamed_entity_resolves_to_declared_code() {
        let xml = dialect_document(r#"<!ENTITY kansai "Kansai-ben">"#);
        let (entries, table) = parse_all(&xml).unwrap();

        assert_eq!(entries[0].senses[0].tags.dial, vec!["kansai".to_string()]);
        assert!(table.get("kansai").unwrap().provisional);
        assert!(!table.get("ksb").unwrap().provisional);
    }

    #[test]
    fn text_shared_by_declared_entities_is_ambiguous() {
        let xml = dialect_document(
            r#"<!ENTITY ksb "Kansai-ben">
<!ENTITY kansai "Kansai-ben">"#,
        );
        match parse_all(&xml).unwrap_err() {
            IngestError::AmbiguousAbbreviation {
                field,
                ent_seq,
                expansion,
                codes,
            } => {
                assert_eq!(field, "dial");
                assert_eq!(ent_seq, 1);
                assert_eq!(expansion, "Kansai-ben");
                assert_eq!(codes, vec!["ksb".to_string(), "kansai".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn declare_entities_counts_provisional() {
        let mut table = AbbreviationTable::builtin();
        let (declared, provisional) = declare_entities(
            r#"JMdict [ <!ENTITY n "noun (common) (futsuumeishi)"> <!ENTITY zzz "made up"> ]"#,
            &mut table,
        );
        assert_eq!((declared, provisional), (2, 1));
    }
}
