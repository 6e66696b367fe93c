//! Flat-record tokenizer.
//!
//! KEGG flat files look like:
//!
//! ```text
//! ENTRY       R00209                      Reaction
//! EQUATION    C00022 + C00010 + C00003 <=> C00024 + C00011 + C00004
//! RPAIR       RP00010  C00022_C00024 main
//!             RP05777  C00003_C00004 cofac
//! ///
//! ```
//!
//! A tag starts at column 0; continuation lines are indented. `///` ends a
//! record.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use keggraph_core::RecordParseError;

pub const RECORD_TERMINATOR: &str = "///";

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z][A-Z0-9_]*)(?:\s+(.*))?$").expect("valid tag regex"))
}

/// One tagged field; each physical line of the field is one sub-line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub tag: String,
    pub lines: Vec<String>,
}

impl Field {
    /// Sub-lines joined with `\n`.
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

/// A record's fields in source order. A tag that appears twice is merged
/// into its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub fields: Vec<Field>,
}

impl FlatRecord {
    pub fn field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// First present field among `tags`.
    pub fn field_any(&self, tags: &[&str]) -> Option<&Field> {
        tags.iter().find_map(|t| self.field(t))
    }

    /// Sub-lines of `tag`, or an empty slice if the tag is absent.
    pub fn lines(&self, tag: &str) -> &[String] {
        self.field(tag).map(|f| f.lines.as_slice()).unwrap_or(&[])
    }

    /// First token of the ENTRY field (`R00209`).
    pub fn entry_id(&self) -> Option<&str> {
        self.lines("ENTRY")
            .first()
            .and_then(|l| l.split_whitespace().next())
    }
}

/// Split response text into record blocks on `///` lines.
///
/// Blank input yields no records. Text after the last terminator is a
/// record of its own unless it is blank.
pub fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim_end() == RECORD_TERMINATOR {
            push_block(&mut records, &mut current);
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_block(&mut records, &mut current);
    records
}

fn push_block(records: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        records.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Split one record block into tagged fields.
///
/// Lines that fit no field (an untagged column-0 line, a continuation
/// before the first tag) are reported and skipped; the rest of the record
/// is still tokenized.
pub fn split_fields(block: &str) -> (FlatRecord, Vec<RecordParseError>) {
    let mut record = FlatRecord::default();
    let mut errors = Vec::new();
    let mut current: Option<usize> = None;

    for (line_no, line) in block.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            match current {
                Some(idx) => record.fields[idx].lines.push(line.trim().to_string()),
                None => errors.push(RecordParseError::new(
                    "record",
                    format!("continuation line {} before any tag", line_no + 1),
                    line,
                )),
            }
            continue;
        }

        let Some(caps) = tag_re().captures(line.trim_end()) else {
            errors.push(RecordParseError::new(
                "record",
                format!("line {} does not start with an uppercase tag", line_no + 1),
                line,
            ));
            continue;
        };
        let tag = &caps[1];
        let first = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        let idx = match record.fields.iter().position(|f| f.tag == tag) {
            Some(idx) => idx,
            None => {
                record.fields.push(Field {
                    tag: tag.to_string(),
                    lines: Vec::new(),
                });
                record.fields.len() - 1
            }
        };
        if !first.is_empty() {
            record.fields[idx].lines.push(first.to_string());
        }
        current = Some(idx);
    }

    (record, errors)
}

/// Tokenize a full response. Malformed lines of every record are returned
/// alongside the records; a record with no usable field is dropped.
pub fn parse_records(text: &str) -> (Vec<FlatRecord>, Vec<RecordParseError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for block in split_records(text) {
        let (record, mut skipped) = split_fields(&block);
        errors.append(&mut skipped);
        if !record.fields.is_empty() {
            records.push(record);
        }
    }
    (records, errors)
}

/// A single-field response body as a list: trimmed, blank lines dropped.
pub fn field_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
