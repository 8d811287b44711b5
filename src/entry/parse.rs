//! Entry document splitting.
//!
//! An entry file is a YAML header followed by a body of `---`-delimited
//! segments, each either a YAML mapping (structured data) or freeform
//! Markdown text:
//!
//! ```text
//! ---
//! title: Hello
//! publish_date: 2024-06-15
//! ---
//! Some *markdown* text.
//! ---
//! role: producer
//! link: http://example.com/x
//! ---
//! More text.
//! ```
//!
//! Tokens that parse as YAML mappings become data segments. Tokens that
//! parse as bare scalar strings, and tokens that fail to parse as YAML at
//! all, both become text segments. Downstream content depends on that
//! merge, so the two cases are deliberately not distinguished.

use crate::entry::error::EntryError;
use regex::Regex;
use serde_yaml_ng::{Mapping, Value};
use std::sync::LazyLock;

/// Segment separator: a `---` line at line start, LF or CRLF terminated.
static PART_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---(?:\r\n?|\n)").expect("separator pattern is valid"));

/// One tokenized body segment, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSegment {
    /// Freeform Markdown text, kept verbatim.
    Text(String),
    /// A structured key→value record.
    Data(Mapping),
}

/// Split a raw entry document into its header mapping and body segments.
///
/// The document must begin with a `---` line (an optional BOM is
/// tolerated); the first delimited block is the YAML header and must be a
/// mapping. Everything after the second separator is the body.
pub fn split_entry(raw: &str) -> Result<(Mapping, Vec<RawSegment>), EntryError> {
    let raw = raw.trim_start_matches('\u{feff}');

    let tokens: Vec<&str> = PART_SEP.splitn(raw, 3).collect();
    let (prefix, header_str, body) = match tokens.as_slice() {
        [prefix, header, body] => (*prefix, *header, *body),
        _ => {
            return Err(EntryError::Malformed(
                "expected a headers section surrounded with \"---\" on separate lines".into(),
            ));
        }
    };
    if !prefix.is_empty() {
        return Err(EntryError::Malformed(
            "entry must begin with a \"---\" separator line".into(),
        ));
    }

    let headers = parse_header(header_str)?;
    let segments = parse_body(body)?;
    Ok((headers, segments))
}

/// Parse the header block; it must be a YAML mapping with string keys.
fn parse_header(header_str: &str) -> Result<Mapping, EntryError> {
    let value: Value = serde_yaml_ng::from_str(header_str)
        .map_err(|e| EntryError::Malformed(format!("unparsable headers: {e}")))?;
    match value {
        Value::Mapping(map) => {
            check_string_keys(&map)?;
            Ok(map)
        }
        _ => Err(EntryError::Malformed(
            "headers must be a YAML mapping".into(),
        )),
    }
}

/// Tokenize the body on the separator pattern. Empty tokens are kept so
/// that joining the tokens with the separator reproduces the body.
pub(crate) fn body_tokens(body: &str) -> Vec<&str> {
    PART_SEP.split(body).collect()
}

/// Classify each body token as data or text.
///
/// - YAML mapping → data segment
/// - YAML scalar string, or YAML parse failure → text segment (raw token)
/// - YAML null (covers empty/whitespace-only tokens) → dropped
/// - any other YAML shape → fatal for this entry
fn parse_body(body: &str) -> Result<Vec<RawSegment>, EntryError> {
    let mut segments = Vec::new();
    for token in body_tokens(body) {
        match serde_yaml_ng::from_str::<Value>(token) {
            Ok(Value::Mapping(map)) => {
                check_string_keys(&map)?;
                segments.push(RawSegment::Data(map));
            }
            Ok(Value::String(_)) | Err(_) => segments.push(RawSegment::Text(token.to_owned())),
            Ok(Value::Null) => {}
            Ok(other) => {
                return Err(EntryError::Malformed(format!(
                    "expected text or mapping part, not {}",
                    value_kind(&other)
                )));
            }
        }
    }
    Ok(segments)
}

/// Reject mappings with non-string keys, at any nesting depth; every
/// downstream consumer (attr classification, JSON export, template
/// contexts) assumes string keys.
fn check_string_keys(map: &Mapping) -> Result<(), EntryError> {
    for (key, value) in map {
        if key.as_str().is_none() {
            return Err(EntryError::Malformed(format!(
                "mapping keys must be strings, not {}",
                value_kind(key)
            )));
        }
        check_value_keys(value)?;
    }
    Ok(())
}

fn check_value_keys(value: &Value) -> Result<(), EntryError> {
    match value {
        Value::Mapping(map) => check_string_keys(map),
        Value::Sequence(seq) => seq.iter().try_for_each(check_value_keys),
        Value::Tagged(tagged) => check_value_keys(&tagged.value),
        _ => Ok(()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
