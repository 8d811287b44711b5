//! Entry model: one source file, one unit of content.
//!
//! An [`Entry`] owns its header mapping and the classified part sequence.
//! Loading is eager: splitting, classification, slug validation, and
//! publish-date resolution all happen in [`Entry::from_str`], so a
//! constructed entry is either fully valid or never exists. Rendering
//! later attaches HTML and a summary but never mutates raw part content.

pub mod error;
pub mod parse;
pub mod part;

pub use part::{Attr, DataPart, Part, TextPart};

use crate::entry::error::EntryError;
use crate::entry::parse::{RawSegment, split_entry};
use part::ClassifyContext;
use crate::utils::{date, slug};
use chrono::{DateTime, FixedOffset, Local};
use regex::Regex;
use serde_yaml_ng::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;
use std::fs;

/// Layout used for an entry page when the header does not override it.
pub const DEFAULT_ENTRY_LAYOUT: &str = "entry";
/// Layout used for entry content when the header does not override it.
pub const DEFAULT_CONTENT_LAYOUT: &str = "content";
/// Extension for exported entry pages.
pub const EXPORT_HTML_EXT: &str = ".html";
/// Reading speed used for the reading-time estimate.
const READING_WPM: f64 = 200.0;

static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]]+").expect("punctuation pattern is valid"));

// ============================================================================
// Entry
// ============================================================================

/// One published/draft/special unit of content, backed by one source file.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Entry-level metadata from the YAML header block.
    pub headers: Mapping,
    pub title: String,
    /// Publish instant; the unset sentinel when the header has none.
    pub publish_date: DateTime<FixedOffset>,
    /// Header-declared summary, if any.
    pub summary: Option<serde_json::Value>,
    /// Root slug path: the entry's unique output identifier.
    pub entry_root: String,
    /// Classified body parts in document order.
    pub loaded_parts: Vec<Part>,
    pub source_path: Option<PathBuf>,
    pub mtime: Option<SystemTime>,

    // Attached by the render phase
    pub rendered_summary: Option<String>,
    pub content_html: Option<String>,
    pub entry_html: Option<String>,
}

impl Entry {
    /// Load an entry from raw document text.
    pub fn from_str(raw: &str) -> Result<Self, EntryError> {
        let (headers, segments) = split_entry(raw)?;

        let title = headers
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| EntryError::Malformed("entry is missing a title".into()))?
            .to_owned();

        let publish_date = match headers.get("publish_date").filter(|v| !v.is_null()) {
            None => date::unset_date(),
            Some(Value::String(text)) => date::parse_date(text)
                .map_err(|e| EntryError::Malformed(format!("bad publish_date: {e}")))?,
            Some(other) => {
                return Err(EntryError::Malformed(format!(
                    "publish_date must be a string, not {other:?}"
                )));
            }
        };

        let summary = match headers.get("summary").filter(|v| !v.is_null()) {
            Some(value) => Some(serde_json::to_value(value).map_err(|e| {
                EntryError::Malformed(format!("summary not representable as JSON: {e}"))
            })?),
            None => None,
        };

        let entry_root = resolve_entry_root(&headers, &title)?;

        let field_role_map = string_map(&headers, "field_role_map")?;
        let field_label_map = string_map(&headers, "field_label_map")?;
        let field_type_map = string_map(&headers, "field_type_map")?;
        let ctx = ClassifyContext {
            field_role_map: &field_role_map,
            field_label_map: &field_label_map,
            field_type_map: &field_type_map,
            ordinal_format: headers
                .get("ordinal_format")
                .and_then(Value::as_str)
                .unwrap_or(""),
            date_tmpl: headers.get("date_tmpl").and_then(Value::as_str).unwrap_or(""),
        };
        let loaded_parts = load_parts(&segments, &ctx)?;

        Ok(Self {
            headers,
            title,
            publish_date,
            summary,
            entry_root,
            loaded_parts,
            source_path: None,
            mtime: None,
            rendered_summary: None,
            content_html: None,
            entry_html: None,
        })
    }

    /// Load an entry from a source file path.
    pub fn from_path(path: &Path) -> Result<Self, EntryError> {
        let bytes =
            fs::read(path).map_err(|e| EntryError::Unopenable(path.to_path_buf(), e))?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| EntryError::Malformed(format!("entry is not valid UTF-8: {e}")))?;

        let mut entry = Self::from_str(text)?;
        entry.mtime = fs::metadata(path).and_then(|m| m.modified()).ok();
        entry.source_path = Some(path.to_path_buf());
        Ok(entry)
    }

    /// Output filename for the rendered entry page.
    pub fn output_filename(&self) -> String {
        format!("{}{EXPORT_HTML_EXT}", self.entry_root)
    }

    /// Header declares the entry a special (non-chronological) page.
    pub fn is_special(&self) -> bool {
        truthy(self.headers.get("special"))
    }

    /// Draft: declared as such, undated, or dated in the future.
    pub fn is_draft(&self) -> bool {
        truthy(self.headers.get("draft"))
            || date::is_unset(&self.publish_date)
            || self.publish_date > Local::now().fixed_offset()
    }

    pub fn tags(&self) -> Vec<String> {
        part::extract_tags(self.headers.get("tags"))
    }

    pub fn entry_layout(&self) -> &str {
        self.headers
            .get("entry_layout")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ENTRY_LAYOUT)
    }

    pub fn content_layout(&self) -> &str {
        self.headers
            .get("content_layout")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CONTENT_LAYOUT)
    }

    /// Word count over the freeform text parts, punctuation stripped.
    pub fn word_count(&self) -> usize {
        let text: Vec<&str> = self
            .loaded_parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.content.as_str()),
                Part::Data(_) => None,
            })
            .collect();
        let joined = text.join(" ");
        let no_punct = PUNCT_RE.replace_all(&joined, "");
        no_punct.split_whitespace().count()
    }

    /// Estimated reading time in minutes.
    pub fn reading_time(&self) -> f64 {
        self.word_count() as f64 / READING_WPM
    }
}

/// Truthiness of an optional header value, Python-style.
fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !part::is_falsy(v))
}

/// Compute the entry's root slug from the header or the title.
///
/// A custom `entry_root` may carry a directory prefix (`notes/my-post`);
/// the final path segment must already be canonical, and an empty final
/// segment (`notes/`) falls back to the slugified title.
fn resolve_entry_root(headers: &Mapping, title: &str) -> Result<String, EntryError> {
    let declared = headers
        .get("entry_root")
        .and_then(Value::as_str)
        .unwrap_or("");
    let (base_path, base_name) = match declared.rsplit_once('/') {
        Some((path, name)) => (path, name),
        None => ("", declared),
    };

    let base_name = if base_name.is_empty() {
        slug::slugify(title)
    } else if base_name.to_lowercase() != slug::slugify(base_name) {
        return Err(EntryError::InvalidSlug(declared.to_owned()));
    } else {
        base_name.to_owned()
    };

    let base_path = base_path.trim_matches('/');
    if base_path.is_empty() {
        Ok(base_name)
    } else {
        Ok(format!("{base_path}/{base_name}"))
    }
}

/// Extract a header sub-mapping of string→string pairs.
fn string_map(headers: &Mapping, key: &str) -> Result<BTreeMap<String, String>, EntryError> {
    match headers.get(key).filter(|v| !v.is_null()) {
        None => Ok(BTreeMap::new()),
        Some(Value::Mapping(map)) => map
            .iter()
            .map(|(k, v)| match (k.as_str(), v.as_str()) {
                (Some(k), Some(v)) => Ok((k.to_owned(), v.to_owned())),
                _ => Err(EntryError::Malformed(format!(
                    "{key} must map strings to strings"
                ))),
            })
            .collect(),
        Some(_) => Err(EntryError::Malformed(format!("{key} must be a mapping"))),
    }
}

/// Classify raw segments into parts, tracking the data indices.
///
/// `di` (data index) and the part index always increase; `dci`
/// (consecutive data index) resets at every text part.
fn load_parts(segments: &[RawSegment], ctx: &ClassifyContext<'_>) -> Result<Vec<Part>, EntryError> {
    let mut parts = Vec::with_capacity(segments.len());
    let (mut di, mut dci) = (1, 1);
    for (pi, segment) in segments.iter().enumerate() {
        let pi = pi + 1;
        match segment {
            RawSegment::Text(text) => {
                parts.push(Part::Text(TextPart::new(text.clone(), pi)));
                dci = 1;
            }
            RawSegment::Data(map) => {
                let part = DataPart::classify(map, ctx, pi, di, dci)?;
                parts.push(Part::Data(Box::new(part)));
                di += 1;
                dci += 1;
            }
        }
    }
    Ok(parts)
}

// ============================================================================
// EntryList
// ============================================================================

/// Path prefix for tag archive pages; ends in a slash.
pub const TAG_PATH_PART: &str = "tagged/";

/// Ordered collection of entries sharing a tag (or the unfiltered list).
///
/// Entries are stored as indices into the site's entry arena, so the same
/// entry can appear in the main list and any number of tag lists.
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    pub tag: Option<String>,
    pub ids: Vec<usize>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_owned()),
            ids: Vec::new(),
        }
    }

    pub fn append(&mut self, id: usize) {
        self.ids.push(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Output path component for this list: `tagged/<tag>/` or empty.
    pub fn path_part(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{TAG_PATH_PART}{tag}/"),
            None => String::new(),
        }
    }

    /// Sort by publish date, most recent first. The sort is stable, so
    /// discovery order (lexicographic path order) breaks ties.
    pub fn sort_by_publish_date(&mut self, arena: &[Entry]) {
        self.ids
            .sort_by(|&a, &b| arena[b].publish_date.cmp(&arena[a].publish_date));
    }

    /// Sort by source file modification time, most recent first.
    pub fn sort_by_mtime(&mut self, arena: &[Entry]) {
        self.ids.sort_by(|&a, &b| arena[b].mtime.cmp(&arena[a].mtime));
    }

    /// Iterate the entries of this list in order.
    pub fn iter<'a>(&'a self, arena: &'a [Entry]) -> impl Iterator<Item = &'a Entry> {
        self.ids.iter().map(move |&id| &arena[id])
    }
}

// ============================================================================
// Tests
// ============================================================================
