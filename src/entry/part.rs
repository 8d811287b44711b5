//! Body part classification.
//!
//! A parsed body segment becomes either a [`TextPart`] (verbatim Markdown,
//! rendered later) or a [`DataPart`] (a structured record normalized into
//! a uniform rendering-ready shape).
//!
//! # Data part normalization
//!
//! Builtin fields (content, title, date, summary, image, tags, title_slug)
//! are resolved through the entry's field-role map, which defaults to the
//! identity. Every remaining key is classified by the shape of its value:
//!
//! | Shape                                        | Type           |
//! |----------------------------------------------|----------------|
//! | string with `://`, no whitespace, image ext  | `image`        |
//! | string with `://`, no whitespace             | `link`         |
//! | list (classified by first element)           | `*_list`       |
//! | anything else                                | `default`      |
//!
//! Each classified attribute is formatted into `{key, title, type, value}`;
//! link- and image-shaped strings expand to `{text, href, tip}`.

use crate::entry::error::EntryError;
use crate::utils::slug;
use crate::utils::date;
use serde::Serialize;
use serde_json::json;
use serde_yaml_ng::{Mapping, Value};
use std::collections::BTreeMap;

/// Field roles with builtin handling; never classified as attributes.
const BUILTIN_ROLES: &[&str] = &[
    "content",
    "title",
    "date",
    "summary",
    "image",
    "tags",
    "title_slug",
];

/// Image file extensions recognized by the image-shape predicate.
const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

// ============================================================================
// Classification context
// ============================================================================

/// Entry-level tables the classifier consults, borrowed from the header.
pub(crate) struct ClassifyContext<'a> {
    /// role → concrete field name (identity when absent)
    pub field_role_map: &'a BTreeMap<String, String>,
    /// field name → display label (title-cased field name when absent)
    pub field_label_map: &'a BTreeMap<String, String>,
    /// field name → forced attribute type (shape inspection when absent)
    pub field_type_map: &'a BTreeMap<String, String>,
    /// template for per-part ordinal text, `{i}` and `{ci}` placeholders
    pub ordinal_format: &'a str,
    /// template for per-part date text, calendar-component placeholders
    pub date_tmpl: &'a str,
}

impl ClassifyContext<'_> {
    /// Resolve a builtin role to its value through the field-role map.
    fn resolve<'m>(&self, raw: &'m Mapping, role: &str) -> Option<&'m Value> {
        let field = self
            .field_role_map
            .get(role)
            .map(String::as_str)
            .unwrap_or(role);
        raw.get(field).filter(|v| !v.is_null())
    }

    /// A field is builtin if it is a builtin role or the target of one.
    fn is_builtin_field(&self, name: &str) -> bool {
        BUILTIN_ROLES.contains(&name) || self.field_role_map.values().any(|v| v == name)
    }

    /// Display label for a field: explicit mapping, else title-cased name.
    fn field_label(&self, name: &str) -> String {
        self.field_label_map
            .get(name)
            .cloned()
            .unwrap_or_else(|| title_case(&name.replace('_', " ")))
    }
}

// ============================================================================
// Part types
// ============================================================================

/// A classified attribute of a data part.
#[derive(Debug, Clone, Serialize)]
pub struct Attr {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

/// A freeform Markdown segment.
#[derive(Debug, Clone, Serialize)]
pub struct TextPart {
    pub part_idx: usize,
    pub content: String,
    pub content_html: Option<String>,
}

impl TextPart {
    pub fn new(content: String, part_idx: usize) -> Self {
        Self {
            part_idx,
            content,
            content_html: None,
        }
    }
}

/// A structured segment with derived display fields.
///
/// `data_idx` increases monotonically over all data parts of an entry;
/// `data_consec_idx` resets to 1 after every text part.
#[derive(Debug, Clone, Serialize)]
pub struct DataPart {
    pub part_idx: usize,
    pub data_idx: usize,
    pub data_consec_idx: usize,
    pub ordinal_text: String,
    pub title: String,
    pub title_slug: String,
    pub summary: Option<serde_json::Value>,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub date_obj: serde_json::Map<String, serde_json::Value>,
    pub date_text: String,
    pub attrs: Vec<Attr>,
    pub links: Vec<Attr>,
    pub images: Vec<Attr>,
    pub dates: Vec<Attr>,
    pub content_html: Option<String>,
}

/// One segment of an entry body, ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text(TextPart),
    Data(Box<DataPart>),
}

impl Part {
    pub fn part_idx(&self) -> usize {
        match self {
            Self::Text(p) => p.part_idx,
            Self::Data(p) => p.part_idx,
        }
    }

    /// Raw Markdown content, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text(p) => Some(&p.content),
            Self::Data(p) => p.content.as_deref(),
        }
    }

    pub fn content_html(&self) -> Option<&str> {
        match self {
            Self::Text(p) => p.content_html.as_deref(),
            Self::Data(p) => p.content_html.as_deref(),
        }
    }

    pub fn set_content_html(&mut self, html: String) {
        match self {
            Self::Text(p) => p.content_html = Some(html),
            Self::Data(p) => p.content_html = Some(html),
        }
    }

    pub fn as_data(&self) -> Option<&DataPart> {
        match self {
            Self::Data(p) => Some(p),
            Self::Text(_) => None,
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

impl DataPart {
    /// Normalize a raw data record into a rendering-ready part.
    pub(crate) fn classify(
        raw: &Mapping,
        ctx: &ClassifyContext<'_>,
        part_idx: usize,
        data_idx: usize,
        data_consec_idx: usize,
    ) -> Result<Self, EntryError> {
        let ordinal_text = format_template(ctx.ordinal_format, &|name| match name {
            "i" => Some(data_idx.to_string()),
            "ci" => Some(data_consec_idx.to_string()),
            _ => None,
        })?;

        let summary = ctx
            .resolve(raw, "summary")
            .map(yaml_to_json)
            .transpose()?;
        let title = ctx
            .resolve(raw, "title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_owned();

        let custom_slug = ctx
            .resolve(raw, "title_slug")
            .and_then(Value::as_str)
            .unwrap_or("");
        let title_slug = if custom_slug.is_empty() {
            slug::slugify(&title)
        } else {
            custom_slug.to_owned()
        };
        if !slug::is_canonical(&title_slug) {
            return Err(EntryError::InvalidSlug(custom_slug.to_owned()));
        }

        let content = ctx
            .resolve(raw, "content")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let tags = extract_tags(ctx.resolve(raw, "tags"));
        let (date_obj, date_text) = load_date(raw, ctx)?;

        let mut attrs = Vec::new();
        for (key, value) in raw {
            let name = key.as_str().expect("string keys checked at parse time");
            if ctx.is_builtin_field(name) {
                continue;
            }
            let kind = field_type(ctx, name, value);
            let formatted = format_value(ctx, name, &kind, value)?;
            attrs.push(Attr {
                key: name.to_owned(),
                title: ctx.field_label(name),
                kind,
                value: formatted,
            });
        }

        let by_kind = |wanted: &str| -> Vec<Attr> {
            attrs.iter().filter(|a| a.kind == wanted).cloned().collect()
        };
        let links = by_kind("link");
        let images = by_kind("image");
        let dates = by_kind("date");

        Ok(Self {
            part_idx,
            data_idx,
            data_consec_idx,
            ordinal_text,
            title,
            title_slug,
            summary,
            content,
            tags,
            date_obj,
            date_text,
            attrs,
            links,
            images,
            dates,
            content_html: None,
        })
    }
}

/// Resolve the builtin date field into calendar components and date text.
fn load_date(
    raw: &Mapping,
    ctx: &ClassifyContext<'_>,
) -> Result<(serde_json::Map<String, serde_json::Value>, String), EntryError> {
    let date_obj = match ctx.resolve(raw, "date") {
        Some(Value::String(text)) => {
            let dt = date::parse_date(text)
                .map_err(|e| EntryError::Malformed(format!("bad part date: {e}")))?;
            date::components(&dt)
        }
        Some(other) => {
            return Err(EntryError::Malformed(format!(
                "part date must be a string, not {other:?}"
            )));
        }
        None => serde_json::Map::new(),
    };

    let date_text = format_template(ctx.date_tmpl, &|name| {
        date_obj.get(name).map(json_scalar_to_string)
    })?;
    Ok((date_obj, date_text))
}

/// Tags may be a list of scalars or a single string.
pub(crate) fn extract_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

// ============================================================================
// Shape predicates
// ============================================================================

/// Python-style falsiness: null, false, zero, and empty containers.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Tagged(_) => false,
    }
}

/// Link-shaped: a string containing `://` and no whitespace.
fn is_link(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.contains("://") && !s.chars().any(char::is_whitespace))
}

/// Image-shaped: link-shaped and ending in a known image extension.
fn is_image(value: &Value) -> bool {
    if !is_link(value) {
        return false;
    }
    let lower = value.as_str().unwrap_or("").to_ascii_lowercase();
    IMAGE_EXTS.iter().any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Classify a non-builtin field by its value's shape.
///
/// An explicit `field_type_map` entry overrides shape inspection. Lists
/// are classified by their first element with `_list` appended. The image
/// check runs before the link check since image-shaped is the narrower
/// class.
fn field_type(ctx: &ClassifyContext<'_>, name: &str, value: &Value) -> String {
    if let Some(forced) = ctx.field_type_map.get(name) {
        return forced.clone();
    }
    if is_falsy(value) {
        // falsy values are omitted in rendering anyway
        return "default".to_owned();
    }
    let (probe, is_list) = match value {
        Value::Sequence(seq) => (&seq[0], true),
        other => (other, false),
    };
    let base = if is_image(probe) {
        "image"
    } else if is_link(probe) {
        "link"
    } else {
        "default"
    };
    if is_list {
        format!("{base}_list")
    } else {
        base.to_owned()
    }
}

// ============================================================================
// Value formatting
// ============================================================================

/// Format a classified value into its uniform record shape.
fn format_value(
    ctx: &ClassifyContext<'_>,
    name: &str,
    kind: &str,
    value: &Value,
) -> Result<serde_json::Value, EntryError> {
    match kind {
        "link" | "image" => format_link(ctx, name, value),
        "link_list" | "image_list" => match value {
            Value::Sequence(seq) => Ok(serde_json::Value::Array(
                seq.iter()
                    .map(|v| format_link(ctx, name, v))
                    .collect::<Result<_, _>>()?,
            )),
            other => Err(EntryError::Malformed(format!(
                "field {name:?} is typed {kind} but is not a list: {other:?}"
            ))),
        },
        "default" | "default_list" | "date" => yaml_to_json(value),
        other => Err(EntryError::Malformed(format!(
            "unknown field type {other:?} for field {name:?}"
        ))),
    }
}

/// Expand a link-shaped string into `{text, href, tip}`; pre-expanded
/// records pass through unchanged.
fn format_link(
    ctx: &ClassifyContext<'_>,
    name: &str,
    value: &Value,
) -> Result<serde_json::Value, EntryError> {
    match value {
        Value::String(href) => Ok(json!({
            "text": ctx.field_label(name),
            "href": href,
            "tip": null,
        })),
        other => yaml_to_json(other),
    }
}

fn yaml_to_json(value: &Value) -> Result<serde_json::Value, EntryError> {
    serde_json::to_value(value)
        .map_err(|e| EntryError::Malformed(format!("value not representable as JSON: {e}")))
}

fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Template formatting
// ============================================================================

/// Fill `{name}` placeholders from a lookup table.
///
/// `{{` and `}}` escape to literal braces. An unknown placeholder or an
/// unterminated `{` is an error; entry load fails the same way it would
/// for any other malformed template input.
pub(crate) fn format_template(
    tmpl: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<String, EntryError> {
    let mut out = String::with_capacity(tmpl.len());
    let mut chars = tmpl.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(EntryError::Malformed(format!(
                                "unterminated placeholder in template {tmpl:?}"
                            )));
                        }
                    }
                }
                let value = lookup(&name).ok_or_else(|| {
                    EntryError::Malformed(format!(
                        "unknown placeholder {{{name}}} in template {tmpl:?}"
                    ))
                })?;
                out.push_str(&value);
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Uppercase the first letter of each word, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_maps() -> (
        BTreeMap<String, String>,
        BTreeMap<String, String>,
        BTreeMap<String, String>,
    ) {
        (BTreeMap::new(), BTreeMap::new(), BTreeMap::new())
    }

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn classify_with(
        yaml: &str,
        ordinal_format: &str,
        date_tmpl: &str,
        idx: (usize, usize, usize),
    ) -> Result<DataPart, EntryError> {
        let (roles, labels, types) = empty_maps();
        let ctx = ClassifyContext {
            field_role_map: &roles,
            field_label_map: &labels,
            field_type_map: &types,
            ordinal_format,
            date_tmpl,
        };
        DataPart::classify(&mapping(yaml), &ctx, idx.0, idx.1, idx.2)
    }

    fn classify(yaml: &str) -> DataPart {
        classify_with(yaml, "", "", (1, 1, 1)).unwrap()
    }

    // ------------------------------------------------------------------------
    // Attribute classification
    // ------------------------------------------------------------------------

    #[test]
    fn test_link_attr() {
        let part = classify("key: http://example.com/x\n");
        assert_eq!(part.attrs.len(), 1);
        let attr = &part.attrs[0];
        assert_eq!(attr.key, "key");
        assert_eq!(attr.kind, "link");
        assert_eq!(attr.title, "Key");
        assert_eq!(attr.value["href"], "http://example.com/x");
        assert_eq!(attr.value["text"], "Key");
        assert!(attr.value["tip"].is_null());
        assert_eq!(part.links.len(), 1);
        assert!(part.images.is_empty());
    }

    #[test]
    fn test_image_attr_wins_over_link() {
        let part = classify("cover: http://example.com/pic.png\n");
        assert_eq!(part.attrs[0].kind, "image");
        assert_eq!(part.images.len(), 1);
        assert!(part.links.is_empty());
    }

    #[test]
    fn test_image_extension_case_insensitive() {
        let part = classify("cover: http://example.com/pic.JPG\n");
        assert_eq!(part.attrs[0].kind, "image");
    }

    #[test]
    fn test_string_with_space_is_default() {
        let part = classify("note: \"see http://example.com for more\"\n");
        assert_eq!(part.attrs[0].kind, "default");
        assert_eq!(part.attrs[0].value, "see http://example.com for more");
    }

    #[test]
    fn test_plain_string_is_default() {
        let part = classify("studio: Ghibli\n");
        assert_eq!(part.attrs[0].kind, "default");
        assert_eq!(part.attrs[0].value, "Ghibli");
    }

    #[test]
    fn test_link_list() {
        let part = classify("mirrors:\n  - http://a.example/x\n  - http://b.example/y\n");
        let attr = &part.attrs[0];
        assert_eq!(attr.kind, "link_list");
        assert_eq!(attr.value.as_array().unwrap().len(), 2);
        assert_eq!(attr.value[0]["href"], "http://a.example/x");
        // _list types are not collected into the scalar partitions
        assert!(part.links.is_empty());
    }

    #[test]
    fn test_default_list() {
        let part = classify("cast:\n  - Alice\n  - Bob\n");
        assert_eq!(part.attrs[0].kind, "default_list");
        assert_eq!(part.attrs[0].value, json!(["Alice", "Bob"]));
    }

    #[test]
    fn test_empty_list_is_default() {
        let part = classify("cast: []\n");
        assert_eq!(part.attrs[0].kind, "default");
    }

    #[test]
    fn test_falsy_values_are_default() {
        let part = classify("a: 0\nb: false\nc: \"\"\n");
        for attr in &part.attrs {
            assert_eq!(attr.kind, "default");
        }
    }

    #[test]
    fn test_underscore_key_label() {
        let part = classify("release_year: 1997\n");
        assert_eq!(part.attrs[0].title, "Release Year");
        assert_eq!(part.attrs[0].value, 1997);
    }

    #[test]
    fn test_field_label_map_override() {
        let (roles, mut labels, types) = empty_maps();
        labels.insert("imdb".into(), "IMDb".into());
        let ctx = ClassifyContext {
            field_role_map: &roles,
            field_label_map: &labels,
            field_type_map: &types,
            ordinal_format: "",
            date_tmpl: "",
        };
        let part = DataPart::classify(
            &mapping("imdb: http://imdb.example/tt1\n"),
            &ctx,
            1,
            1,
            1,
        )
        .unwrap();
        assert_eq!(part.attrs[0].title, "IMDb");
        assert_eq!(part.attrs[0].value["text"], "IMDb");
    }

    #[test]
    fn test_field_type_map_override() {
        let (roles, labels, mut types) = empty_maps();
        types.insert("homepage".into(), "link".into());
        let ctx = ClassifyContext {
            field_role_map: &roles,
            field_label_map: &labels,
            field_type_map: &types,
            ordinal_format: "",
            date_tmpl: "",
        };
        // Not link-shaped, but the type map forces link formatting
        let part =
            DataPart::classify(&mapping("homepage: example.com\n"), &ctx, 1, 1, 1).unwrap();
        assert_eq!(part.attrs[0].kind, "link");
        assert_eq!(part.attrs[0].value["href"], "example.com");
    }

    #[test]
    fn test_field_role_map_resolution() {
        let (mut roles, labels, types) = empty_maps();
        roles.insert("title".into(), "name".into());
        let ctx = ClassifyContext {
            field_role_map: &roles,
            field_label_map: &labels,
            field_type_map: &types,
            ordinal_format: "",
            date_tmpl: "",
        };
        let part = DataPart::classify(&mapping("name: The Thing\n"), &ctx, 1, 1, 1).unwrap();
        assert_eq!(part.title, "The Thing");
        // The mapped field is builtin now, not an attr
        assert!(part.attrs.is_empty());
    }

    #[test]
    fn test_builtin_fields_not_in_attrs() {
        let part = classify("title: T\ncontent: body\nsummary: s\ntags: [x]\nother: y\n");
        assert_eq!(part.attrs.len(), 1);
        assert_eq!(part.attrs[0].key, "other");
    }

    // ------------------------------------------------------------------------
    // Slug handling
    // ------------------------------------------------------------------------

    #[test]
    fn test_slug_derived_from_title() {
        let part = classify("title: The Long Goodbye\n");
        assert_eq!(part.title_slug, "the-long-goodbye");
    }

    #[test]
    fn test_custom_slug_accepted() {
        let part = classify("title: Whatever\ntitle_slug: custom-slug\n");
        assert_eq!(part.title_slug, "custom-slug");
    }

    #[test]
    fn test_invalid_custom_slug() {
        let err = classify_with("title: T\ntitle_slug: My Slug\n", "", "", (1, 1, 1));
        assert!(matches!(err, Err(EntryError::InvalidSlug(s)) if s == "My Slug"));
    }

    #[test]
    fn test_empty_title_empty_slug() {
        let part = classify("key: value\n");
        assert_eq!(part.title, "");
        assert_eq!(part.title_slug, "");
    }

    // ------------------------------------------------------------------------
    // Ordinal and date text
    // ------------------------------------------------------------------------

    #[test]
    fn test_ordinal_text() {
        let part = classify_with("title: T\n", "{i}.{ci}", "", (5, 3, 1)).unwrap();
        assert_eq!(part.ordinal_text, "3.1");
    }

    #[test]
    fn test_ordinal_text_empty_template() {
        let part = classify_with("title: T\n", "", "", (5, 3, 1)).unwrap();
        assert_eq!(part.ordinal_text, "");
    }

    #[test]
    fn test_ordinal_unknown_placeholder() {
        let err = classify_with("title: T\n", "{nope}", "", (1, 1, 1));
        assert!(matches!(err, Err(EntryError::Malformed(_))));
    }

    #[test]
    fn test_date_obj_components() {
        let part = classify("date: 2024-06-15T14:30:45Z\n");
        assert_eq!(part.date_obj["year"], 2024);
        assert_eq!(part.date_obj["month"], 6);
        assert_eq!(part.date_obj["day"], 15);
        assert_eq!(part.date_obj["tzname"], "+00:00");
    }

    #[test]
    fn test_date_text_template() {
        let part =
            classify_with("date: 2024-06-15T00:00:00Z\n", "", "{year}-{month}", (1, 1, 1))
                .unwrap();
        assert_eq!(part.date_text, "2024-6");
    }

    #[test]
    fn test_no_date_empty_obj() {
        let part = classify("title: T\n");
        assert!(part.date_obj.is_empty());
        assert_eq!(part.date_text, "");
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let err = classify_with("date: next tuesday\n", "", "", (1, 1, 1));
        assert!(matches!(err, Err(EntryError::Malformed(_))));
    }

    // ------------------------------------------------------------------------
    // Tags, summary, content
    // ------------------------------------------------------------------------

    #[test]
    fn test_tags_list() {
        let part = classify("tags: [rust, ssg]\n");
        assert_eq!(part.tags, vec!["rust", "ssg"]);
    }

    #[test]
    fn test_tags_single_string() {
        let part = classify("tags: solo\n");
        assert_eq!(part.tags, vec!["solo"]);
    }

    #[test]
    fn test_content_and_summary() {
        let part = classify("content: \"*body*\"\nsummary: short\n");
        assert_eq!(part.content.as_deref(), Some("*body*"));
        assert_eq!(part.summary, Some(json!("short")));
    }

    // ------------------------------------------------------------------------
    // Template formatter
    // ------------------------------------------------------------------------

    #[test]
    fn test_format_template_basic() {
        let out = format_template("{a} and {b}", &|n| match n {
            "a" => Some("1".into()),
            "b" => Some("2".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(out, "1 and 2");
    }

    #[test]
    fn test_format_template_escapes() {
        let out = format_template("{{literal}} {x}", &|_| Some("v".into())).unwrap();
        assert_eq!(out, "{literal} v");
    }

    #[test]
    fn test_format_template_unterminated() {
        assert!(format_template("{oops", &|_| Some("v".into())).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("release year"), "Release Year");
        assert_eq!(title_case("IMDB link"), "Imdb Link");
        assert_eq!(title_case(""), "");
    }

    // ------------------------------------------------------------------------
    // Part accessors
    // ------------------------------------------------------------------------

    #[test]
    fn test_part_accessors() {
        let mut part = Part::Text(TextPart::new("hello".into(), 2));
        assert_eq!(part.part_idx(), 2);
        assert_eq!(part.content(), Some("hello"));
        assert!(part.content_html().is_none());
        part.set_content_html("<p>hello</p>".into());
        assert_eq!(part.content_html(), Some("<p>hello</p>"));
        assert!(part.as_data().is_none());
    }

    #[test]
    fn test_data_part_serializes_type_key() {
        let part = classify("key: http://example.com/x\n");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["attrs"][0]["type"], "link");
    }
}
