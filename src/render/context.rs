//! Template context assembly.
//!
//! Builds the JSON context trees handed to the template renderer: the
//! site-info snapshot, per-entry dictionaries (optionally with prev/next
//! neighbor windows), and per-list feed/archive info.

use crate::config::SiteConfig;
use crate::entry::{Entry, EntryList};
use crate::utils::date;
use anyhow::Result;
use chrono::Local;
use regex::Regex;
use serde_json::{Map, Value, json};
use std::sync::LazyLock;

static ANALYTICS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_-]+").expect("analytics pattern is valid"));

/// Minimum plausible length for an analytics tracker id.
const MIN_ANALYTICS_LEN: usize = 6;

// ============================================================================
// Site info
// ============================================================================

/// Build the site-level template context snapshot.
pub fn site_info(config: &SiteConfig, dev_mode: bool) -> Value {
    let base = &config.base;
    let feed = &config.build.feed;

    let head_title = if base.head_title.is_empty() {
        base.title.clone()
    } else {
        base.head_title.clone()
    };

    let canonical_domain = base
        .url
        .as_deref()
        .unwrap_or_default()
        .trim_end_matches('/')
        .to_owned();
    let canonical_url = config.canonical_url();
    let base_path = &base.base_path;

    let now = Local::now().fixed_offset();

    json!({
        "dev_mode": dev_mode,
        "dev_mode_refresh_seconds": if dev_mode { config.serve.autorefresh } else { 0 },
        "title": base.title,
        "head_title": head_title,
        "tagline": base.tagline,
        "charset": "UTF-8",
        "lang_code": base.language,
        "author_name": base.author,
        "copyright_notice": base.copyright,
        "enable_analytics": base.enable_analytics,
        "analytics_code": analytics_code(config),
        "canonical_domain": canonical_domain,
        "canonical_base_path": base_path,
        "canonical_url": canonical_url,
        "rss_feed_url": format!("{base_path}{}", feed.rss_filename),
        "canonical_rss_feed_url": format!("{canonical_url}{}", feed.rss_filename),
        "atom_feed_url": format!("{base_path}{}", feed.atom_filename),
        "canonical_atom_feed_url": format!("{canonical_url}{}", feed.atom_filename),
        "last_generated": date::to_timestamp(&now, false),
        "last_generated_utc": date::to_timestamp(&now, true),
        "export_html_ext": crate::entry::EXPORT_HTML_EXT,
    })
}

/// Validate the configured analytics code; invalid codes render as empty.
fn analytics_code(config: &SiteConfig) -> String {
    let raw = config.base.analytics_code.trim();
    if raw.is_empty() {
        return String::new();
    }
    match ANALYTICS_RE.find(raw) {
        Some(m) if m.as_str().len() >= MIN_ANALYTICS_LEN => m.as_str().to_owned(),
        _ => String::new(),
    }
}

// ============================================================================
// Entry dictionaries
// ============================================================================

/// Serialize an entry into its template dictionary, without neighbors.
pub fn entry_dict(entry: &Entry) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    map.insert("title".into(), entry.title.clone().into());
    map.insert("headers".into(), serde_json::to_value(&entry.headers)?);
    map.insert("entry_root".into(), entry.entry_root.clone().into());
    map.insert("output_filename".into(), entry.output_filename().into());
    map.insert("tags".into(), serde_json::to_value(entry.tags())?);
    map.insert("is_draft".into(), entry.is_draft().into());
    map.insert("is_special".into(), entry.is_special().into());
    map.insert(
        "summary".into(),
        match (&entry.rendered_summary, &entry.summary) {
            (Some(rendered), _) => rendered.clone().into(),
            (None, Some(declared)) => declared.clone(),
            (None, None) => Value::Null,
        },
    );
    map.insert(
        "loaded_parts".into(),
        serde_json::to_value(&entry.loaded_parts)?,
    );
    map.insert("word_count".into(), entry.word_count().into());
    map.insert("reading_time".into(), entry.reading_time().into());
    map.insert(
        "content_html".into(),
        entry.content_html.clone().map_or(Value::Null, Value::from),
    );
    map.insert(
        "entry_html".into(),
        entry.entry_html.clone().map_or(Value::Null, Value::from),
    );
    map.insert(
        "publish_timestamp_local".into(),
        date::to_timestamp(&entry.publish_date, false).into(),
    );
    map.insert(
        "publish_timestamp_utc".into(),
        date::to_timestamp(&entry.publish_date, true).into(),
    );
    Ok(map)
}

/// Entry dictionary with prev/next neighbor windows attached.
///
/// Neighbors are serialized without their own windows.
pub fn entry_dict_with_links(
    entry: &Entry,
    prev: &[&Entry],
    next: &[&Entry],
) -> Result<Map<String, Value>> {
    let mut map = entry_dict(entry)?;
    map.insert(
        "prev_entries".into(),
        Value::Array(
            prev.iter()
                .map(|e| entry_dict(e).map(Value::Object))
                .collect::<Result<_>>()?,
        ),
    );
    map.insert(
        "next_entries".into(),
        Value::Array(
            next.iter()
                .map(|e| entry_dict(e).map(Value::Object))
                .collect::<Result<_>>()?,
        ),
    );
    Ok(map)
}

// ============================================================================
// List info
// ============================================================================

/// Feed/archive info for an entry list (the main list or a tag list).
pub fn list_info(config: &SiteConfig, list: &EntryList) -> Value {
    let canonical_url = format!("{}{}", config.canonical_url(), list.path_part());
    let feed = &config.build.feed;
    json!({
        "tag": list.tag.clone().unwrap_or_default(),
        "canonical_url": canonical_url,
        "canonical_rss_feed_url": format!("{canonical_url}{}", feed.rss_filename),
        "canonical_atom_feed_url": format!("{canonical_url}{}", feed.atom_filename),
    })
}

/// Wrap a JSON value as a tera render context.
pub fn tera_context(value: Value) -> Result<tera::Context> {
    Ok(tera::Context::from_value(value)?)
}

// ============================================================================
// Tests
// ============================================================================
