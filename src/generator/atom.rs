//! Atom 1.0 feed generation.
//!
//! Hand-assembled XML, one feed per entry list.
//!
//! # Feed Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
//!   <title type="text">Site Title</title>
//!   <id>https://example.com/</id>
//!   <updated>2026-01-01T00:00:00+00:00</updated>
//!   <entry>...</entry>
//! </feed>
//! ```

use crate::config::SiteConfig;
use crate::entry::{Entry, EntryList};
use chrono::Local;

/// XML namespace for Atom feeds
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

// ============================================================================
// Public API
// ============================================================================

/// Render the Atom feed for an entry list.
pub fn render_atom(config: &SiteConfig, list: &EntryList, arena: &[Entry]) -> String {
    let list_url = format!("{}{}", config.canonical_url(), list.path_part());
    let atom_url = format!("{list_url}{}", config.build.feed.atom_filename);
    let title = match &list.tag {
        Some(tag) => format!("{} - {tag}", config.base.title),
        None => config.base.title.clone(),
    };
    let updated = Local::now().fixed_offset().to_rfc3339();

    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<feed xmlns="{ATOM_NS}" xml:lang="{}">"#,
        escape_xml(&config.base.language)
    ));
    xml.push('\n');
    xml.push_str(&format!(
        "  <title type=\"text\">{}</title>\n",
        escape_xml(&title)
    ));
    if !config.base.tagline.is_empty() {
        xml.push_str(&format!(
            "  <subtitle type=\"text\">{}</subtitle>\n",
            escape_xml(&config.base.tagline)
        ));
    }
    xml.push_str(&format!("  <id>{}</id>\n", escape_xml(&list_url)));
    xml.push_str(&format!(
        "  <link rel=\"alternate\" type=\"text/html\" href=\"{}\" />\n",
        escape_xml(&list_url)
    ));
    xml.push_str(&format!(
        "  <link rel=\"self\" type=\"application/atom+xml\" href=\"{}\" />\n",
        escape_xml(&atom_url)
    ));
    xml.push_str(&format!("  <updated>{updated}</updated>\n"));
    xml.push_str(
        "  <generator uri=\"https://github.com/strata-ssg/strata\">Strata</generator>\n",
    );

    for entry in list.iter(arena) {
        xml.push_str(&render_entry(entry, config));
    }

    xml.push_str("</feed>\n");
    xml
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Render a single `<entry>` element.
fn render_entry(entry: &Entry, config: &SiteConfig) -> String {
    let url = format!("{}{}", config.canonical_url(), entry.output_filename());
    let published = entry.publish_date.to_rfc3339();

    // Feed readers get the concatenated part HTML as escaped content
    let content: String = entry
        .loaded_parts
        .iter()
        .filter_map(|p| p.content_html())
        .collect();

    let mut xml = String::with_capacity(512);
    xml.push_str("  <entry>\n");
    xml.push_str(&format!(
        "    <author><name>{}</name></author>\n",
        escape_xml(&config.base.author)
    ));
    xml.push_str(&format!(
        "    <title>{}</title>\n",
        escape_xml(&entry.title)
    ));
    xml.push_str(&format!("    <id>{}</id>\n", escape_xml(&url)));
    xml.push_str(&format!(
        "    <link rel=\"alternate\" type=\"text/html\" href=\"{}\" />\n",
        escape_xml(&url)
    ));
    xml.push_str(&format!("    <published>{published}</published>\n"));
    xml.push_str(&format!("    <updated>{published}</updated>\n"));
    if let Some(summary) = &entry.rendered_summary {
        xml.push_str(&format!(
            "    <summary type=\"html\">{}</summary>\n",
            escape_xml(summary)
        ));
    }
    xml.push_str(&format!(
        "    <content type=\"html\">{}</content>\n",
        escape_xml(&content)
    ));
    xml.push_str("  </entry>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
