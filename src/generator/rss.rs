//! RSS 2.0 feed generation.
//!
//! Builds one feed per entry list (the main list and every tag list)
//! from already-rendered entries.

use crate::config::SiteConfig;
use crate::entry::{Entry, EntryList};
use crate::utils::date;
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

// ============================================================================
// Public API
// ============================================================================

/// Render the RSS feed for an entry list.
pub fn render_rss(config: &SiteConfig, list: &EntryList, arena: &[Entry]) -> Result<String> {
    let list_url = format!("{}{}", config.canonical_url(), list.path_part());
    let title = match &list.tag {
        Some(tag) => format!("{} - {tag}", config.base.title),
        None => config.base.title.clone(),
    };

    let items: Vec<rss::Item> = list
        .iter(arena)
        .map(|entry| entry_to_rss_item(entry, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(title)
        .link(list_url)
        .description(config.base.tagline.clone())
        .language(config.base.language.clone())
        .generator("strata".to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a rendered entry to an rss item.
fn entry_to_rss_item(entry: &Entry, config: &SiteConfig) -> rss::Item {
    let link = format!("{}{}", config.canonical_url(), entry.output_filename());

    ItemBuilder::default()
        .title(entry.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(entry.rendered_summary.clone())
        .pub_date(date::to_rfc2822(&entry.publish_date))
        .author(rss_author(config))
        .build()
}

/// Normalize the site author to rss format: "email@example.com (Name)"
fn rss_author(config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("author pattern is valid")
    });

    let author = &config.base.author;
    if author.is_empty() {
        return None;
    }
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }
    Some(format!("{} ({})", config.base.email, author))
}
