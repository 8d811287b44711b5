//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, canonical URL, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in strata.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// tagline = "notes and entries"
/// author = "Alice"
/// url = "https://myblog.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in headers and feeds.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Title for the HTML head; falls back to `title` when empty.
    #[serde(default)]
    pub head_title: String,

    /// Short site tagline shown under the title.
    #[serde(default)]
    pub tagline: String,

    /// Author name for feeds and meta tags.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Author email for rss feed items.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Canonical domain for absolute links in feeds (e.g. "https://example.com").
    /// Required when feed generation is enabled.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Base path under the canonical domain; always slash-terminated.
    #[serde(default = "defaults::base::base_path")]
    #[educe(Default = defaults::base::base_path())]
    pub base_path: String,

    /// BCP 47 language code (e.g., "en", "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Copyright notice for the site footer.
    #[serde(default)]
    pub copyright: String,

    /// Analytics tracker id; validated before being exposed to templates.
    #[serde(default)]
    pub analytics_code: String,

    /// Master switch for analytics in rendered pages.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable_analytics: bool,
}
