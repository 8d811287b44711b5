//! `[build]` section configuration.
//!
//! Contains the directory layout and feed/archive settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in strata.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// entries = "entries"     # Entry source directory
/// output = "site"         # Output directory
///
/// [build.feed]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Entry source directory (`*.md` / `*.yaml` files).
    #[serde(default = "defaults::build::entries")]
    #[educe(Default = defaults::build::entries())]
    pub entries: PathBuf,

    /// HTML template directory.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Static assets directory, copied into the output verbatim.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Uploads directory, symlinked into the output when present.
    #[serde(default = "defaults::build::uploads")]
    #[educe(Default = defaults::build::uploads())]
    pub uploads: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Layout suffix for tag archive pages (`archive_<layout>.html`).
    #[serde(default = "defaults::build::tag_archive_layout")]
    #[educe(Default = defaults::build::tag_archive_layout())]
    pub tag_archive_layout: String,

    /// Feed generation settings.
    #[serde(default)]
    pub feed: FeedConfig,
}

/// `[build.feed]` section - RSS/Atom feed generation configuration.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Enable feed generation for the main list and every tag list.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Filename for the RSS 2.0 feed.
    #[serde(default = "defaults::build::feed::rss_filename")]
    #[educe(Default = defaults::build::feed::rss_filename())]
    pub rss_filename: String,

    /// Filename for the Atom feed.
    #[serde(default = "defaults::build::feed::atom_filename")]
    #[educe(Default = defaults::build::feed::atom_filename())]
    pub atom_filename: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.entries, PathBuf::from("entries"));
        assert_eq!(config.build.templates, PathBuf::from("templates"));
        assert_eq!(config.build.output, PathBuf::from("site"));
        assert_eq!(config.build.tag_archive_layout, "brief");
        assert!(config.build.feed.enable);
        assert_eq!(config.build.feed.rss_filename, "rss.xml");
        assert_eq!(config.build.feed.atom_filename, "atom.xml");
    }

    #[test]
    fn test_build_config_override() {
        let config = r#"
            [build]
            entries = "posts"
            output = "dist"

            [build.feed]
            enable = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.entries, PathBuf::from("posts"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.build.feed.enable);
    }

    #[test]
    fn test_build_config_unknown_field() {
        let config = r#"
            [build]
            minify = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
