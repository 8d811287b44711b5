//! Site configuration management for `strata.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)           |
//! | `[build]`   | Directory layout, feeds, archive layout      |
//! | `[serve]`   | Development server (port, interface, watch)  |
//! | `[publish]` | rsync publish target                         |
//! | `[extra]`   | User-defined custom fields                   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! tagline = "notes and entries"
//! url = "https://example.com"
//!
//! [build]
//! entries = "entries"
//! output = "site"
//!
//! [serve]
//! port = 8080
//!
//! [extra]
//! theme_accent = "#7c3aed"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod publish;
mod serve;

// Internal imports used in this module
use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use publish::PublishConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing strata.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Publish settings
    #[serde(default)]
    pub publish: PublishConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.expect("CLI reference set during startup")
    }

    /// Canonical site URL: domain + base path, slash-terminated.
    pub fn canonical_url(&self) -> String {
        let domain = self
            .base
            .url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/');
        format!("{domain}{}", self.base.base_path)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);
        self.update_path_with_root(&root);

        if !self.base.base_path.ends_with('/') {
            self.base.base_path.push('/');
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            self.base.url = Some(format!(
                "http://{}:{}",
                self.serve.interface, self.serve.port
            ));
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.build.entries = Self::normalize_path(&root.join(&self.build.entries));
        self.build.templates = Self::normalize_path(&root.join(&self.build.templates));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.uploads = Self::normalize_path(&root.join(&self.build.uploads));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        let cli = self.get_cli();

        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.feed.enable
            && self.base.url.is_none()
            && (cli.is_build() || cli.is_publish())
        {
            bail!("[base.url] is required for feed generation");
        }

        if !self.build.entries.exists() {
            bail!(ConfigError::Validation(format!(
                "[build.entries] directory not found: {}",
                self.build.entries.display()
            )));
        }

        if !self.build.templates.exists() {
            bail!(ConfigError::Validation(format!(
                "[build.templates] directory not found: {}",
                self.build.templates.display()
            )));
        }

        if cli.is_publish() {
            for (field, value) in [
                ("remote_host", &self.publish.remote_host),
                ("remote_user", &self.publish.remote_user),
                ("remote_path", &self.publish.remote_path),
            ] {
                if value.is_none() {
                    bail!(ConfigError::Validation(format!(
                        "[publish.{field}] is required for publishing"
                    )));
                }
            }
            Self::check_command_installed(
                "[publish.rsync_command]",
                &self.publish.rsync_command,
            )?;
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &str) -> Result<()> {
        if command.is_empty() {
            bail!(ConfigError::Validation(format!("{field} must be set")));
        }
        which::which(command)
            .with_context(|| format!("`{command}` not found. Please install it first."))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [base]
            title = "My Blog"
            author = "Test Author"
        "#;
        let result = SiteConfig::from_str(config_str);

        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.base.title, "My Blog");
        assert_eq!(config.base.author, "Test Author");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [base
            title = "My Blog"
        "#;
        let result = SiteConfig::from_str(invalid_config);

        assert!(result.is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_canonical_url() {
        let mut config = SiteConfig::default();
        config.base.url = Some("https://example.com/".into());
        assert_eq!(config.canonical_url(), "https://example.com/");

        config.base.base_path = "/blog/".into();
        assert_eq!(config.canonical_url(), "https://example.com/blog/");
    }

    #[test]
    fn test_extra_fields() {
        let config = r#"
            [extra]
            custom_field = "custom_value"
            number_field = 42
            nested = { key = "value" }
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(
            config.extra.get("custom_field").and_then(|v| v.as_str()),
            Some("custom_value")
        );
        assert_eq!(
            config.extra.get("number_field").and_then(|v| v.as_integer()),
            Some(42)
        );
    }

    #[test]
    fn test_extra_fields_nested() {
        let config = r#"
            [extra.social]
            mastodon = "@user"
            github = "username"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        let social = config.extra.get("social").and_then(|v| v.as_table());
        assert!(social.is_some());
        let social = social.unwrap();
        assert_eq!(social.get("mastodon").and_then(|v| v.as_str()), Some("@user"));
        assert_eq!(social.get("github").and_then(|v| v.as_str()), Some("username"));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.base.title, "Strata");
        assert!(config.build.feed.enable);
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.publish.rsync_flags, "avzPk");
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            title = "My Blog"
            tagline = "a personal blog"
            author = "Alice"
            email = "alice@example.com"
            url = "https://myblog.com"
            language = "en-US"
            copyright = "2026 Alice"

            [build]
            entries = "posts"
            output = "dist"

            [build.feed]
            enable = true
            rss_filename = "feed.xml"

            [serve]
            interface = "127.0.0.1"
            port = 3000
            watch = true

            [publish]
            remote_host = "myblog.com"
            remote_user = "alice"
            remote_path = "/srv/www"

            [extra]
            analytics_id = "UA-12345"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "My Blog");
        assert_eq!(config.base.author, "Alice");
        assert_eq!(config.build.entries, PathBuf::from("posts"));
        assert!(config.build.feed.enable);
        assert_eq!(config.build.feed.rss_filename, "feed.xml");
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.publish.remote_host.as_deref(), Some("myblog.com"));
        assert!(config.extra.contains_key("analytics_id"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [unknown_section]
            field = "value"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
