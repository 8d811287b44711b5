//! `[serve]` section configuration.
//!
//! Development server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in strata.toml - development server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "127.0.0.1"
/// port = 8080
/// watch = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Interface to bind on.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// Port to listen on.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Watch source directories and rebuild on change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,

    /// Meta-refresh interval injected into dev-mode pages, in seconds.
    /// Zero disables the refresh.
    #[serde(default = "defaults::serve::autorefresh")]
    #[educe(Default = defaults::serve::autorefresh())]
    pub autorefresh: u64,
}
