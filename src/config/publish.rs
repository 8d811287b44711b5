//! `[publish]` section configuration.
//!
//! Settings for the rsync-based publish step.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[publish]` section in strata.toml - remote publish settings.
///
/// # Example
/// ```toml
/// [publish]
/// remote_host = "example.com"
/// remote_user = "alice"
/// remote_path = "/var/www/blog"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// rsync executable to invoke.
    #[serde(default = "defaults::publish::rsync_command")]
    #[educe(Default = defaults::publish::rsync_command())]
    pub rsync_command: String,

    /// Short-flag cluster passed as `-<flags>`.
    #[serde(default = "defaults::publish::rsync_flags")]
    #[educe(Default = defaults::publish::rsync_flags())]
    pub rsync_flags: String,

    /// Remote host to publish to.
    #[serde(default)]
    pub remote_host: Option<String>,

    /// Remote user for the rsync connection.
    #[serde(default)]
    pub remote_user: Option<String>,

    /// Remote directory the output is synced into.
    #[serde(default)]
    pub remote_path: Option<String>,
}
