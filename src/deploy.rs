//! Site publishing via rsync.
//!
//! Syncs the local output directory to the configured remote. The local
//! output must contain an `index.html` so a half-built or empty directory
//! is never synced over a live site.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::process::Command;

/// Publish the built site to the configured remote host.
pub fn publish_site(config: &'static SiteConfig) -> Result<()> {
    let publish = &config.publish;
    let output = &config.build.output;

    if !output.join("index.html").is_file() {
        bail!(
            "refusing to publish: no index.html in {}",
            output.display()
        );
    }

    // Validation guarantees these are set for the publish command
    let host = publish.remote_host.as_deref().context("remote_host unset")?;
    let user = publish.remote_user.as_deref().context("remote_user unset")?;
    let path = publish.remote_path.as_deref().context("remote_path unset")?;
    let remote = format!("{user}@{host}:{path}");

    // rsync needs the trailing slash to sync directory contents
    let mut local = output.display().to_string();
    if !local.ends_with('/') {
        local.push('/');
    }

    log!("publish"; "{} -{} {} {}", publish.rsync_command, publish.rsync_flags, local, remote);

    let result = Command::new(&publish.rsync_command)
        .arg(format!("-{}", publish.rsync_flags))
        .arg(&local)
        .arg(&remote)
        .output()
        .with_context(|| format!("failed to run {}", publish.rsync_command))?;

    let stdout = String::from_utf8_lossy(&result.stdout);
    if !stdout.trim().is_empty() {
        log!("publish"; "{}", stdout.trim_end());
    }

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        if !stderr.trim().is_empty() {
            log!("error"; "{}", stderr.trim_end());
        }
        bail!(
            "publish failed: rsync exited with {}",
            result
                .status
                .code()
                .map_or_else(|| "signal".to_owned(), |c| c.to_string())
        );
    }

    log!("publish"; "done");
    Ok(())
}
