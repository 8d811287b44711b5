//! Strata - a static site generator for layered Markdown/YAML entries.

mod cli;
mod config;
mod deploy;
mod entry;
mod generator;
mod logger;
mod render;
mod serve;
mod site;
mod utils;
mod watch;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use deploy::publish_site;
use serve::serve_site;
use site::Site;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build => Site::new(config, false).process(),
        Commands::Serve { .. } => {
            let mut site = Site::new(config, true);
            site.process()?;
            serve_site(config)
        }
        Commands::Publish => {
            Site::new(config, false).process()?;
            publish_site(config)
        }
        Commands::Clean => clean_output(config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Delete the contents of the output directory, leaving the directory.
fn clean_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if !output.is_dir() {
        log!("clean"; "nothing to clean at {}", output.display());
        return Ok(());
    }

    for dir_entry in fs::read_dir(output)
        .with_context(|| format!("reading output path {}", output.display()))?
    {
        let path = dir_entry?.path();
        if path.is_dir() && !path.is_symlink() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    log!("clean"; "cleaned {}", output.display());
    Ok(())
}
