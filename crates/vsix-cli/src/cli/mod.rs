//! CLI for vsixget: flag parsing and dispatch into vsix-core.

mod render;

use anyhow::{bail, Result};
use clap::Parser;
use render::ConsoleSink;
use std::path::PathBuf;
use vsix_core::batch::run_batch;
use vsix_core::config::{self, DownloadConfig};
use vsix_core::downloader::Downloader;
use vsix_core::marketplace::Endpoints;
use vsix_core::progress::{NoopSink, ProgressSink};

/// Download VS Code extension packages for offline installation.
#[derive(Debug, Parser)]
#[command(name = "vsixget")]
#[command(
    about = "Download VS Code extension packages from the marketplace for offline use",
    long_about = None
)]
pub struct Cli {
    /// Extension identifier in publisher.extension form.
    pub extension: Option<String>,

    /// Path to a text file with identifiers to download, one per line.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Specific version to download (skips the marketplace query).
    #[arg(long)]
    pub version: Option<String>,

    /// Destination folder (default: extensions/).
    #[arg(long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Force re-download even if the package already exists.
    #[arg(long)]
    pub no_cache: bool,

    /// Proxy URL for both marketplace calls.
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// VS Code target platform (e.g. win32-x64, linux-x64, darwin-arm64).
    #[arg(long, value_name = "PLATFORM")]
    pub target_platform: Option<String>,

    /// Ignore TLS certificate verification errors.
    #[arg(long)]
    pub ignore_ssl: bool,

    /// Output the result as a single JSON value (suppresses progress).
    #[arg(long)]
    pub json: bool,

    /// Suppress all progress output.
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    fn download_config(&self) -> DownloadConfig {
        DownloadConfig {
            proxy: self.proxy.clone(),
            version: self.version.clone(),
            destination: self.destination.clone(),
            no_cache: self.no_cache,
            target_platform: self.target_platform.clone(),
            ignore_ssl: self.ignore_ssl,
        }
    }
}

pub fn run_from_args() -> Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let file_cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", file_cfg);

    let downloader = Downloader::new(Endpoints::default(), file_cfg.retry_policy());
    let cfg = cli.download_config();
    let silent = cli.json || cli.quiet;
    let console = ConsoleSink;
    let sink: &dyn ProgressSink = if silent { &NoopSink } else { &console };

    if let Some(list_path) = &cli.file {
        let outcomes = run_batch(list_path, &downloader, &cfg, sink)?;
        if cli.json {
            println!("{}", serde_json::json!({ "results": outcomes }));
        } else if !cli.quiet {
            render::report_failures(&outcomes);
        }
    } else if let Some(extension) = &cli.extension {
        let outcome = downloader.download(extension, &cfg, sink);
        if cli.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else if !cli.quiet {
            render::report_failures(std::slice::from_ref(&outcome));
        }
    } else {
        bail!("Please provide either an extension or a file containing extensions.");
    }

    Ok(())
}
