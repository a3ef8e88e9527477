//! Image-Spider main entry point
//!
//! This is the command-line interface for the Image-Spider keyword image crawler.

use anyhow::Context;
use clap::Parser;
use image_spider::config::{load_config, validate, Config};
use image_spider::crawler::{spawn_crawl, CrawlOptions, Crawler};
use image_spider::output::{format_progress, print_summary};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Image-Spider: download images for a search keyword
///
/// Pages through search results for KEYWORD and saves up to COUNT images as
/// KEYWORD_1.jpg, KEYWORD_2.jpg, ... Press Ctrl-C to stop early; images
/// already saved are kept.
#[derive(Parser, Debug)]
#[command(name = "image-spider")]
#[command(version = "1.0.0")]
#[command(about = "Download images for a search keyword", long_about = None)]
struct Cli {
    /// Search keyword
    #[arg(value_name = "KEYWORD")]
    keyword: String,

    /// Number of images to download (values below 1 are raised to 1)
    #[arg(short = 'n', long, default_value_t = 100)]
    count: i64,

    /// Seconds to wait after each download (defaults to the configured delay)
    #[arg(short, long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Save images into this directory instead of <root>/<keyword>
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            config
        }
    };

    let keyword = cli.keyword.trim().to_string();
    if keyword.is_empty() {
        anyhow::bail!("please enter a search keyword");
    }

    let mut options = CrawlOptions::new(keyword, cli.count.max(1) as usize);
    if let Some(seconds) = cli.delay {
        let delay = Duration::try_from_secs_f64(seconds)
            .with_context(|| format!("invalid delay: {}", seconds))?;
        options = options.with_delay(delay);
    }
    if let Some(output) = cli.output.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        options = options.with_destination(output);
    }

    let target = options.target_count;
    let crawler = Arc::new(Crawler::new(config)?);
    let cancel = CancellationToken::new();

    tracing::info!("Starting download of '{}' images", options.keyword);
    let mut handle = spawn_crawl(crawler, options, cancel.clone());

    // Ctrl-C plays the role of a stop button
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Stopping after the current download...");
            ctrl_c_token.cancel();
        }
    });

    while let Some(event) = handle.progress.recv().await {
        if !cli.quiet {
            println!("{}", format_progress(&event));
        }
    }

    let result = handle
        .task
        .await
        .context("crawl task panicked")?
        .context("crawl failed")?;

    if !cli.quiet {
        print_summary(&result, target);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("image_spider=info,warn"),
            1 => EnvFilter::new("image_spider=debug,info"),
            2 => EnvFilter::new("image_spider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
