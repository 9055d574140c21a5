//! Recipe-Crawler main entry point
//!
//! This is the command-line interface for the Recipe-Crawler.

use anyhow::Context;
use clap::Parser;
use recipe_crawler::config::{load_config, Config};
use recipe_crawler::crawler::run_from_files;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Recipe-Crawler: finds recipe pages linked from seed URLs
///
/// Each seed page is searched for links to recipe pages, which are followed
/// up to the configured depth. Every recipe page found is written to the
/// output file as url, name, time, yield and ingredient lines.
#[derive(Parser, Debug)]
#[command(name = "recipe-crawler")]
#[command(version)]
#[command(about = "Discovers and extracts recipes from linked web pages", long_about = None)]
struct Cli {
    /// File with one seed URL per line
    #[arg(value_name = "SEEDS")]
    seeds: PathBuf,

    /// Where to write the collected recipes
    #[arg(value_name = "OUTPUT", default_value = "recipes.txt")]
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of link hops followed from each seed
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

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

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with partial results");
            on_interrupt.cancel();
        }
    });

    let output = run_from_files(&config, &cli.seeds, &cli.output, cancel)
        .await
        .context("recipe crawl failed")?;

    if output.interrupted {
        tracing::warn!(
            "Run was interrupted; {} recipes written to {}",
            output.recipes.len(),
            cli.output.display()
        );
    } else {
        tracing::info!(
            "Run completed: {} recipes written to {}",
            output.recipes.len(),
            cli.output.display()
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("recipe_crawler=info,warn"),
            1 => EnvFilter::new("recipe_crawler=debug,info"),
            2 => EnvFilter::new("recipe_crawler=trace,debug"),
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
