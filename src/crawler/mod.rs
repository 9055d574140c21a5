//! Crawler module for recipe discovery and collection
//!
//! This module contains the core crawling logic, including:
//! - Page fetching behind the [`PageFetcher`] trait
//! - HTML parsing into a [`Document`] snapshot
//! - Recipe link extraction
//! - Bounded-depth crawl coordination
//! - Recipe collection

mod collector;
mod coordinator;
mod fetcher;
mod links;
mod parser;
mod pool;
mod stats;
#[cfg(any(test, feature = "test-support"))]
mod static_fetcher;

pub use collector::RecipeCollector;
pub use coordinator::RecipeCrawler;
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageFetcher};
pub use links::{recipe_link_candidates, LinkExtractor, RecipeLink};
pub use parser::{Document, Paragraph};
pub use pool::FetchPool;
pub use stats::{CrawlStats, CrawlStatsSnapshot};
#[cfg(any(test, feature = "test-support"))]
pub use static_fetcher::StaticFetcher;

use crate::config::{Config, CrawlerConfig};
use crate::input::load_seed_urls;
use crate::output::write_recipes;
use crate::recipe::Recipe;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Result of a full crawl-and-collect run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Extracted recipes, sorted by URL
    pub recipes: Vec<Recipe>,

    /// Counters for the whole run
    pub stats: CrawlStatsSnapshot,

    /// Whether the run was cut short by cancellation or the deadline
    pub interrupted: bool,
}

/// Runs a complete crawl-and-collect operation
///
/// This is the main entry point. It will:
/// 1. Crawl every seed up to `config.max_depth` hops
/// 2. Fetch and extract every recipe page found
/// 3. Return the recipes sorted by URL
///
/// Crawl and collection share one fetch pool, so `max_concurrent_fetches`
/// caps the whole run. Cancelling `cancel`, or reaching the configured
/// deadline, stops the run and returns whatever was gathered so far.
pub async fn run_pipeline(
    fetcher: Arc<dyn PageFetcher>,
    config: &CrawlerConfig,
    seeds: &[String],
    cancel: CancellationToken,
) -> PipelineOutput {
    let pool = FetchPool::new(fetcher, config.max_concurrent_fetches as usize);

    // The deadline cancels a child token so the caller's token is untouched
    let run_token = cancel.child_token();
    let deadline = config.deadline().map(|deadline| {
        let token = run_token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            tracing::warn!("Deadline of {:?} reached, stopping", deadline);
            token.cancel();
        })
    });

    tracing::info!(
        "Crawling {} seeds to depth {} with up to {} concurrent fetches",
        seeds.len(),
        config.max_depth,
        config.max_concurrent_fetches
    );

    let crawler = RecipeCrawler::with_pool(pool.clone()).with_cancellation(run_token.clone());
    let urls = crawler.crawl_many(seeds, config.max_depth).await;

    let collector = RecipeCollector::with_pool(pool.clone()).with_cancellation(run_token.clone());
    let recipes = collector.collect(urls).await;

    if let Some(timer) = deadline {
        timer.abort();
    }

    let stats = pool.stats().snapshot();
    stats.log_summary();

    PipelineOutput {
        recipes,
        stats,
        interrupted: run_token.is_cancelled(),
    }
}

/// Runs the pipeline over HTTP from a seed file to a recipe file
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seeds_path` - File with one seed URL per line
/// * `output_path` - Destination of the recipe text file
/// * `cancel` - Stops the run early; partial results are still written
///
/// # Returns
///
/// * `Ok(PipelineOutput)` - Run finished (possibly interrupted) and output written
/// * `Err(RecipeCrawlerError)` - Seed file unreadable, client build failed, or output unwritable
pub async fn run_from_files(
    config: &Config,
    seeds_path: &Path,
    output_path: &Path,
    cancel: CancellationToken,
) -> crate::Result<PipelineOutput> {
    let seeds = load_seed_urls(seeds_path)?;
    tracing::info!("Loaded {} seed URLs", seeds.len());

    let fetcher = HttpFetcher::new(config)?;
    let output = run_pipeline(Arc::new(fetcher), &config.crawler, &seeds, cancel).await;

    write_recipes(output_path, &output.recipes)?;
    Ok(output)
}
