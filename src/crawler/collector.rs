//! Recipe collection
//!
//! Turns a set of recipe page URLs into [`Recipe`] records: one fetch per URL,
//! pages that fail to fetch are skipped, every fetched page is extracted.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pool::FetchPool;
use crate::recipe::{extract_recipe, Recipe};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Fetches recipe pages and extracts their records
pub struct RecipeCollector {
    pool: FetchPool,
    cancel: CancellationToken,
}

impl RecipeCollector {
    /// Creates a collector with its own fetch pool sized from `config`
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig) -> Self {
        Self::with_pool(FetchPool::new(
            fetcher,
            config.max_concurrent_fetches as usize,
        ))
    }

    /// Creates a collector sharing an existing fetch pool
    pub fn with_pool(pool: FetchPool) -> Self {
        Self {
            pool,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops collecting when `token` is cancelled, keeping what was extracted
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Extracts a recipe from every URL that can be fetched
    ///
    /// The output is sorted by URL so runs are reproducible.
    pub async fn collect<I, S>(&self, urls: I) -> Vec<Recipe>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tasks = JoinSet::new();

        for url in urls {
            let url: String = url.into();
            let pool = self.pool.clone();
            tasks.spawn(async move {
                let document = pool.fetch(&url).await?;
                pool.stats().record_extraction();
                Some(extract_recipe(&document, &url))
            });
        }

        let mut recipes = Vec::new();
        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    tracing::warn!(
                        "Collection cancelled with {} pages pending, keeping {} recipes",
                        tasks.len(),
                        recipes.len()
                    );
                    tasks.abort_all();
                    break;
                }

                joined = tasks.join_next() => match joined {
                    Some(Ok(Some(recipe))) => recipes.push(recipe),
                    Some(Ok(None)) => {}
                    Some(Err(e)) => tracing::warn!("Collection task failed: {}", e),
                    None => break,
                },
            }
        }

        recipes.sort_by(|a, b| a.url.cmp(&b.url));
        tracing::info!("Collected {} recipes", recipes.len());
        recipes
    }
}
