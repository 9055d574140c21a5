//! Bounded fetch pool
//!
//! Every network request of a run goes through one [`FetchPool`]. A global
//! semaphore caps the number of requests in flight, the same way across the
//! crawler, the link extractor and the collector.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::Document;
use crate::crawler::stats::CrawlStats;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared, concurrency-capped access to a [`PageFetcher`]
#[derive(Clone)]
pub struct FetchPool {
    fetcher: Arc<dyn PageFetcher>,
    limiter: Arc<Semaphore>,
    stats: Arc<CrawlStats>,
}

impl FetchPool {
    /// Creates a pool allowing at most `max_in_flight` concurrent fetches
    ///
    /// A limit of zero is raised to one.
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_in_flight: usize) -> Self {
        Self {
            fetcher,
            limiter: Arc::new(Semaphore::new(max_in_flight.max(1))),
            stats: Arc::new(CrawlStats::new()),
        }
    }

    pub fn stats(&self) -> &Arc<CrawlStats> {
        &self.stats
    }

    /// Fetches `url`, returning `None` on failure
    ///
    /// Failures are logged and counted here; they never reach the caller as
    /// errors.
    pub async fn fetch(&self, url: &str) -> Option<Document> {
        let _permit = self.limiter.acquire().await.ok()?;

        match self.fetcher.fetch(url).await {
            Ok(doc) => {
                self.stats.record_fetch();
                Some(doc)
            }
            Err(e) => {
                self.stats.record_failure();
                tracing::debug!("Skipping {}: {}", url, e);
                None
            }
        }
    }
}
