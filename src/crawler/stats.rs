//! Crawl statistics
//!
//! Counters are shared by every task of a run and updated with relaxed
//! atomics; a [`CrawlStatsSnapshot`] is taken once the run is over.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for a crawl/collect run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    pages_classified: AtomicU64,
    recipe_pages: AtomicU64,
    recipes_extracted: AtomicU64,
}

/// Point-in-time copy of [`CrawlStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatsSnapshot {
    /// Fetches that produced a document
    pub pages_fetched: u64,

    /// Fetches that failed and were skipped
    pub fetch_failures: u64,

    /// Candidate links whose pages were run through the classifier
    pub pages_classified: u64,

    /// Candidate pages that classified as recipes
    pub recipe_pages: u64,

    /// Recipe records produced by the collector
    pub recipes_extracted: u64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetch(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_classification(&self, is_recipe: bool) {
        self.pages_classified.fetch_add(1, Ordering::Relaxed);
        if is_recipe {
            self.recipe_pages.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_extraction(&self) {
        self.recipes_extracted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlStatsSnapshot {
        CrawlStatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            pages_classified: self.pages_classified.load(Ordering::Relaxed),
            recipe_pages: self.recipe_pages.load(Ordering::Relaxed),
            recipes_extracted: self.recipes_extracted.load(Ordering::Relaxed),
        }
    }
}

impl CrawlStatsSnapshot {
    /// Total number of network requests attempted
    pub fn total_requests(&self) -> u64 {
        self.pages_fetched + self.fetch_failures
    }

    /// Share of requests that failed, as a percentage
    pub fn failure_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            (self.fetch_failures as f64 / total as f64) * 100.0
        }
    }

    /// Logs the snapshot at info level
    pub fn log_summary(&self) {
        tracing::info!(
            "Requests: {} ({} failed, {:.2}%), classified: {}, recipe pages: {}, recipes: {}",
            self.total_requests(),
            self.fetch_failures,
            self.failure_rate(),
            self.pages_classified,
            self.recipe_pages,
            self.recipes_extracted
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = CrawlStats::new();
        stats.record_fetch();
        stats.record_fetch();
        stats.record_failure();
        stats.record_classification(true);
        stats.record_classification(false);
        stats.record_extraction();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.pages_fetched, 2);
        assert_eq!(snapshot.fetch_failures, 1);
        assert_eq!(snapshot.pages_classified, 2);
        assert_eq!(snapshot.recipe_pages, 1);
        assert_eq!(snapshot.recipes_extracted, 1);
        assert_eq!(snapshot.total_requests(), 3);
    }

    #[test]
    fn test_failure_rate() {
        assert_eq!(CrawlStatsSnapshot::default().failure_rate(), 0.0);

        let snapshot = CrawlStatsSnapshot {
            pages_fetched: 3,
            fetch_failures: 1,
            ..Default::default()
        };
        assert!((snapshot.failure_rate() - 25.0).abs() < f64::EPSILON);
    }
}
