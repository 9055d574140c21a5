//! Crawler coordinator - bounded-depth recipe discovery
//!
//! The traversal is an iterative worklist of depth-tagged items rather than
//! native recursion:
//! - depth 0 items are the seeds
//! - expanding an item fetches its page (unless the page came along with the
//!   item) and collects its recipe links
//! - every recipe link joins the result set and, while `depth + 1 < max_depth`,
//!   is queued as a new item at `depth + 1`
//!
//! So `max_depth` counts hops: 0 yields nothing, 1 yields the seed's own
//! recipe links, and a seed is only reported if some page links to it.
//! Items run concurrently on a [`JoinSet`]; all fetches share the pool's cap.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::links::{LinkExtractor, RecipeLink};
use crate::crawler::parser::Document;
use crate::crawler::pool::FetchPool;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// A page waiting to be expanded
#[derive(Debug)]
struct WorkItem {
    url: String,
    depth: u32,
    document: Option<Document>,
}

/// Outcome of expanding one [`WorkItem`]
#[derive(Debug)]
struct Expansion {
    depth: u32,
    links: Vec<RecipeLink>,
}

/// Discovers recipe pages reachable from seed URLs
pub struct RecipeCrawler {
    pool: FetchPool,
    cancel: CancellationToken,
}

impl RecipeCrawler {
    /// Creates a crawler with its own fetch pool sized from `config`
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig) -> Self {
        Self::with_pool(FetchPool::new(
            fetcher,
            config.max_concurrent_fetches as usize,
        ))
    }

    /// Creates a crawler sharing an existing fetch pool
    pub fn with_pool(pool: FetchPool) -> Self {
        Self {
            pool,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops the crawl when `token` is cancelled
    ///
    /// In-flight fetches are aborted and the links found so far are returned.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn pool(&self) -> &FetchPool {
        &self.pool
    }

    /// Returns the recipe pages reachable from `seed` within `max_depth` hops
    ///
    /// # Example
    ///
    /// ```no_run
    /// use recipe_crawler::crawler::{HttpFetcher, RecipeCrawler};
    /// use recipe_crawler::Config;
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::default();
    /// let fetcher = Arc::new(HttpFetcher::new(&config)?);
    /// let crawler = RecipeCrawler::new(fetcher, &config.crawler);
    /// let recipes = crawler.crawl("https://example.com/", 1).await;
    /// println!("Found {} recipe pages", recipes.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seed: &str, max_depth: u32) -> HashSet<String> {
        self.crawl_many([seed], max_depth).await
    }

    /// Union of [`crawl`](Self::crawl) over every seed, deduplicated by URL
    ///
    /// Each call starts from empty traversal state.
    pub async fn crawl_many<I, S>(&self, seeds: I, max_depth: u32) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found = HashSet::new();
        if max_depth == 0 {
            return found;
        }

        let links = LinkExtractor::new(self.pool.clone());
        let mut expanded: HashMap<String, u32> = HashMap::new();
        let mut tasks = JoinSet::new();

        for seed in seeds {
            let item = WorkItem {
                url: seed.as_ref().to_string(),
                depth: 0,
                document: None,
            };
            schedule(&mut tasks, &mut expanded, &links, item);
        }

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    tracing::warn!(
                        "Crawl cancelled with {} pages pending, keeping {} recipe links",
                        tasks.len(),
                        found.len()
                    );
                    tasks.abort_all();
                    break;
                }

                joined = tasks.join_next() => {
                    let Some(joined) = joined else {
                        break;
                    };

                    let expansion = match joined {
                        Ok(expansion) => expansion,
                        Err(e) => {
                            tracing::warn!("Crawl task failed: {}", e);
                            continue;
                        }
                    };

                    let next_depth = expansion.depth + 1;
                    for link in expansion.links {
                        found.insert(link.url.clone());

                        if next_depth < max_depth {
                            let item = WorkItem {
                                url: link.url,
                                depth: next_depth,
                                document: link.document,
                            };
                            schedule(&mut tasks, &mut expanded, &links, item);
                        }
                    }
                }
            }
        }

        tracing::info!("Crawl finished: {} recipe pages found", found.len());
        found
    }
}

/// Queues `item` unless its URL was already queued at the same or a shallower
/// depth
fn schedule(
    tasks: &mut JoinSet<Expansion>,
    expanded: &mut HashMap<String, u32>,
    links: &LinkExtractor,
    item: WorkItem,
) {
    if let Some(&depth) = expanded.get(&item.url) {
        if depth <= item.depth {
            tracing::trace!("Already expanded {} at depth {}", item.url, depth);
            return;
        }
    }
    expanded.insert(item.url.clone(), item.depth);

    let links = links.clone();
    tasks.spawn(async move { expand(links, item).await });
}

async fn expand(links: LinkExtractor, item: WorkItem) -> Expansion {
    let WorkItem {
        url,
        depth,
        document,
    } = item;

    let document = match document {
        Some(document) => Some(document),
        None => links.pool().fetch(&url).await,
    };

    let Some(document) = document else {
        return Expansion {
            depth,
            links: Vec::new(),
        };
    };

    tracing::debug!("Expanding {} at depth {}", url, depth);
    Expansion {
        depth,
        links: links.extract_recipe_links(&document).await,
    }
}
