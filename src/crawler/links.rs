//! Recipe link extraction
//!
//! A link on a page is a recipe link when its URL contains `"recipe"` and the
//! page it points to classifies as a recipe. Checking the second condition
//! costs one fetch per candidate; candidates are checked concurrently through
//! the shared [`FetchPool`].

use crate::crawler::parser::Document;
use crate::crawler::pool::FetchPool;
use crate::recipe::is_recipe_page;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;

/// Substring a link URL must contain to be considered (case-sensitive)
const RECIPE_MARKER: &str = "recipe";

/// A link whose target page classified as a recipe
#[derive(Debug, Clone)]
pub struct RecipeLink {
    /// Absolute URL of the recipe page
    pub url: String,

    /// The page fetched during classification, if this call fetched it
    ///
    /// `None` when the verdict came from the per-run cache.
    pub document: Option<Document>,
}

/// Returns the page's links whose URL contains "recipe", deduplicated, in
/// document order
pub fn recipe_link_candidates(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();

    doc.links
        .iter()
        .filter(|link| link.contains(RECIPE_MARKER))
        .filter(|link| seen.insert(*link))
        .cloned()
        .collect()
}

/// Finds recipe links on a page
///
/// Clones share a verdict cache, so a URL classified once during a run is not
/// fetched again just to be classified.
#[derive(Clone)]
pub struct LinkExtractor {
    pool: FetchPool,
    verdicts: Arc<Mutex<HashMap<String, bool>>>,
}

impl LinkExtractor {
    pub fn new(pool: FetchPool) -> Self {
        Self {
            pool,
            verdicts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn pool(&self) -> &FetchPool {
        &self.pool
    }

    /// Returns the set of recipe link URLs found on `doc`
    pub async fn extract_links(&self, doc: &Document) -> HashSet<String> {
        self.extract_recipe_links(doc)
            .await
            .into_iter()
            .map(|link| link.url)
            .collect()
    }

    /// Returns the recipe links found on `doc` along with any page fetched
    /// while classifying them
    ///
    /// A candidate whose fetch fails is simply left out.
    pub async fn extract_recipe_links(&self, doc: &Document) -> Vec<RecipeLink> {
        let mut checks = JoinSet::new();

        for candidate in recipe_link_candidates(doc) {
            let extractor = self.clone();
            checks.spawn(async move { extractor.classify(candidate).await });
        }

        let mut links = Vec::new();
        while let Some(joined) = checks.join_next().await {
            match joined {
                Ok(Some(link)) => links.push(link),
                Ok(None) => {}
                Err(e) => tracing::warn!("Link classification task failed: {}", e),
            }
        }
        links
    }

    async fn classify(&self, url: String) -> Option<RecipeLink> {
        if let Some(is_recipe) = self.cached_verdict(&url) {
            tracing::trace!("Cached verdict for {}: {}", url, is_recipe);
            return is_recipe.then_some(RecipeLink {
                url,
                document: None,
            });
        }

        let document = self.pool.fetch(&url).await?;
        let is_recipe = is_recipe_page(&document);
        self.pool.stats().record_classification(is_recipe);
        self.store_verdict(&url, is_recipe);
        tracing::debug!("Classified {} as recipe: {}", url, is_recipe);

        is_recipe.then_some(RecipeLink {
            url,
            document: Some(document),
        })
    }

    fn cached_verdict(&self, url: &str) -> Option<bool> {
        self.verdicts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
    }

    fn store_verdict(&self, url: &str, is_recipe: bool) {
        self.verdicts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), is_recipe);
    }
}
