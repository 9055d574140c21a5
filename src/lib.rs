//! Recipe-Crawler: a bounded recipe discovery crawler
//!
//! This crate follows hyperlinks from seed pages up to a fixed number of hops,
//! classifies each visited page as a recipe or not using textual heuristics,
//! and extracts a normalized recipe record from every recipe page it finds.

pub mod config;
pub mod crawler;
pub mod input;
pub mod output;
pub mod recipe;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Recipe-Crawler operations
///
/// Page-level failures never surface here: they are absorbed by the crawler
/// and the collector. Only run-level problems (bad config, unreadable seed
/// file, unwritable output) are reported through this type.
#[derive(Debug, Error)]
pub enum RecipeCrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Seed file errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A single page could not be fetched or parsed
///
/// Always recoverable: callers drop the page and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::HttpStatus { url, .. }
            | Self::ContentMismatch { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Result type alias for Recipe-Crawler operations
pub type Result<T> = std::result::Result<T, RecipeCrawlerError>;

/// Result type alias for single-page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Document, HttpFetcher, PageFetcher, RecipeCollector, RecipeCrawler};
pub use recipe::Recipe;
