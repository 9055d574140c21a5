//! Configuration module for Recipe-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a default, so running without a config file is supported.
//!
//! # Example
//!
//! ```no_run
//! use recipe_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will follow links {} hops deep", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, UserAgentConfig};

pub use parser::{load_config, parse_config};
