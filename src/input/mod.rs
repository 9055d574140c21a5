//! Seed URL input
//!
//! Seeds come from a plain text file with one URL per line.

mod seeds;

pub use seeds::{load_seed_urls, parse_seed_urls};
