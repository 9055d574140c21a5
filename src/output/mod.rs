//! Output module for writing collected recipes
//!
//! Recipes are written in a line-oriented text layout that other tooling
//! parses, so the layout is fixed:
//!
//! ```text
//! url
//! name
//! time
//! yield
//! ingredient 1
//! ingredient 2
//!
//! next url
//! ...
//! ```

mod text;

pub use text::{format_recipes, write_recipes, write_recipes_to};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
