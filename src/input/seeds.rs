use crate::InputError;
use std::path::Path;

/// Loads seed URLs from a file, one per line
///
/// Lines are trimmed and blank lines are skipped. A missing or unreadable
/// file is an [`InputError`].
///
/// # Example
///
/// ```no_run
/// use recipe_crawler::input::load_seed_urls;
/// use std::path::Path;
///
/// let seeds = load_seed_urls(Path::new("seeds.txt")).unwrap();
/// println!("Loaded {} seeds", seeds.len());
/// ```
pub fn load_seed_urls(path: &Path) -> Result<Vec<String>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let seeds = parse_seed_urls(&content);
    tracing::debug!("Loaded {} seed URLs from {}", seeds.len(), path.display());
    Ok(seeds)
}

/// Splits seed file content into trimmed, non-empty lines
pub fn parse_seed_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
