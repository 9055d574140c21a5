use serde::Serialize;
use std::fmt;

/// A recipe extracted from a single web page
///
/// `url` is always set. The other fields fall back to empty when the page
/// does not carry the marker the extractor looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// The page the recipe was extracted from
    pub url: String,

    /// Recipe name (the page title)
    pub name: String,

    /// Total time to prepare, as written on the page
    pub time: String,

    /// Yield, as written on the page
    #[serde(rename = "yield")]
    pub yields: String,

    /// Ingredient lines in page order, duplicates kept
    pub ingredients: Vec<String>,
}

impl Recipe {
    /// Builds a recipe record; `url` must not be empty
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        time: impl Into<String>,
        yields: impl Into<String>,
        ingredients: Vec<String>,
    ) -> Self {
        let url = url.into();
        debug_assert!(!url.is_empty(), "recipe url must not be empty");

        Self {
            url,
            name: name.into(),
            time: time.into(),
            yields: yields.into(),
            ingredients,
        }
    }

    /// Returns true if any ingredient line mentions `target`
    ///
    /// Quantities are not considered: `"2 cups flour"` contains `"flour"`.
    pub fn contains_ingredient(&self, target: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ingredient| ingredient.contains(target))
    }
}

/// Line-oriented layout: url, name, time, yield, then one ingredient per line.
impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}\n{}", self.url, self.name, self.time, self.yields)?;
        for ingredient in &self.ingredients {
            write!(f, "\n{}", ingredient)?;
        }
        Ok(())
    }
}
