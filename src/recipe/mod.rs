//! Recipe records and the page heuristics that produce them
//!
//! - Classifying a page as a recipe from its visible text
//! - Extracting name, time, yield and ingredients from a recipe page
//! - Picking a recipe out of a collection

mod classifier;
mod extractor;
mod model;
pub mod selection;

pub use classifier::is_recipe_page;
pub use extractor::extract_recipe;
pub use model::Recipe;
pub use selection::{random_select, select_best, RecipeScorer};
