//! Picking a single recipe out of a collected set
//!
//! Randomness is always supplied by the caller so selection is reproducible
//! with a seeded generator.

use crate::recipe::Recipe;
use rand::Rng;

/// Ranks recipes for [`select_best`]
///
/// Returning `None` excludes the recipe from selection.
pub trait RecipeScorer {
    fn score(&self, recipe: &Recipe) -> Option<f64>;
}

impl<F> RecipeScorer for F
where
    F: Fn(&Recipe) -> Option<f64>,
{
    fn score(&self, recipe: &Recipe) -> Option<f64> {
        self(recipe)
    }
}

/// Picks a recipe uniformly at random
///
/// Returns `None` for an empty slice.
pub fn random_select<'a, R: Rng>(recipes: &'a [Recipe], rng: &mut R) -> Option<&'a Recipe> {
    if recipes.is_empty() {
        return None;
    }
    recipes.get(rng.gen_range(0..recipes.len()))
}

/// Picks the highest-scoring recipe; the earliest one wins ties
pub fn select_best<'a, S: RecipeScorer + ?Sized>(
    recipes: &'a [Recipe],
    scorer: &S,
) -> Option<&'a Recipe> {
    let mut best: Option<(&Recipe, f64)> = None;

    for recipe in recipes {
        let Some(score) = scorer.score(recipe) else {
            continue;
        };
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((recipe, score)),
        }
    }

    best.map(|(recipe, _)| recipe)
}
