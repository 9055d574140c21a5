use crate::crawler::Document;

/// Returns true if the page text looks like a recipe
///
/// The lower-cased page text must mention "ingredients" and "recipe", and
/// either "instructions" or "directions". This is a best-effort signal:
/// false positives and false negatives are expected.
pub fn is_recipe_page(doc: &Document) -> bool {
    let text = doc.text.to_lowercase();

    text.contains("ingredients")
        && text.contains("recipe")
        && (text.contains("instructions") || text.contains("directions"))
}
