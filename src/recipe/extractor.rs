use crate::crawler::Document;
use crate::recipe::Recipe;

/// Template artifact some sites render as an ingredient paragraph
const DESELECT_ALL: &str = "Deselect All";

/// Builds a [`Recipe`] from a page already classified as a recipe
///
/// Never fails: a field whose marker is missing from the page is left empty.
///
/// - `name`: the page title
/// - `time`: first `<li>` mentioning "Total"
/// - `yields`: first `<li>` mentioning "Yield"
/// - `ingredients`: every `<p>` whose class contains "ingredient", in page order
pub fn extract_recipe(doc: &Document, url: &str) -> Recipe {
    Recipe::new(
        url,
        doc.title.clone(),
        first_list_item_containing(doc, "Total").unwrap_or_default(),
        first_list_item_containing(doc, "Yield").unwrap_or_default(),
        ingredient_list(doc),
    )
}

/// First list item whose text contains `marker`, ignoring case
fn first_list_item_containing(doc: &Document, marker: &str) -> Option<String> {
    let marker = marker.to_lowercase();

    doc.list_items
        .iter()
        .find(|item| item.to_lowercase().contains(&marker))
        .cloned()
}

fn ingredient_list(doc: &Document) -> Vec<String> {
    doc.paragraphs
        .iter()
        .filter(|p| p.class.to_lowercase().contains("ingredient"))
        .filter(|p| p.text != DESELECT_ALL)
        .map(|p| p.text.clone())
        .collect()
}
