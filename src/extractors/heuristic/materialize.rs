//! Turns a resolved ancestor subtree into ordered ingredient or
//! instruction lists.

use ego_tree::NodeId;
use scraper::Html;

use crate::dom;

/// Ingredient materialization: the rendered text of each direct child of
/// the resolved ancestor, empties dropped. One child per ingredient line
/// is exactly what a ul/table ancestor gives.
pub fn child_list(document: &Html, ancestor: NodeId) -> Vec<String> {
    let Some(node) = document.tree.get(ancestor) else {
        return Vec::new();
    };
    node.children()
        .map(dom::rendered_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Instruction materialization: a depth-first walk over the whole
/// subtree in document order. A fragment is kept when it is non-empty,
/// longer than two words, not yet collected, and not a partial match of
/// any already-extracted ingredient (in either direction).
pub fn full_traversal(
    document: &Html,
    ancestor: NodeId,
    ingredients: &[String],
) -> Vec<String> {
    let Some(root) = document.tree.get(ancestor) else {
        return Vec::new();
    };

    let mut fragments: Vec<String> = Vec::new();
    for node in root.descendants() {
        let text = dom::rendered_text(node);
        if text.is_empty()
            || text.split_whitespace().count() <= 2
            || fragments.contains(&text)
            || is_part_of_ingredients(&text, ingredients)
        {
            continue;
        }
        fragments.push(text);
    }
    fragments
}

/// True when an instruction fragment and an ingredient line contain one
/// another either way around.
fn is_part_of_ingredients(instruction: &str, ingredients: &[String]) -> bool {
    ingredients
        .iter()
        .any(|ingredient| instruction.contains(ingredient.as_str()) || ingredient.contains(instruction))
}

/// Remove any residual overlap between the two independently-built
/// lists. Both removals are computed against the original lists.
pub fn cross_filter(
    ingredients: Vec<String>,
    instructions: Vec<String>,
) -> (Vec<String>, Vec<String>) {
    let filtered_ingredients: Vec<String> = ingredients
        .iter()
        .filter(|item| !instructions.contains(item))
        .cloned()
        .collect();
    let filtered_instructions: Vec<String> = instructions
        .iter()
        .filter(|item| !ingredients.contains(item))
        .cloned()
        .collect();
    (filtered_ingredients, filtered_instructions)
}
