//! Candidate selection and lowest-common-ancestor resolution.
//!
//! Once scoring has produced a pile of likely nodes, two top candidates
//! with distinct content pin down the region of the page holding the
//! recipe; their lowest common ancestor is the list or table wrapping it.

use ego_tree::NodeId;
use scraper::Html;

use crate::dom;
use crate::error::ExtractError;
use crate::model::{Category, ScoredNode};

/// Tags that mean "one entry of a list", not "the list". The resolved
/// ancestor climbs out of these so materialization sees every sibling.
const LIST_ITEM_TAGS: &[&str] = &["li", "tr", "td", "p", "span"];

/// Pick the two best-scoring candidates with distinct rendered content,
/// in document order.
///
/// Nodes with identical text are collapsed first so that a duplicated
/// fragment (print view, mobile view) cannot supply both picks.
pub fn select_two_distinct(
    document: &Html,
    scored: &[ScoredNode],
    category: Category,
) -> Result<(NodeId, NodeId), ExtractError> {
    let mut unique: Vec<&ScoredNode> = Vec::new();
    let mut seen_texts: Vec<String> = Vec::new();
    for candidate in scored {
        let Some(node) = document.tree.get(candidate.id) else {
            continue;
        };
        let text = dom::rendered_text(node);
        if !seen_texts.contains(&text) {
            seen_texts.push(text);
            unique.push(candidate);
        }
    }

    if unique.len() < 2 {
        return Err(ExtractError::InsufficientCandidates(category.as_str()));
    }

    // Two largest distinct score values present among the survivors
    let mut values: Vec<f64> = unique.iter().map(|c| c.score).collect();
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    values.dedup();
    let cutoff = if values.len() >= 2 { values[1] } else { values[0] };

    let mut top = unique.iter().filter(|c| c.score >= cutoff);
    match (top.next(), top.next()) {
        (Some(first), Some(second)) => Ok((first.id, second.id)),
        _ => Err(ExtractError::InsufficientCandidates(category.as_str())),
    }
}

/// Lowest common ancestor of two nodes: the first node on `a`'s ancestor
/// chain (including `a` itself) that is an ancestor-of-or-equal-to `b`.
/// Symmetric in its arguments.
pub fn lowest_common_ancestor(
    document: &Html,
    a: NodeId,
    b: NodeId,
) -> Result<NodeId, ExtractError> {
    let mut current = document.tree.get(a);
    while let Some(node) = current {
        if dom::is_ancestor_or_equal(document, node.id(), b) {
            return Ok(node.id());
        }
        current = node.parent();
    }
    Err(ExtractError::NoCommonAncestor)
}

/// Climb out of list-item style tags so the resolved ancestor is the
/// enclosing list or table rather than a single row of it.
pub fn escape_list_elements(document: &Html, id: NodeId) -> NodeId {
    let mut current = id;
    while let Some(node) = document.tree.get(current) {
        let is_item = dom::tag_name(node).is_some_and(|tag| LIST_ITEM_TAGS.contains(&tag));
        match node.parent() {
            Some(parent) if is_item => current = parent.id(),
            _ => break,
        }
    }
    current
}

/// Resolve two candidates to the subtree worth materializing.
pub fn resolve_ancestor(document: &Html, a: NodeId, b: NodeId) -> Result<NodeId, ExtractError> {
    let lca = lowest_common_ancestor(document, a, b)?;
    Ok(escape_list_elements(document, lca))
}
