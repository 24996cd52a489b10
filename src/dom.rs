//! Minimal read-only capabilities over the parsed document tree.
//!
//! Everything the scoring and materialization passes need from `scraper`'s
//! tree lives here: tag names, attributes, rendered text and ancestor walks.
//! Nothing in this module ever mutates the document, so concurrent reads
//! are safe.

use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node, Selector};

use crate::text::collapse_whitespace;

/// Tag name of an element node, or `None` for text/comment nodes.
pub fn tag_name<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.value().as_element().map(|el| el.name())
}

/// Attribute value of an element node.
pub fn attr<'a>(node: NodeRef<'a, Node>, name: &str) -> Option<&'a str> {
    node.value().as_element().and_then(|el| el.attr(name))
}

/// Visible text of a node's subtree, whitespace-collapsed. Script and
/// style subtrees contribute nothing even though the parser keeps their
/// contents as text nodes.
pub fn rendered_text(node: NodeRef<'_, Node>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    // Explicit stack instead of recursion: third-party HTML nests deep
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        match current.value() {
            Node::Text(text) => parts.push(text),
            Node::Element(el) if matches!(el.name(), "script" | "style") => continue,
            _ => {}
        }
        let children: Vec<_> = current.children().collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    collapse_whitespace(&parts.join(" "))
}

/// True if `ancestor` is an ancestor of `descendant` or the same node.
/// Walks the parent chain iteratively.
pub fn is_ancestor_or_equal(document: &Html, ancestor: NodeId, descendant: NodeId) -> bool {
    let Some(node) = document.tree.get(descendant) else {
        return false;
    };
    if node.id() == ancestor {
        return true;
    }
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id() == ancestor {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Content of an Open Graph meta tag (`og:title`, `og:image`, ...),
/// whether declared via `property` or `name`.
pub fn open_graph(document: &Html, og_property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(
        "meta[property='{og_property}'], meta[name='{og_property}']"
    ))
    .unwrap();
    document
        .select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|content| !content.is_empty())
}

/// Text of the document's `<title>` element.
pub fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_text_skips_scripts() {
        let document = Html::parse_document(
            "<html><body><div>Hello <b>world</b><script>var x = 1;</script></div></body></html>",
        );
        let text = rendered_text(document.tree.root());
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_open_graph_property_and_name() {
        let document = Html::parse_document(
            r#"<html><head>
                <meta property="og:title" content="Pasta" />
                <meta name="og:description" content="A classic" />
            </head><body></body></html>"#,
        );
        assert_eq!(open_graph(&document, "og:title").as_deref(), Some("Pasta"));
        assert_eq!(
            open_graph(&document, "og:description").as_deref(),
            Some("A classic")
        );
        assert_eq!(open_graph(&document, "og:image"), None);
    }

    #[test]
    fn test_document_title_fallback_source() {
        let document =
            Html::parse_document("<html><head><title>My Recipe</title></head><body></body></html>");
        assert_eq!(document_title(&document).as_deref(), Some("My Recipe"));
    }

    #[test]
    fn test_ancestor_of_or_equal() {
        let document = Html::parse_document("<html><body><ul><li>one</li></ul></body></html>");
        let ul = document
            .select(&Selector::parse("ul").unwrap())
            .next()
            .unwrap();
        let li = document
            .select(&Selector::parse("li").unwrap())
            .next()
            .unwrap();
        assert!(is_ancestor_or_equal(&document, ul.id(), li.id()));
        assert!(is_ancestor_or_equal(&document, li.id(), li.id()));
        assert!(!is_ancestor_or_equal(&document, li.id(), ul.id()));
    }
}
