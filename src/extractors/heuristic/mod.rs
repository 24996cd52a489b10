//! Heuristic DOM-scoring extraction, the tier of last resort before the
//! minimal fallback.
//!
//! The document is scanned once per category; every element is scored,
//! the two best distinct candidates are resolved to their lowest common
//! ancestor, and that subtree is materialized into a list.

pub mod candidates;
pub mod materialize;
pub mod scorer;

use log::debug;

use crate::config::ExtractConfig;
use crate::dom;
use crate::error::ExtractError;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::{Category, RecipeFields, ScoredNode};
use scorer::NodeScorer;

pub struct HeuristicExtractor {
    scorer: NodeScorer,
}

impl HeuristicExtractor {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            scorer: NodeScorer::new(config),
        }
    }

    /// Score every element in the document for one category.
    fn scan(&self, context: &ParsingContext<'_>, category: Category) -> Vec<ScoredNode> {
        let mut scored = Vec::new();
        for node in context.document.tree.root().descendants() {
            if node.value().as_element().is_none() {
                continue;
            }
            let text = dom::rendered_text(node);
            if text.is_empty() {
                continue;
            }
            let (is_candidate, score) = match category {
                Category::Ingredient => self.scorer.score_ingredient(node, &text),
                Category::Instruction => self.scorer.score_instruction(node, &text),
            };
            if is_candidate {
                scored.push(ScoredNode {
                    id: node.id(),
                    score,
                    category,
                });
            }
        }
        debug!(
            "Heuristic scan found {} {} candidates",
            scored.len(),
            category.as_str()
        );
        scored
    }

    /// Locate the subtree most likely to hold one category's content.
    fn locate(
        &self,
        context: &ParsingContext<'_>,
        category: Category,
    ) -> Result<ego_tree::NodeId, ExtractError> {
        let scored = self.scan(context, category);
        let (a, b) = candidates::select_two_distinct(context.document, &scored, category)?;
        candidates::resolve_ancestor(context.document, a, b)
    }
}

impl Extractor for HeuristicExtractor {
    fn parse(&self, context: &ParsingContext<'_>) -> Result<RecipeFields, ExtractError> {
        let ingredient_ancestor = self.locate(context, Category::Ingredient)?;
        let ingredients = materialize::child_list(context.document, ingredient_ancestor);

        let instruction_ancestor = self.locate(context, Category::Instruction)?;
        let instructions =
            materialize::full_traversal(context.document, instruction_ancestor, &ingredients);

        let (ingredients, instructions) = materialize::cross_filter(ingredients, instructions);

        let title = dom::open_graph(context.document, "og:title")
            .or_else(|| dom::document_title(context.document))
            .unwrap_or_default();
        let description = dom::open_graph(context.document, "og:description").unwrap_or_default();

        Ok(RecipeFields {
            title,
            description,
            ingredients,
            instructions,
            cook_time: "PT0M".to_string(),
            yield_text: "4".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extractor() -> HeuristicExtractor {
        HeuristicExtractor::new(&ExtractConfig::default())
    }

    #[test]
    fn test_recovers_lists_from_unannotated_markup() {
        let html = r#"<html>
        <head><title>Weeknight Pasta</title></head>
        <body>
            <h1>Weeknight Pasta</h1>
            <ul>
                <li>200 g pasta</li>
                <li>1 dl cream</li>
                <li>2 tbsp butter</li>
            </ul>
            <div>
                <p>Boil the pasta in salted water until just al dente. Drain it and
                   reserve a cup of the starchy cooking water for the sauce.</p>
                <p>Melt the butter over low heat, stir in the cream and simmer for a
                   few minutes. Toss with the drained pasta and serve right away.</p>
            </div>
        </body>
        </html>"#;
        let document = Html::parse_document(html);
        let context = ParsingContext {
            url: "https://example.com/pasta",
            document: &document,
        };

        let fields = extractor().parse(&context).unwrap();
        assert_eq!(
            fields.ingredients,
            vec!["200 g pasta", "1 dl cream", "2 tbsp butter"]
        );
        assert!(!fields.instructions.is_empty());
        assert_eq!(fields.title, "Weeknight Pasta");
    }

    #[test]
    fn test_fails_closed_without_candidates() {
        let html = "<html><body><p>An unrelated news article about local politics, \
                    which mentions neither quantities nor cooking of any kind.</p></body></html>";
        let document = Html::parse_document(html);
        let context = ParsingContext {
            url: "https://example.com/news",
            document: &document,
        };

        let result = extractor().parse(&context);
        assert!(matches!(
            result,
            Err(ExtractError::InsufficientCandidates(_))
        ));
    }
}
