use log::debug;
use scraper::Selector;

use crate::dom;
use crate::error::ExtractError;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::RecipeFields;
use crate::text::{collapse_whitespace, push_deduplicated};

/// Extracts a recipe from `itemprop`-annotated elements.
///
/// Substring matching on the attribute value covers both the singular and
/// plural spellings (`recipeIngredient` / `recipeIngredients`) that sites
/// use interchangeably.
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn itemprop_texts(&self, context: &ParsingContext<'_>, fragment: &str) -> Vec<String> {
        let selector = Selector::parse(&format!("[itemprop*='{fragment}']")).unwrap();
        let mut texts = Vec::new();
        for element in context.document.select(&selector) {
            let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            push_deduplicated(&mut texts, text);
        }
        texts
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext<'_>) -> Result<RecipeFields, ExtractError> {
        debug!("Attempting microdata extraction");

        let ingredients = self.itemprop_texts(context, "recipeIngredient");
        let instructions = self.itemprop_texts(context, "recipeInstruction");

        if ingredients.is_empty() && instructions.is_empty() {
            return Err(ExtractError::NotFound(
                "no recipeIngredient or recipeInstruction itemprops".to_string(),
            ));
        }

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

    fn parse(html: &str) -> Result<RecipeFields, ExtractError> {
        let document = Html::parse_document(html);
        let context = ParsingContext {
            url: "https://example.com/recipe",
            document: &document,
        };
        MicroDataExtractor.parse(&context)
    }

    #[test]
    fn test_extracts_itemprop_lists() {
        let fields = parse(
            r#"<html>
            <head>
                <meta property="og:title" content="Banana Bread" />
                <meta property="og:description" content="Moist and sweet" />
            </head>
            <body>
                <ul>
                    <li itemprop="recipeIngredient">3 ripe bananas</li>
                    <li itemprop="recipeIngredient">200 g flour</li>
                    <li itemprop="recipeIngredient">3 ripe bananas</li>
                </ul>
                <ol>
                    <li itemprop="recipeInstructions">Mash the bananas.</li>
                    <li itemprop="recipeInstructions">Fold in the flour.</li>
                </ol>
            </body>
            </html>"#,
        )
        .unwrap();

        assert_eq!(fields.title, "Banana Bread");
        assert_eq!(fields.description, "Moist and sweet");
        assert_eq!(fields.ingredients, vec!["3 ripe bananas", "200 g flour"]);
        assert_eq!(
            fields.instructions,
            vec!["Mash the bananas.", "Fold in the flour."]
        );
        assert_eq!(fields.cook_time, "PT0M");
        assert_eq!(fields.yield_text, "4");
    }

    #[test]
    fn test_title_falls_back_to_title_element() {
        let fields = parse(
            r#"<html>
            <head><title>Grandma's Soup</title></head>
            <body><span itemprop="recipeIngredient">1 onion</span></body>
            </html>"#,
        )
        .unwrap();
        assert_eq!(fields.title, "Grandma's Soup");
    }

    #[test]
    fn test_fails_when_no_itemprops_present() {
        let result = parse("<html><body><p>Just an article.</p></body></html>");
        assert!(matches!(result, Err(ExtractError::NotFound(_))));
    }
}
