use log::debug;
use scraper::Selector;
use serde_json::Value;

use crate::dom;
use crate::duration;
use crate::error::ExtractError;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::RecipeFields;
use crate::text::{extract_digits, push_deduplicated, strip_tags};

/// Extracts a recipe from embedded JSON-LD script blocks.
///
/// Sites disagree wildly on the exact shape of `recipeInstructions`; all
/// the shapes observed in the wild are handled below, and anything else
/// degrades to a single sentinel entry instead of failing the tier.
pub struct JsonLdExtractor;

/// Placed in the instruction list when a block has an unrecognized
/// instruction shape. The caller still gets a renderable record.
pub const UNKNOWN_SHAPE_SENTINEL: &str = "Could not read the instructions for this recipe.";

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext<'_>) -> Result<RecipeFields, ExtractError> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        let mut saw_malformed = false;
        for script in context.document.select(&selector) {
            let json: Value = match serde_json::from_str(&script.inner_html()) {
                Ok(json) => json,
                Err(err) => {
                    debug!("Skipping malformed JSON-LD block: {err}");
                    saw_malformed = true;
                    continue;
                }
            };

            if let Some(recipe) = find_recipe(&json) {
                debug!("Found Recipe JSON-LD block");
                return Ok(fields_from(recipe, context));
            }
        }

        if saw_malformed {
            Err(ExtractError::Parse(
                "malformed JSON-LD and no other Recipe block".to_string(),
            ))
        } else {
            Err(ExtractError::NotFound(
                "no Recipe-typed JSON-LD block".to_string(),
            ))
        }
    }
}

/// Locate the first Recipe-typed entry: the top-level object itself, an
/// element of a top-level array, or an element of an `@graph` array.
fn find_recipe(json: &Value) -> Option<&Value> {
    match json {
        Value::Object(_) => {
            if type_contains_recipe(json) {
                Some(json)
            } else {
                json.get("@graph")
                    .and_then(Value::as_array)
                    .and_then(|graph| graph.iter().find(|item| type_contains_recipe(item)))
            }
        }
        Value::Array(items) => items.iter().find(|item| type_contains_recipe(item)),
        _ => None,
    }
}

/// `@type` may be a string or an array of strings; stringifying covers both.
fn type_contains_recipe(value: &Value) -> bool {
    value
        .get("@type")
        .map(|t| t.to_string().contains("Recipe"))
        .unwrap_or(false)
}

fn fields_from(recipe: &Value, context: &ParsingContext<'_>) -> RecipeFields {
    let title = string_field(recipe, "name")
        .or_else(|| dom::open_graph(context.document, "og:title"))
        .or_else(|| dom::document_title(context.document))
        .unwrap_or_default();

    let description = string_field(recipe, "description")
        .or_else(|| dom::open_graph(context.document, "og:description"))
        .unwrap_or_default();

    let mut ingredients = Vec::new();
    if let Some(items) = recipe.get("recipeIngredient").and_then(Value::as_array) {
        for item in items {
            if let Some(text) = item.as_str() {
                push_deduplicated(&mut ingredients, strip_tags(text));
            }
        }
    }

    let instructions = instructions_from(recipe.get("recipeInstructions"));

    let cook_time = recipe
        .get("totalTime")
        .and_then(Value::as_str)
        .filter(|s| duration::is_valid_duration(s))
        .unwrap_or("PT0M")
        .to_string();

    let yield_text = recipe
        .get("recipeYield")
        .map(|y| extract_digits(&y.to_string()))
        .filter(|digits| !digits.is_empty())
        .unwrap_or_else(|| "4".to_string());

    RecipeFields {
        title,
        description,
        ingredients,
        instructions,
        cook_time,
        yield_text,
    }
}

fn string_field(recipe: &Value, key: &str) -> Option<String> {
    recipe
        .get(key)
        .and_then(Value::as_str)
        .map(strip_tags)
        .filter(|s| !s.is_empty())
}

/// Flatten `recipeInstructions` into an ordered, deduplicated step list.
///
/// Supported shapes:
/// - array of `HowToStep` objects with a `text` field
/// - array of `HowToSection` objects, each with an `itemListElement` list
/// - array of plain strings
/// - a single object with an `itemListElement` list (including the nested
///   `itemListElement.itemListElement.text` variant some sites produce)
fn instructions_from(value: Option<&Value>) -> Vec<String> {
    let mut steps = Vec::new();

    match value {
        Some(Value::Array(items)) => match items.first() {
            Some(first @ Value::Object(_)) => {
                let first_type = first
                    .get("@type")
                    .map(|t| t.to_string().to_lowercase())
                    .unwrap_or_default();
                if first_type.contains("howtostep") {
                    for item in items {
                        push_step(&mut steps, item.get("text"));
                    }
                } else if first_type.contains("howtosection") {
                    for section in items {
                        let elements = section.get("itemListElement").and_then(Value::as_array);
                        for step in elements.into_iter().flatten() {
                            push_step(&mut steps, step.get("text"));
                        }
                    }
                } else {
                    steps.push(UNKNOWN_SHAPE_SENTINEL.to_string());
                }
            }
            Some(Value::String(_)) => {
                for item in items {
                    push_step(&mut steps, Some(item));
                }
            }
            _ => steps.push(UNKNOWN_SHAPE_SENTINEL.to_string()),
        },
        Some(Value::Object(obj)) => match obj.get("itemListElement").and_then(Value::as_array) {
            Some(elements) => {
                for element in elements {
                    if element.is_object() {
                        // Some sites nest each step one level deeper
                        let text = element
                            .get("text")
                            .or_else(|| element.get("itemListElement").and_then(|e| e.get("text")));
                        push_step(&mut steps, text);
                    } else {
                        push_step(&mut steps, Some(element));
                    }
                }
            }
            None => steps.push(UNKNOWN_SHAPE_SENTINEL.to_string()),
        },
        Some(_) => steps.push(UNKNOWN_SHAPE_SENTINEL.to_string()),
        None => {}
    }

    steps
}

fn push_step(steps: &mut Vec<String>, value: Option<&Value>) {
    if let Some(text) = value.and_then(Value::as_str) {
        push_deduplicated(steps, strip_tags(text));
    }
}
