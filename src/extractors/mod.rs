use scraper::Html;

use crate::error::ExtractError;
use crate::model::RecipeFields;

mod json_ld;
mod microdata;
pub mod heuristic;

pub use heuristic::HeuristicExtractor;
pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

/// Everything a tier needs to look at: the source URL and the parsed
/// document. The document is read-only for the whole extraction call.
pub struct ParsingContext<'a> {
    pub url: &'a str,
    pub document: &'a Html,
}

/// One tier of the fallback chain. A failed `parse` is a recoverable
/// signal to advance to the next tier, never a fatal condition.
pub trait Extractor {
    fn parse(&self, context: &ParsingContext<'_>) -> Result<RecipeFields, ExtractError>;
}
