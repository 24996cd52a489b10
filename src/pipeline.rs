//! The extraction orchestrator: a strictly forward fallback chain from
//! structured data down to a minimal metadata-only record.
//!
//! Every tier failure is recovered by advancing to the next tier, so
//! [`Pipeline::extract`] is a total function: any parsed document in,
//! exactly one [`RecipeRecord`] out.

use log::debug;
use scraper::Html;

use crate::config::ExtractConfig;
use crate::dom;
use crate::error::ExtractError;
use crate::extractors::heuristic::materialize;
use crate::extractors::{
    Extractor, HeuristicExtractor, JsonLdExtractor, MicroDataExtractor, ParsingContext,
};
use crate::image::{DisabledImageProber, HttpImageProber, ImageProber, ImageSelector};
use crate::model::{ExtractionMethod, RecipeFields, RecipeRecord};

/// States of the fallback chain, in the only order they can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Structured,
    Microdata,
    Heuristic,
    MinimalFallback,
}

impl Tier {
    fn next(self) -> Tier {
        match self {
            Tier::Structured => Tier::Microdata,
            Tier::Microdata => Tier::Heuristic,
            Tier::Heuristic | Tier::MinimalFallback => Tier::MinimalFallback,
        }
    }
}

pub struct Pipeline {
    config: ExtractConfig,
    heuristic: HeuristicExtractor,
    prober: Box<dyn ImageProber>,
}

impl Pipeline {
    /// Pipeline with default configuration and HTTP image probing.
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_config(ExtractConfig::default())
    }

    pub fn with_config(config: ExtractConfig) -> Result<Self, ExtractError> {
        let prober = HttpImageProber::new(config.probe_timeout)?;
        Ok(Self::with_prober(config, Box::new(prober)))
    }

    /// Pipeline with a caller-supplied image prober. Useful when probing
    /// must go through a proxy, a cache, or a test double.
    pub fn with_prober(config: ExtractConfig, prober: Box<dyn ImageProber>) -> Self {
        let heuristic = HeuristicExtractor::new(&config);
        Self {
            config,
            heuristic,
            prober,
        }
    }

    /// Extract a recipe record from a parsed document. Total: always
    /// produces a record, degrading tier by tier instead of failing.
    pub fn extract(&self, url: &str, document: &Html) -> RecipeRecord {
        let context = ParsingContext { url, document };

        let mut tier = Tier::Structured;
        loop {
            let (attempt, method) = match tier {
                Tier::Structured => (
                    JsonLdExtractor.parse(&context),
                    ExtractionMethod::Structured,
                ),
                Tier::Microdata => (
                    MicroDataExtractor.parse(&context),
                    ExtractionMethod::Microdata,
                ),
                Tier::Heuristic => (self.heuristic.parse(&context), ExtractionMethod::Heuristic),
                Tier::MinimalFallback => return self.fallback_record(&context),
            };

            match attempt {
                Ok(fields) if fields.is_complete() => {
                    return self.finish(fields, method, &context);
                }
                Ok(_) => {
                    debug!("{method:?} tier produced incomplete fields, advancing");
                }
                Err(err) => {
                    debug!("{method:?} tier failed ({err}), advancing");
                }
            }
            tier = tier.next();
        }
    }

    /// Assemble the final record: image selection plus the cross-category
    /// duplicate guarantee.
    fn finish(
        &self,
        fields: RecipeFields,
        method: ExtractionMethod,
        context: &ParsingContext<'_>,
    ) -> RecipeRecord {
        let (ingredients, instructions) =
            materialize::cross_filter(fields.ingredients, fields.instructions);
        let image_url =
            ImageSelector::new(&self.config, self.prober.as_ref()).select(context.document, context.url);

        RecipeRecord {
            title: fields.title,
            description: fields.description,
            ingredients,
            instructions,
            cook_time: fields.cook_time,
            yield_text: fields.yield_text,
            image_url,
            source_url: context.url.to_string(),
            method,
        }
    }

    /// The tier that cannot fail: page metadata, empty lists, best-effort
    /// image. A valid record meaning "needs manual completion".
    fn fallback_record(&self, context: &ParsingContext<'_>) -> RecipeRecord {
        let title = dom::open_graph(context.document, "og:title")
            .or_else(|| dom::document_title(context.document))
            .unwrap_or_default();
        let description =
            dom::open_graph(context.document, "og:description").unwrap_or_default();
        let image_url =
            ImageSelector::new(&self.config, self.prober.as_ref()).select(context.document, context.url);

        RecipeRecord {
            title,
            description,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            cook_time: "PT0M".to_string(),
            yield_text: "4".to_string(),
            image_url,
            source_url: context.url.to_string(),
            method: ExtractionMethod::Fallback,
        }
    }
}

/// Pipeline for environments where image probing is unavailable; the
/// image selector then returns unprobed candidates or the placeholder.
pub fn without_probing() -> Pipeline {
    Pipeline::with_prober(ExtractConfig::default(), Box::new(DisabledImageProber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_is_strictly_forward() {
        assert_eq!(Tier::Structured.next(), Tier::Microdata);
        assert_eq!(Tier::Microdata.next(), Tier::Heuristic);
        assert_eq!(Tier::Heuristic.next(), Tier::MinimalFallback);
        // Terminal state never advances past itself
        assert_eq!(Tier::MinimalFallback.next(), Tier::MinimalFallback);
    }

    #[test]
    fn test_empty_document_reaches_fallback() {
        let document = Html::parse_document("<html><body></body></html>");
        let record = without_probing().extract("https://example.com/empty", &document);
        assert_eq!(record.method, ExtractionMethod::Fallback);
        assert!(record.ingredients.is_empty());
        assert!(record.instructions.is_empty());
        assert_eq!(record.cook_time, "PT0M");
        assert_eq!(record.yield_text, "4");
        assert_eq!(record.image_url, ExtractConfig::default().placeholder_image);
    }
}
