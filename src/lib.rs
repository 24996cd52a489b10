//! Best-effort structured recipe extraction from arbitrary web pages.
//!
//! Given a parsed HTML document, [`extract`] always produces a
//! [`RecipeRecord`]: it tries embedded JSON-LD structured data first,
//! then microdata annotations, then heuristic DOM scoring, and finally
//! assembles a minimal record from page metadata. No site-specific rules
//! are involved anywhere.
//!
//! ```no_run
//! use recipe_extract::{extract, fetch_document};
//!
//! let url = "https://example.com/spaghetti";
//! let document = fetch_document(url)?;
//! let record = extract(url, &document);
//! println!("{} ({} ingredients)", record.title, record.ingredients.len());
//! # Ok::<(), recipe_extract::ExtractError>(())
//! ```

pub mod config;
pub mod dom;
pub mod duration;
pub mod error;
pub mod extractors;
pub mod image;
pub mod model;
pub mod pipeline;
pub mod text;

use log::warn;
use reqwest::header::{HeaderMap, USER_AGENT};
use scraper::Html;

pub use crate::config::ExtractConfig;
pub use crate::error::ExtractError;
pub use crate::model::{ExtractionMethod, RecipeFields, RecipeRecord};
pub use crate::pipeline::Pipeline;

/// Extract a recipe record from an already-fetched, already-parsed
/// document. Total: never fails, never panics on adversarial markup.
pub fn extract(url: &str, document: &Html) -> RecipeRecord {
    let pipeline = match Pipeline::new() {
        Ok(pipeline) => pipeline,
        Err(err) => {
            warn!("Image probing unavailable ({err}), continuing without it");
            pipeline::without_probing()
        }
    };
    pipeline.extract(url, document)
}

/// Fetch and parse a document with a browser user agent and a bounded
/// timeout. The one fatal error path in the crate: without a document
/// there is nothing to extract from.
pub fn fetch_document(url: &str) -> Result<Html, ExtractError> {
    fetch_document_with_timeout(url, ExtractConfig::default().fetch_timeout)
}

pub fn fetch_document_with_timeout(url: &str, timeout_secs: u64) -> Result<Html, ExtractError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".parse()?);

    let body = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?
        .get(url)
        .headers(headers)
        .send()?
        .text()?;

    Ok(Html::parse_document(&body))
}

/// Convenience: fetch, parse and extract in one call.
pub fn fetch_and_extract(url: &str) -> Result<RecipeRecord, ExtractError> {
    let document = fetch_document(url)?;
    Ok(extract(url, &document))
}
