use thiserror::Error;

/// Errors that can occur during recipe extraction
///
/// Only [`ExtractError::Fetch`] is ever surfaced by the convenience API;
/// everything else is absorbed by the extraction pipeline, which degrades
/// to the next tier instead of failing.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to fetch the document from the source URL
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Malformed JSON inside a linked-data script block
    #[error("Failed to parse structured data: {0}")]
    Parse(String),

    /// No matching structured-data or microdata content on the page
    #[error("No recipe data found: {0}")]
    NotFound(String),

    /// Fewer than two distinct-content scored nodes for a category
    #[error("Not enough {0} candidates to locate a recipe section")]
    InsufficientCandidates(&'static str),

    /// Two candidate nodes whose ancestor chains never intersect
    #[error("Candidate nodes share no common ancestor")]
    NoCommonAncestor,

    /// One image candidate failed validation; dropped, never escalated
    #[error("Image validation failed for {url}: {reason}")]
    ImageValidation { url: String, reason: String },

    /// Error building HTTP request headers
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
