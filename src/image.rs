//! Candidate image gathering, validation and ranking.
//!
//! Open Graph metadata wins outright when present. Otherwise every raster
//! `<img>` URL on the page is probed for a real image content type and
//! acceptable pixel dimensions. Probes are independent of each other; a
//! failed probe drops one candidate and nothing else.

use log::{debug, warn};
use scraper::{Html, Selector};
use url::Url;

use crate::config::ExtractConfig;
use crate::dom;
use crate::error::ExtractError;

/// Decoded facts about one image candidate.
#[derive(Debug, Clone, Copy)]
pub struct ProbedImage {
    pub width: u32,
    pub height: u32,
}

/// Side-effect-free validation of a single image URL. Implementations
/// may be probed concurrently; results are collected and filtered
/// deterministically regardless of completion order.
pub trait ImageProber {
    fn probe(&self, url: &str) -> Result<ProbedImage, ExtractError>;
}

/// Probes candidates over HTTP: the Content-Type header must report an
/// image and the body must decode to known pixel dimensions.
pub struct HttpImageProber {
    client: reqwest::blocking::Client,
}

impl HttpImageProber {
    pub fn new(timeout_secs: u64) -> Result<Self, ExtractError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl ImageProber for HttpImageProber {
    fn probe(&self, url: &str) -> Result<ProbedImage, ExtractError> {
        let response = self.client.get(url).send()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(ExtractError::ImageValidation {
                url: url.to_string(),
                reason: format!("content type is {content_type:?}"),
            });
        }

        let bytes = response.bytes()?;
        let decoded =
            image::load_from_memory(&bytes).map_err(|err| ExtractError::ImageValidation {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        Ok(ProbedImage {
            width: decoded.width(),
            height: decoded.height(),
        })
    }
}

/// Rejects every candidate. Selection then degrades to the unfiltered
/// candidate list (or the placeholder), exactly as if every probe had
/// failed over the network.
pub struct DisabledImageProber;

impl ImageProber for DisabledImageProber {
    fn probe(&self, url: &str) -> Result<ProbedImage, ExtractError> {
        Err(ExtractError::ImageValidation {
            url: url.to_string(),
            reason: "image probing disabled".to_string(),
        })
    }
}

pub struct ImageSelector<'a> {
    config: &'a ExtractConfig,
    prober: &'a dyn ImageProber,
}

impl<'a> ImageSelector<'a> {
    pub fn new(config: &'a ExtractConfig, prober: &'a dyn ImageProber) -> Self {
        Self { config, prober }
    }

    /// Best-effort image URL for a page. Never fails; the worst case is
    /// the configured placeholder.
    pub fn select(&self, document: &Html, base_url: &str) -> String {
        if let Some(og_image) = dom::open_graph(document, "og:image") {
            return og_image;
        }

        let candidates = gather_candidates(document, base_url);
        if candidates.is_empty() {
            return self.config.placeholder_image.clone();
        }

        let mut validated: Vec<(String, u32)> = Vec::new();
        for candidate in &candidates {
            match self.prober.probe(candidate) {
                Ok(probe)
                    if probe.width > self.config.min_image_width
                        && probe.height > self.config.min_image_height =>
                {
                    validated.push((candidate.clone(), probe.width));
                }
                Ok(probe) => {
                    debug!(
                        "Image {candidate} too small: {}x{}",
                        probe.width, probe.height
                    );
                }
                Err(err) => warn!("Dropping image candidate: {err}"),
            }
        }

        validated.sort_by_key(|(_, width)| *width);
        match validated.into_iter().next() {
            Some((url, _)) => url,
            // No candidate passed the size filter; fall back to the raw list
            None => candidates[0].clone(),
        }
    }
}

/// Absolute, deduplicated raster image URLs in document order.
fn gather_candidates(document: &Html, base_url: &str) -> Vec<String> {
    let selector = Selector::parse("img[src]").unwrap();
    let base = Url::parse(base_url).ok();

    let mut candidates: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        let Some(absolute) = absolutize(base.as_ref(), src) else {
            continue;
        };
        if !has_raster_extension(&absolute) {
            continue;
        }
        let url_string = absolute.to_string();
        if !candidates.contains(&url_string) {
            candidates.push(url_string);
        }
    }
    candidates
}

fn absolutize(base: Option<&Url>, src: &str) -> Option<Url> {
    match base {
        Some(base) => base.join(src).ok(),
        None => Url::parse(src).ok(),
    }
}

/// Accepts .png/.jpg/.jpeg paths; rejects vector formats and anything
/// without a recognizable raster extension.
fn has_raster_extension(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    path.ends_with(".png") || path.ends_with(".jpg") || path.ends_with(".jpeg")
}
