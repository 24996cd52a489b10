use std::io::Cursor;

use recipe_extract::config::ExtractConfig;
use recipe_extract::error::ExtractError;
use recipe_extract::image::{HttpImageProber, ImageProber, ImageSelector};
use scraper::Html;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_probe_reads_dimensions() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/dish.png")
        .with_header("content-type", "image/png")
        .with_body(png_bytes(300, 240))
        .create();

    let prober = HttpImageProber::new(5).unwrap();
    let probe = prober.probe(&format!("{}/dish.png", server.url())).unwrap();
    assert_eq!(probe.width, 300);
    assert_eq!(probe.height, 240);
}

#[test]
fn test_probe_rejects_non_image_content_type() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/page.png")
        .with_header("content-type", "text/html")
        .with_body("<html></html>")
        .create();

    let prober = HttpImageProber::new(5).unwrap();
    let result = prober.probe(&format!("{}/page.png", server.url()));
    assert!(matches!(result, Err(ExtractError::ImageValidation { .. })));
}

#[test]
fn test_probe_rejects_undecodable_body() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/lie.png")
        .with_header("content-type", "image/png")
        .with_body("not actually a png")
        .create();

    let prober = HttpImageProber::new(5).unwrap();
    let result = prober.probe(&format!("{}/lie.png", server.url()));
    assert!(matches!(result, Err(ExtractError::ImageValidation { .. })));
}

#[test]
fn test_selection_prefers_smallest_image_above_threshold() {
    let mut server = mockito::Server::new();
    let _large = server
        .mock("GET", "/large.png")
        .with_header("content-type", "image/png")
        .with_body(png_bytes(800, 600))
        .create();
    let _medium = server
        .mock("GET", "/medium.png")
        .with_header("content-type", "image/png")
        .with_body(png_bytes(320, 320))
        .create();
    let _small = server
        .mock("GET", "/small.png")
        .with_header("content-type", "image/png")
        .with_body(png_bytes(32, 32))
        .create();

    let base = server.url();
    let document = Html::parse_document(&format!(
        r#"<html><body>
            <img src="{base}/large.png" />
            <img src="{base}/medium.png" />
            <img src="{base}/small.png" />
        </body></html>"#
    ));

    let config = ExtractConfig::default();
    let prober = HttpImageProber::new(5).unwrap();
    let selector = ImageSelector::new(&config, &prober);
    // Ascending by width among those above the 200px floor
    assert_eq!(selector.select(&document, &base), format!("{base}/medium.png"));
}
