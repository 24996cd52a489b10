//! Text normalization helpers shared by every extraction tier.

use html_escape::decode_html_entities;
use scraper::Html;

/// Decode HTML entities in a string.
pub fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Collapse runs of whitespace (including newlines) into single spaces
/// and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip surrounding double quotes left behind by raw JSON values.
pub fn remove_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
}

/// Reduce a possibly-HTML fragment to clean visible text: tags stripped,
/// entities decoded, whitespace collapsed.
pub fn strip_tags(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text = parsed.root_element().text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&decode_html_symbols(&text))
}

/// Keep only the digits of a string ("4 servings" -> "4").
pub fn extract_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Append items to a list, skipping empties and anything already present.
pub fn push_deduplicated(list: &mut Vec<String>, item: String) {
    if !item.is_empty() && !list.contains(&item) {
        list.push(item);
    }
}

/// Number of `". "` sentence boundaries in a fragment.
pub fn sentence_boundaries(text: &str) -> usize {
    text.matches(". ").count()
}
