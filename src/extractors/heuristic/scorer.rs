//! Ingredient/instruction likelihood scoring for DOM nodes.
//!
//! Each score is a weighted sum of independent boolean checks, normalized
//! by the maximum attainable weight. A node whose normalized score clears
//! the configured threshold becomes a candidate for ancestor resolution.

use ego_tree::NodeRef;
use regex::Regex;
use scraper::Node;

use crate::config::ExtractConfig;
use crate::dom;
use crate::text::sentence_boundaries;

#[derive(Debug, Clone, Copy)]
enum Weight {
    Low = 5,
    Medium = 7,
    High = 10,
}

impl Weight {
    fn value(self) -> u32 {
        self as u32
    }
}

const INGREDIENT_TAGS: &[&str] = &["span", "li", "ul", "table", "tbody", "tr", "td"];
const INSTRUCTION_TAGS: &[&str] = &["span", "li", "ul", "table", "tbody", "tr", "td", "p"];

pub struct NodeScorer {
    food_words: Regex,
    measurement_units: Regex,
    instruction_verbs: Regex,
    ingredient_threshold: f64,
    instruction_threshold: f64,
}

impl NodeScorer {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            food_words: whole_word_pattern(&config.food_words),
            measurement_units: whole_word_pattern(&config.measurement_units),
            instruction_verbs: whole_word_pattern(&config.instruction_verbs),
            ingredient_threshold: config.ingredient_threshold,
            instruction_threshold: config.instruction_threshold,
        }
    }

    /// Score a node as an ingredient line. Returns whether it clears the
    /// threshold along with the normalized score.
    pub fn score_ingredient(&self, node: NodeRef<'_, Node>, text: &str) -> (bool, f64) {
        let tag_score = if has_tag(node, INGREDIENT_TAGS) {
            Weight::Medium.value()
        } else {
            0
        };
        let class_score = if class_contains(node, &["ingredient"]) {
            Weight::Low.value()
        } else {
            0
        };
        let length_score = if word_count(text) <= 8 {
            Weight::High.value()
        } else {
            0
        };
        let sentence_score = if sentence_boundaries(text) <= 1 {
            Weight::High.value()
        } else {
            0
        };
        let leading_score = if starts_with_quantity(text) {
            Weight::Medium.value()
        } else {
            0
        };
        let food_word_score = if self.food_words.is_match(text) {
            Weight::Medium.value()
        } else {
            0
        };
        let unit_score = if self.measurement_units.is_match(text) {
            Weight::High.value()
        } else {
            0
        };

        let possible = Weight::Low.value() + Weight::Medium.value() * 3 + Weight::High.value() * 3;
        let total = tag_score
            + class_score
            + length_score
            + sentence_score
            + leading_score
            + food_word_score
            + unit_score;

        let normalized = f64::from(total) / f64::from(possible);
        (normalized > self.ingredient_threshold, normalized)
    }

    /// Score a node as an instruction paragraph.
    pub fn score_instruction(&self, node: NodeRef<'_, Node>, text: &str) -> (bool, f64) {
        let tag_score = if has_tag(node, INSTRUCTION_TAGS) {
            Weight::Low.value()
        } else {
            0
        };
        let class_score = if class_contains(node, &["instruction", "step"]) {
            Weight::Medium.value()
        } else {
            0
        };
        let length_score = if text.len() > 100 { Weight::High.value() } else { 0 };
        let brevity_score = if word_count(text) <= 1000 {
            Weight::Medium.value()
        } else {
            0
        };
        let sentence_score = if sentence_boundaries(text) >= 2 {
            Weight::Medium.value()
        } else {
            0
        };
        let leading_score = if starts_with_capital_or_digit(text) {
            Weight::Low.value()
        } else {
            0
        };
        let verb_score = if self.instruction_verbs.is_match(text) {
            Weight::High.value()
        } else {
            0
        };
        let punctuation_score = if text.trim_end().ends_with('.') {
            Weight::Low.value()
        } else {
            0
        };

        let possible = Weight::Low.value() * 3 + Weight::Medium.value() * 3 + Weight::High.value() * 2;
        let total = tag_score
            + class_score
            + length_score
            + brevity_score
            + sentence_score
            + leading_score
            + verb_score
            + punctuation_score;

        let normalized = f64::from(total) / f64::from(possible);
        (normalized > self.instruction_threshold, normalized)
    }
}

/// Case-insensitive whole-word alternation over a vocabulary list.
fn whole_word_pattern(words: &[String]) -> Regex {
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("vocabulary pattern")
}

fn has_tag(node: NodeRef<'_, Node>, tags: &[&str]) -> bool {
    dom::tag_name(node).is_some_and(|tag| tags.contains(&tag))
}

fn class_contains(node: NodeRef<'_, Node>, keywords: &[&str]) -> bool {
    dom::attr(node, "class")
        .map(str::to_lowercase)
        .is_some_and(|class| keywords.iter().any(|keyword| class.contains(keyword)))
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn starts_with_quantity(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-')
}

fn starts_with_capital_or_digit(text: &str) -> bool {
    text.trim()
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}
