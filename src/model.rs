use ego_tree::NodeId;
use serde::Serialize;

/// Which tier of the fallback chain produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionMethod {
    /// Parsed from an embedded JSON-LD Recipe block
    Structured,
    /// Read from itemprop-annotated elements
    Microdata,
    /// Recovered by DOM scoring and ancestor resolution
    Heuristic,
    /// Minimal record assembled from page metadata only
    Fallback,
}

/// Partial recipe produced by a single extraction tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFields {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// ISO-8601 duration string, `"PT0M"` when unknown
    pub cook_time: String,
    pub yield_text: String,
}

impl RecipeFields {
    /// A tier only counts as successful when it recovered both lists.
    pub fn is_complete(&self) -> bool {
        !self.ingredients.is_empty() && !self.instructions.is_empty()
    }
}

/// The final extraction output. The caller owns it; the crate imposes no
/// storage or wire format beyond `Serialize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeRecord {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: String,
    pub yield_text: String,
    pub image_url: String,
    pub source_url: String,
    pub method: ExtractionMethod,
}

/// Scoring category for a DOM node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Ingredient,
    Instruction,
}

impl Category {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Category::Ingredient => "ingredient",
            Category::Instruction => "instruction",
        }
    }
}

/// A scored candidate node. Holds a tree handle rather than a node
/// reference so it can never outlive the document it points into.
#[derive(Debug, Clone, Copy)]
pub struct ScoredNode {
    pub id: NodeId,
    pub score: f64,
    pub category: Category,
}
