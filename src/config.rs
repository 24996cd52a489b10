use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Tunable knobs for the extraction pipeline
///
/// Everything heuristic lives here: the scoring vocabularies, the two
/// acceptance thresholds, image size limits and network timeouts. The
/// defaults reproduce the behavior observed to work on real recipe sites.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    /// Words that suggest a text fragment names a food item
    #[serde(default = "default_food_words")]
    pub food_words: Vec<String>,
    /// Measurement-unit tokens ("g", "dl", "tbsp", ...)
    #[serde(default = "default_measurement_units")]
    pub measurement_units: Vec<String>,
    /// Imperative cooking verbs that open instruction sentences
    #[serde(default = "default_instruction_verbs")]
    pub instruction_verbs: Vec<String>,
    /// Normalized score a node must exceed to count as an ingredient
    #[serde(default = "default_ingredient_threshold")]
    pub ingredient_threshold: f64,
    /// Normalized score a node must exceed to count as an instruction.
    /// Deliberately stricter than the ingredient threshold; tune separately.
    #[serde(default = "default_instruction_threshold")]
    pub instruction_threshold: f64,
    /// Minimum decoded width for an image candidate to survive the size filter
    #[serde(default = "default_min_image_dimension")]
    pub min_image_width: u32,
    /// Minimum decoded height for an image candidate
    #[serde(default = "default_min_image_dimension")]
    pub min_image_height: u32,
    /// Returned when a page has no usable image at all
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Timeout in seconds for the initial document fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// Timeout in seconds for each image probe
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            food_words: default_food_words(),
            measurement_units: default_measurement_units(),
            instruction_verbs: default_instruction_verbs(),
            ingredient_threshold: default_ingredient_threshold(),
            instruction_threshold: default_instruction_threshold(),
            min_image_width: default_min_image_dimension(),
            min_image_height: default_min_image_dimension(),
            placeholder_image: default_placeholder_image(),
            fetch_timeout: default_fetch_timeout(),
            probe_timeout: default_probe_timeout(),
        }
    }
}

// Default value functions
fn default_food_words() -> Vec<String> {
    [
        "salt", "pepper", "water", "oil", "butter", "rice", "potato", "pasta",
        "salmon", "cod", "chicken", "beef", "onion", "garlic", "flour",
        "sugar", "egg", "milk", "cream", "cheese",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_measurement_units() -> Vec<String> {
    [
        "gram", "grams", "g", "kg", "l", "dl", "cl", "ml", "tsp", "tbsp",
        "teaspoon", "teaspoons", "tablespoon", "tablespoons", "cup", "cups",
        "oz", "lb", "pinch", "clove", "cloves", "bunch",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_instruction_verbs() -> Vec<String> {
    [
        "cut", "chop", "dice", "slice", "marinate", "boil", "fry", "bake",
        "roast", "mix", "whisk", "stir", "add", "blend", "strain", "peel",
        "simmer", "preheat", "season", "serve",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_ingredient_threshold() -> f64 {
    0.60
}

fn default_instruction_threshold() -> f64 {
    0.70
}

fn default_min_image_dimension() -> u32 {
    200
}

fn default_placeholder_image() -> String {
    "https://picsum.photos/600/600".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_probe_timeout() -> u64 {
    10
}

impl ExtractConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXTRACT__ prefix
    /// 2. recipe-extract.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXTRACT__INGREDIENT_THRESHOLD
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe-extract").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_EXTRACT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ExtractConfig::default();
        assert_eq!(config.ingredient_threshold, 0.60);
        assert_eq!(config.instruction_threshold, 0.70);
    }

    #[test]
    fn test_default_image_limits() {
        let config = ExtractConfig::default();
        assert_eq!(config.min_image_width, 200);
        assert_eq!(config.min_image_height, 200);
        assert!(config.placeholder_image.starts_with("https://"));
    }

    #[test]
    fn test_vocabularies_non_empty() {
        let config = ExtractConfig::default();
        assert!(!config.food_words.is_empty());
        assert!(!config.measurement_units.is_empty());
        assert!(!config.instruction_verbs.is_empty());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let result = ExtractConfig::load();
        // No config file and no env vars set: every field has a default
        assert!(result.is_ok());
    }
}
