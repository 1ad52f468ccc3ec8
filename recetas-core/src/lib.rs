pub mod calories;
pub mod categorizer;
pub mod error;
pub mod language;
pub mod markdown;
pub mod render;
pub mod resolve;
pub mod search;
pub mod types;

pub use calories::{estimate, CalorieEstimate, IngredientCalories, NutritionTable};
pub use categorizer::categorize;
pub use error::{ConfigError, ImportError};
pub use language::{
    LanguageConfig, LanguageSelection, LanguageSource, SupportedLanguage, BASE_LANGUAGE,
};
pub use markdown::{parse_recipe, parse_recipe_file, ParsedRecipe};
pub use render::markdown_to_html;
pub use resolve::{resolve, sort_by_title};
pub use search::SearchFilter;
pub use types::{Recipe, ResolvedRecipe, Translation, TranslationFields};
