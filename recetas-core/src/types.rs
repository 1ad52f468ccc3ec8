use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A recipe as authored in the base language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub estimated_calories: Option<i32>,
    pub servings: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// The translatable fields of an overlay. `None` means "use the base value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TranslationFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl TranslationFields {
    /// True when no field would override its base value.
    pub fn is_blank(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.ingredients,
            &self.instructions,
            &self.category,
        ]
        .iter()
        .all(|f| f.as_deref().is_none_or(str::is_empty))
    }
}

/// A stored per-language overlay for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Translation {
    pub recipe_id: i32,
    pub language: String,
    #[serde(flatten)]
    pub fields: TranslationFields,
    pub created_at: NaiveDateTime,
}

/// The language-specific view of a recipe after overlay-over-base fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResolvedRecipe {
    pub id: i32,
    /// Language this view was resolved for.
    pub language: String,
    /// Whether an overlay contributed to this view.
    pub translated: bool,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub estimated_calories: Option<i32>,
    pub servings: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl ResolvedRecipe {
    /// The untranslated view of `recipe`, labelled with `language`.
    pub fn from_base(recipe: Recipe, language: &str) -> Self {
        ResolvedRecipe {
            id: recipe.id,
            language: language.to_string(),
            translated: false,
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            category: recipe.category,
            estimated_calories: recipe.estimated_calories,
            servings: recipe.servings,
            created_at: recipe.created_at,
        }
    }
}
