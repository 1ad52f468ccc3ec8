//! Recipe categorization for imported recipes.
//!
//! Maps a recipe to a base-language category by keyword containment.
//! Category data is loaded from `data/categories.json` at compile time.

use serde::Deserialize;
use std::sync::LazyLock;

/// The raw JSON structure for the categories data file.
#[derive(Deserialize)]
struct CategoriesData {
    fallback: String,
    categories: Vec<CategoryKeywords>,
}

#[derive(Deserialize)]
struct CategoryKeywords {
    name: String,
    keywords: Vec<String>,
}

/// Categories in file order. Earlier categories win when several match.
static CATEGORIES: LazyLock<CategoriesData> = LazyLock::new(|| {
    let json = include_str!("../../data/categories.json");
    serde_json::from_str(json).expect("Failed to parse categories.json")
});

/// Categorize a recipe from its title, description and ingredients.
///
/// Returns the first category (in data-file order) with a keyword contained
/// in any of the lowercased fields, or the fallback category.
pub fn categorize(title: &str, description: &str, ingredients: &str) -> &'static str {
    let fields = [
        title.to_lowercase(),
        description.to_lowercase(),
        ingredients.to_lowercase(),
    ];

    CATEGORIES
        .categories
        .iter()
        .find(|category| {
            category
                .keywords
                .iter()
                .any(|keyword| fields.iter().any(|f| f.contains(keyword.as_str())))
        })
        .map(|category| category.name.as_str())
        .unwrap_or(CATEGORIES.fallback.as_str())
}

/// Every category the categorizer can produce, fallback last.
pub fn known_categories() -> Vec<&'static str> {
    CATEGORIES
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .chain(std::iter::once(CATEGORIES.fallback.as_str()))
        .collect()
}
