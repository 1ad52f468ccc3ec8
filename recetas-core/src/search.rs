//! Text and category filtering over resolved recipes.

use crate::types::ResolvedRecipe;

/// A search over the resolved view of a recipe collection.
///
/// The text query is a case-insensitive substring match OR-combined across
/// title, description and ingredients. Instructions are not searched. The
/// category is an exact, case-sensitive match on the resolved category.
/// Both filters are AND-combined.
#[derive(Debug, Default, Clone)]
pub struct SearchFilter {
    needle: Option<String>,
    category: Option<String>,
}

impl SearchFilter {
    /// Build a filter. An empty query or empty category disables that filter.
    /// The query is matched as given, whitespace included.
    pub fn new(query: &str, category: Option<&str>) -> Self {
        SearchFilter {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
            category: category.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }

    /// True when the filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.needle.is_none() && self.category.is_none()
    }

    pub fn matches(&self, recipe: &ResolvedRecipe) -> bool {
        if let Some(ref category) = self.category {
            if recipe.category != *category {
                return false;
            }
        }

        match self.needle {
            Some(ref needle) => [&recipe.title, &recipe.description, &recipe.ingredients]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        }
    }

    /// Keep only matching recipes, preserving their order.
    pub fn apply(&self, recipes: Vec<ResolvedRecipe>) -> Vec<ResolvedRecipe> {
        if self.is_empty() {
            return recipes;
        }
        recipes.into_iter().filter(|r| self.matches(r)).collect()
    }
}
