//! Overlay-over-base resolution.
//!
//! A translation overlay may set any subset of the five text fields. Each
//! field resolves independently: a non-empty overlay value wins, anything
//! else falls back to the base recipe.

use crate::language::BASE_LANGUAGE;
use crate::types::{Recipe, ResolvedRecipe, TranslationFields};

/// Merge `overlay` over `base` for `language`.
///
/// The base language never consults an overlay, and a missing overlay
/// yields the base recipe unchanged.
pub fn resolve(base: Recipe, overlay: Option<&TranslationFields>, language: &str) -> ResolvedRecipe {
    let overlay = match overlay {
        Some(o) if language != BASE_LANGUAGE => o,
        _ => return ResolvedRecipe::from_base(base, language),
    };

    let translated = !overlay.is_blank();
    let mut resolved = ResolvedRecipe::from_base(base, language);
    resolved.translated = translated;
    resolved.title = pick(&overlay.title, resolved.title);
    resolved.description = pick(&overlay.description, resolved.description);
    resolved.ingredients = pick(&overlay.ingredients, resolved.ingredients);
    resolved.instructions = pick(&overlay.instructions, resolved.instructions);
    resolved.category = pick(&overlay.category, resolved.category);
    resolved
}

fn pick(overlay: &Option<String>, base: String) -> String {
    match overlay.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => base,
    }
}

/// Sort resolved recipes by their resolved title, breaking ties by id.
///
/// Titles compare bytewise, which matches SQLite's default `BINARY` collation.
pub fn sort_by_title(recipes: &mut [ResolvedRecipe]) {
    recipes.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn recipe(id: i32, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            description: format!("Descripción {id}"),
            ingredients: format!("Ingredientes {id}"),
            instructions: format!("Preparación {id}"),
            category: "Postres".to_string(),
            estimated_calories: Some(420),
            servings: Some(4),
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_partial_overlay_falls_back_per_field() {
        let base = recipe(1, "Tarta de Queso");
        let overlay = TranslationFields {
            title: Some("Cheese Cake".to_string()),
            ..Default::default()
        };

        let resolved = resolve(base.clone(), Some(&overlay), "en");
        assert_eq!(resolved.title, "Cheese Cake");
        assert_eq!(resolved.description, base.description);
        assert_eq!(resolved.ingredients, base.ingredients);
        assert_eq!(resolved.instructions, base.instructions);
        assert_eq!(resolved.category, "Postres");
        assert!(resolved.translated);
        assert_eq!(resolved.language, "en");
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let base = recipe(3, "Pollo Asado");
        let overlay = TranslationFields {
            title: Some(String::new()),
            description: Some(String::new()),
            ingredients: Some(String::new()),
            instructions: Some(String::new()),
            category: Some(String::new()),
        };

        let resolved = resolve(base.clone(), Some(&overlay), "fr");
        assert_eq!(resolved, ResolvedRecipe::from_base(base, "fr"));
        assert!(!resolved.translated);
    }

    #[test]
    fn test_no_overlay_is_base() {
        let base = recipe(2, "Flan de Coco");
        let resolved = resolve(base.clone(), None, "en");
        assert_eq!(resolved, ResolvedRecipe::from_base(base, "en"));
        assert!(!resolved.translated);
    }

    #[test]
    fn test_base_language_ignores_overlay() {
        let base = recipe(1, "Tarta de Queso");
        let overlay = TranslationFields {
            title: Some("Cheese Cake".to_string()),
            ..Default::default()
        };
        let resolved = resolve(base.clone(), Some(&overlay), BASE_LANGUAGE);
        assert_eq!(resolved, ResolvedRecipe::from_base(base, BASE_LANGUAGE));
    }

    #[test]
    fn test_full_overlay_replaces_every_field() {
        let base = recipe(1, "Tarta de Queso");
        let overlay = TranslationFields {
            title: Some("Cheese Cake".to_string()),
            description: Some("Creamy".to_string()),
            ingredients: Some("Cheese".to_string()),
            instructions: Some("Bake".to_string()),
            category: Some("Desserts".to_string()),
        };
        let resolved = resolve(base, Some(&overlay), "en");
        assert_eq!(resolved.title, "Cheese Cake");
        assert_eq!(resolved.description, "Creamy");
        assert_eq!(resolved.ingredients, "Cheese");
        assert_eq!(resolved.instructions, "Bake");
        assert_eq!(resolved.category, "Desserts");
        assert_eq!(resolved.estimated_calories, Some(420));
    }

    #[test]
    fn test_sort_uses_resolved_title() {
        let mut recipes = vec![
            resolve(recipe(1, "Título Original"), None, "en"),
            resolve(
                recipe(2, "Zanahorias"),
                Some(&TranslationFields {
                    title: Some("Carrots".to_string()),
                    ..Default::default()
                }),
                "en",
            ),
            resolve(recipe(3, "Batido de Coco"), None, "en"),
        ];
        sort_by_title(&mut recipes);
        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Batido de Coco", "Carrots", "Título Original"]);
    }

    #[test]
    fn test_sort_ties_break_by_id() {
        let mut recipes = vec![
            resolve(recipe(7, "Gazpacho"), None, "es"),
            resolve(recipe(2, "Gazpacho"), None, "es"),
        ];
        sort_by_title(&mut recipes);
        assert_eq!(recipes[0].id, 2);
        assert_eq!(recipes[1].id, 7);
    }
}
