use super::StoreError;
use crate::models::{NewRecipe, RecipeRow, TranslationRow};
use crate::schema::{recipe_translations, recipes};
use diesel::prelude::*;
use recetas_core::{
    resolve, sort_by_title, ParsedRecipe, Recipe, ResolvedRecipe, SearchFilter, BASE_LANGUAGE,
};

/// The language-specific view of one recipe, or `None` if it doesn't exist.
pub fn resolve_one(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    language: &str,
) -> Result<Option<ResolvedRecipe>, StoreError> {
    let _span = tracing::info_span!("db.query", op = "resolve_one", recipe_id, language).entered();

    let Some(base) = recipes::table
        .find(recipe_id)
        .select(RecipeRow::as_select())
        .first(conn)
        .optional()?
    else {
        return Ok(None);
    };

    if language == BASE_LANGUAGE {
        return Ok(Some(resolve(base.into(), None, language)));
    }

    let overlay: Option<TranslationRow> = recipe_translations::table
        .filter(recipe_translations::recipe_id.eq(recipe_id))
        .filter(recipe_translations::language.eq(language))
        .select(TranslationRow::as_select())
        .first(conn)
        .optional()?;

    let fields = overlay.as_ref().map(TranslationRow::fields);
    Ok(Some(resolve(base.into(), fields.as_ref(), language)))
}

/// Every recipe resolved for `language`, ordered by resolved title then id.
pub fn resolve_many(
    conn: &mut SqliteConnection,
    language: &str,
) -> Result<Vec<ResolvedRecipe>, StoreError> {
    let _span = tracing::info_span!("db.query", op = "resolve_many", language).entered();

    let mut resolved: Vec<ResolvedRecipe> = if language == BASE_LANGUAGE {
        recipes::table
            .select(RecipeRow::as_select())
            .load(conn)?
            .into_iter()
            .map(|row| resolve(row.into(), None, language))
            .collect()
    } else {
        let rows: Vec<(RecipeRow, Option<TranslationRow>)> = recipes::table
            .left_join(
                recipe_translations::table.on(recipe_translations::recipe_id
                    .eq(recipes::id)
                    .and(recipe_translations::language.eq(language))),
            )
            .select((
                RecipeRow::as_select(),
                Option::<TranslationRow>::as_select(),
            ))
            .load(conn)?;

        rows.into_iter()
            .map(|(base, overlay)| {
                let fields = overlay.as_ref().map(TranslationRow::fields);
                resolve(base.into(), fields.as_ref(), language)
            })
            .collect()
    };

    sort_by_title(&mut resolved);
    Ok(resolved)
}

/// Resolved recipes matching `query` and `category`, in `resolve_many` order.
///
/// The category compares against the resolved category, so a translated
/// category label only matches its translated spelling.
pub fn search(
    conn: &mut SqliteConnection,
    query: &str,
    category: Option<&str>,
    language: &str,
) -> Result<Vec<ResolvedRecipe>, StoreError> {
    let filter = SearchFilter::new(query, category);
    let recipes = resolve_many(conn, language)?;
    Ok(filter.apply(recipes))
}

/// Distinct non-empty base categories, sorted.
pub fn list_categories(conn: &mut SqliteConnection) -> Result<Vec<String>, StoreError> {
    let _span = tracing::info_span!("db.query", op = "list_categories").entered();

    let categories = recipes::table
        .select(recipes::category)
        .filter(recipes::category.ne(""))
        .distinct()
        .order(recipes::category.asc())
        .load::<String>(conn)?;

    Ok(categories)
}

pub fn count_recipes(conn: &mut SqliteConnection) -> Result<i64, StoreError> {
    let _span = tracing::info_span!("db.query", op = "count_recipes").entered();
    Ok(recipes::table.count().get_result(conn)?)
}

pub fn get_recipe(
    conn: &mut SqliteConnection,
    recipe_id: i32,
) -> Result<Option<Recipe>, StoreError> {
    let _span = tracing::info_span!("db.query", op = "get_recipe", recipe_id).entered();

    let row = recipes::table
        .find(recipe_id)
        .select(RecipeRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Recipe::from))
}

/// All base recipes ordered by id.
pub fn list_base_recipes(conn: &mut SqliteConnection) -> Result<Vec<Recipe>, StoreError> {
    let _span = tracing::info_span!("db.query", op = "list_base_recipes").entered();

    let rows = recipes::table
        .order(recipes::id.asc())
        .select(RecipeRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

/// What `upsert_recipe` did with a parsed recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(i32),
    Updated(i32),
}

impl UpsertOutcome {
    pub fn id(&self) -> i32 {
        match *self {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => id,
        }
    }
}

/// Insert a parsed recipe, or update the one imported from the same file.
///
/// Matching on the file name keeps ids, and so their overlays, stable
/// across re-imports.
pub fn upsert_recipe(
    conn: &mut SqliteConnection,
    parsed: &ParsedRecipe,
) -> Result<UpsertOutcome, StoreError> {
    let _span =
        tracing::info_span!("db.query", op = "upsert_recipe", filename = %parsed.filename).entered();

    let new = NewRecipe {
        title: &parsed.title,
        description: &parsed.description,
        ingredients: &parsed.ingredients,
        instructions: &parsed.instructions,
        category: &parsed.category,
        filename: Some(&parsed.filename),
    };

    conn.transaction::<_, StoreError, _>(|conn| {
        let existing: Option<i32> = recipes::table
            .filter(recipes::filename.eq(&parsed.filename))
            .select(recipes::id)
            .first(conn)
            .optional()?;

        match existing {
            Some(id) => {
                diesel::update(recipes::table.find(id))
                    .set(&new)
                    .execute(conn)?;
                Ok(UpsertOutcome::Updated(id))
            }
            None => {
                let id = diesel::insert_into(recipes::table)
                    .values(&new)
                    .returning(recipes::id)
                    .get_result(conn)?;
                Ok(UpsertOutcome::Created(id))
            }
        }
    })
}

/// Store a calorie estimate. Returns false when the recipe doesn't exist.
pub fn set_estimated_calories(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    calories: Option<i32>,
) -> Result<bool, StoreError> {
    let _span =
        tracing::info_span!("db.query", op = "set_estimated_calories", recipe_id).entered();

    let updated = diesel::update(recipes::table.find(recipe_id))
        .set(recipes::estimated_calories.eq(calories))
        .execute(conn)?;
    Ok(updated > 0)
}


#[cfg(test)]
mod tests {
    use super::test_support::add_recipe;
    use super::*;
    use crate::db::test_support::test_pool;
    use crate::models::NewTranslation;
    use crate::store::upsert_translation;
    use recetas_core::TranslationFields;

    fn fields(title: Option<&str>, category: Option<&str>) -> TranslationFields {
        TranslationFields {
            title: title.map(str::to_string),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    fn titles(recipes: &[ResolvedRecipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_overlay_falls_back_per_field() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Tarta de Queso", "Postres", "- queso");
        upsert_translation(&mut conn, id, "en", &fields(Some("Cheese Cake"), None)).unwrap();

        let resolved = resolve_one(&mut conn, id, "en").unwrap().unwrap();
        assert_eq!(resolved.title, "Cheese Cake");
        assert_eq!(resolved.description, "Receta de Tarta de Queso");
        assert_eq!(resolved.category, "Postres");
        assert_eq!(resolved.language, "en");
        assert!(resolved.translated);
    }

    #[test]
    fn test_missing_overlay_returns_base() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Paella", "Arroces", "- arroz");
        let base = get_recipe(&mut conn, id).unwrap().unwrap();

        let resolved = resolve_one(&mut conn, id, "en").unwrap().unwrap();
        assert_eq!(resolved, ResolvedRecipe::from_base(base, "en"));
        assert!(!resolved.translated);
    }

    #[test]
    fn test_missing_recipe_is_none() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        assert!(resolve_one(&mut conn, 99999, "en").unwrap().is_none());
        assert!(resolve_one(&mut conn, 99999, "es").unwrap().is_none());
    }

    #[test]
    fn test_base_language_ignores_stray_overlay() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Flan", "Postres", "- leche");
        let stray = fields(Some("Flan raro"), None);
        diesel::insert_into(recipe_translations::table)
            .values(NewTranslation::new(id, BASE_LANGUAGE, &stray))
            .execute(&mut conn)
            .unwrap();

        let base = get_recipe(&mut conn, id).unwrap().unwrap();
        let resolved = resolve_one(&mut conn, id, "es").unwrap().unwrap();
        let expected = ResolvedRecipe::from_base(base, "es");
        assert_eq!(resolved, expected);
        assert_eq!(resolve_many(&mut conn, "es").unwrap(), vec![expected]);
    }

    #[test]
    fn test_fallback_totality_with_blank_overlay() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Gazpacho", "Verduras", "- tomate");
        let blank = TranslationFields {
            title: Some(String::new()),
            description: Some(String::new()),
            ..Default::default()
        };
        upsert_translation(&mut conn, id, "zh", &blank).unwrap();

        let resolved = resolve_one(&mut conn, id, "zh").unwrap().unwrap();
        assert_eq!(resolved.title, "Gazpacho");
        assert_eq!(resolved.description, "Receta de Gazpacho");
        assert!(!resolved.ingredients.is_empty());
        assert!(!resolved.translated);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Tortilla", "Otros", "- huevos");
        upsert_translation(&mut conn, id, "en", &fields(Some("Omelette"), None)).unwrap();

        assert_eq!(
            resolve_one(&mut conn, id, "en").unwrap(),
            resolve_one(&mut conn, id, "en").unwrap()
        );
        assert_eq!(
            resolve_many(&mut conn, "en").unwrap(),
            resolve_many(&mut conn, "en").unwrap()
        );
    }

    #[test]
    fn test_resolve_many_orders_by_resolved_title() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let a = add_recipe(&mut conn, "Albóndigas", "Carnes", "- carne");
        let z = add_recipe(&mut conn, "Zarangollo", "Verduras", "- calabacín");
        upsert_translation(&mut conn, z, "en", &fields(Some("Courgette scramble"), None)).unwrap();
        upsert_translation(&mut conn, a, "en", &fields(Some("Meatballs"), None)).unwrap();

        let es = resolve_many(&mut conn, "es").unwrap();
        assert_eq!(titles(&es), vec!["Albóndigas", "Zarangollo"]);

        let en = resolve_many(&mut conn, "en").unwrap();
        assert_eq!(titles(&en), vec!["Courgette scramble", "Meatballs"]);
        assert_eq!(en.len(), es.len());
    }

    #[test]
    fn test_search_scenarios() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let flan = add_recipe(&mut conn, "Flan de Coco", "Postres", "- coco rallado");
        add_recipe(&mut conn, "Batido de Coco", "Bebidas", "- leche de coco");
        add_recipe(&mut conn, "Tarta de Queso", "Postres", "- queso");

        let found = search(&mut conn, "coco", None, "es").unwrap();
        assert_eq!(titles(&found), vec!["Batido de Coco", "Flan de Coco"]);

        let found = search(&mut conn, "COCO", Some("Postres"), "es").unwrap();
        assert_eq!(titles(&found), vec!["Flan de Coco"]);

        // A translated category label no longer matches the Spanish one.
        upsert_translation(&mut conn, flan, "en", &fields(None, Some("Desserts"))).unwrap();
        let found = search(&mut conn, "", Some("Postres"), "en").unwrap();
        assert_eq!(titles(&found), vec!["Tarta de Queso"]);
        let found = search(&mut conn, "", Some("Desserts"), "en").unwrap();
        assert_eq!(titles(&found), vec!["Flan de Coco"]);
    }

    #[test]
    fn test_search_is_ordered_subset_of_resolve_many() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        for title in ["Sopa de ajo", "Arroz con leche", "Crema de calabaza", "Sopa fría"] {
            add_recipe(&mut conn, title, "Otros", "- agua");
        }

        let all = resolve_many(&mut conn, "en").unwrap();
        let found = search(&mut conn, "sopa", None, "en").unwrap();
        assert_eq!(found.len(), 2);
        let positions: Vec<usize> = found
            .iter()
            .map(|r| all.iter().position(|a| a == r).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(search(&mut conn, "  ", Some(""), "en").unwrap(), all);
    }

    #[test]
    fn test_list_categories() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        assert!(list_categories(&mut conn).unwrap().is_empty());

        add_recipe(&mut conn, "Flan", "Postres", "");
        add_recipe(&mut conn, "Paella", "Arroces", "");
        add_recipe(&mut conn, "Natillas", "Postres", "");
        add_recipe(&mut conn, "Sin categoría", "", "");

        assert_eq!(list_categories(&mut conn).unwrap(), vec!["Arroces", "Postres"]);
        assert_eq!(count_recipes(&mut conn).unwrap(), 4);
    }

    #[test]
    fn test_upsert_recipe_keeps_id_per_filename() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let mut parsed = ParsedRecipe {
            title: "Flan".to_string(),
            description: String::new(),
            ingredients: "- leche".to_string(),
            instructions: String::new(),
            category: "Postres".to_string(),
            filename: "flan.md".to_string(),
        };
        let created = upsert_recipe(&mut conn, &parsed).unwrap();
        assert!(matches!(created, UpsertOutcome::Created(_)));

        parsed.title = "Flan de huevo".to_string();
        let updated = upsert_recipe(&mut conn, &parsed).unwrap();
        assert_eq!(updated, UpsertOutcome::Updated(created.id()));

        let recipe = get_recipe(&mut conn, created.id()).unwrap().unwrap();
        assert_eq!(recipe.title, "Flan de huevo");
        assert_eq!(recipe.servings, Some(4));
        assert_eq!(list_base_recipes(&mut conn).unwrap().len(), 1);
    }

    #[test]
    fn test_set_estimated_calories() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Flan", "Postres", "- leche");

        assert!(set_estimated_calories(&mut conn, id, Some(850)).unwrap());
        assert!(!set_estimated_calories(&mut conn, 404, Some(1)).unwrap());
        let resolved = resolve_one(&mut conn, id, "en").unwrap().unwrap();
        assert_eq!(resolved.estimated_calories, Some(850));
    }
}
