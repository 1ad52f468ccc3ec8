use super::StoreError;
use crate::models::{NewTranslation, TranslationRow};
use crate::schema::{recipe_translations, recipes};
use diesel::dsl::exists;
use diesel::prelude::*;
use recetas_core::{Translation, TranslationFields, BASE_LANGUAGE};

/// Insert or fully replace the overlay for `(recipe_id, language)`.
///
/// Fields left as `None` are stored as NULL, so a replacement can clear a
/// previously translated field.
pub fn upsert_translation(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    language: &str,
    fields: &TranslationFields,
) -> Result<Translation, StoreError> {
    if language == BASE_LANGUAGE {
        return Err(StoreError::BaseLanguageOverlay(language.to_string()));
    }

    let _span =
        tracing::info_span!("db.query", op = "upsert_translation", recipe_id, language).entered();

    conn.transaction::<_, StoreError, _>(|conn| {
        let recipe_exists: bool =
            diesel::select(exists(recipes::table.find(recipe_id))).get_result(conn)?;
        if !recipe_exists {
            return Err(StoreError::RecipeNotFound(recipe_id));
        }

        let new = NewTranslation::new(recipe_id, language, fields);
        let row = diesel::insert_into(recipe_translations::table)
            .values(&new)
            .on_conflict((recipe_translations::recipe_id, recipe_translations::language))
            .do_update()
            .set(&new)
            .returning(TranslationRow::as_returning())
            .get_result(conn)?;

        Ok(row.into())
    })
}

pub fn get_translation(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    language: &str,
) -> Result<Option<Translation>, StoreError> {
    let _span =
        tracing::info_span!("db.query", op = "get_translation", recipe_id, language).entered();

    let row = recipe_translations::table
        .filter(recipe_translations::recipe_id.eq(recipe_id))
        .filter(recipe_translations::language.eq(language))
        .select(TranslationRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Translation::from))
}

/// Every overlay stored for a recipe, ordered by language code.
pub fn list_translations(
    conn: &mut SqliteConnection,
    recipe_id: i32,
) -> Result<Vec<Translation>, StoreError> {
    let _span = tracing::info_span!("db.query", op = "list_translations", recipe_id).entered();

    let rows = recipe_translations::table
        .filter(recipe_translations::recipe_id.eq(recipe_id))
        .order(recipe_translations::language.asc())
        .select(TranslationRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Translation::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;
    use crate::store::recipes::test_support::add_recipe;
    use crate::store::resolve_one;

    fn title_and_description(title: &str, description: &str) -> TranslationFields {
        TranslationFields {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Tarta de Queso", "Postres", "- queso");

        let first = upsert_translation(
            &mut conn,
            id,
            "en",
            &title_and_description("Cheese Cake", "Creamy"),
        )
        .unwrap();
        assert_eq!(first.fields.description.as_deref(), Some("Creamy"));

        // A full replacement clears fields it leaves out.
        let only_title = TranslationFields {
            title: Some("Cheesecake".to_string()),
            ..Default::default()
        };
        let second = upsert_translation(&mut conn, id, "en", &only_title).unwrap();
        assert_eq!(second.fields.title.as_deref(), Some("Cheesecake"));
        assert_eq!(second.fields.description, None);

        let stored = get_translation(&mut conn, id, "en").unwrap().unwrap();
        assert_eq!(stored, second);
        assert_eq!(list_translations(&mut conn, id).unwrap().len(), 1);

        let resolved = resolve_one(&mut conn, id, "en").unwrap().unwrap();
        assert_eq!(resolved.title, "Cheesecake");
        assert_eq!(resolved.description, "Receta de Tarta de Queso");
    }

    #[test]
    fn test_overlays_are_per_language() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Paella", "Arroces", "- arroz");

        upsert_translation(&mut conn, id, "zh", &title_and_description("海鲜饭", "")).unwrap();
        upsert_translation(&mut conn, id, "en", &title_and_description("Paella", "Rice")).unwrap();

        let languages: Vec<String> = list_translations(&mut conn, id)
            .unwrap()
            .into_iter()
            .map(|t| t.language)
            .collect();
        assert_eq!(languages, vec!["en", "zh"]);
        assert!(get_translation(&mut conn, id, "ca").unwrap().is_none());
    }

    #[test]
    fn test_rejects_base_language() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        let id = add_recipe(&mut conn, "Flan", "Postres", "- leche");

        let result = upsert_translation(&mut conn, id, "es", &title_and_description("Flan", ""));
        assert!(matches!(result, Err(StoreError::BaseLanguageOverlay(code)) if code == "es"));
    }

    #[test]
    fn test_rejects_unknown_recipe() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let result =
            upsert_translation(&mut conn, 42, "en", &title_and_description("Ghost", "None"));
        assert!(matches!(result, Err(StoreError::RecipeNotFound(42))));
        assert!(get_translation(&mut conn, 42, "en").unwrap().is_none());
    }
}
