use chrono::NaiveDateTime;
use diesel::prelude::*;
use recetas_core::{Recipe, Translation, TranslationFields};

// Field order matches the table definitions: left joins load these positionally.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub filename: Option<String>,
    pub created_at: NaiveDateTime,
    pub estimated_calories: Option<i32>,
    pub servings: Option<i32>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            title: row.title,
            description: row.description,
            ingredients: row.ingredients,
            instructions: row.instructions,
            category: row.category,
            estimated_calories: row.estimated_calories,
            servings: row.servings,
            created_at: row.created_at,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub category: &'a str,
    pub filename: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipe_translations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TranslationRow {
    pub id: i32,
    pub recipe_id: i32,
    pub language: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TranslationRow {
    pub fn fields(&self) -> TranslationFields {
        TranslationFields {
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            category: self.category.clone(),
        }
    }
}

impl From<TranslationRow> for Translation {
    fn from(row: TranslationRow) -> Self {
        Translation {
            recipe_id: row.recipe_id,
            language: row.language,
            fields: TranslationFields {
                title: row.title,
                description: row.description,
                ingredients: row.ingredients,
                instructions: row.instructions,
                category: row.category,
            },
            created_at: row.created_at,
        }
    }
}

/// An overlay write. `None` fields are stored as NULL, replacing earlier values.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::recipe_translations)]
#[diesel(treat_none_as_null = true)]
pub struct NewTranslation<'a> {
    pub recipe_id: i32,
    pub language: &'a str,
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub ingredients: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl<'a> NewTranslation<'a> {
    pub fn new(recipe_id: i32, language: &'a str, fields: &'a TranslationFields) -> Self {
        NewTranslation {
            recipe_id,
            language,
            title: fields.title.as_deref(),
            description: fields.description.as_deref(),
            ingredients: fields.ingredients.as_deref(),
            instructions: fields.instructions.as_deref(),
            category: fields.category.as_deref(),
        }
    }
}
