//! Parsing of markdown recipe files.
//!
//! A recipe file looks like:
//!
//! ```text
//! # Tarta de Queso
//!
//! ## Descripción
//! Una tarta cremosa.
//!
//! ## Ingredientes
//! - 500 g de queso
//!
//! ## Preparación
//! 1. Mezclar y hornear.
//!
//! ---
//! ```
//!
//! Each `##` section runs until the next `##` header or a `---` rule.

use crate::categorizer::categorize;
use crate::error::ImportError;
use std::path::Path;

/// A recipe parsed from markdown, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub filename: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Description,
    Ingredients,
    Instructions,
    Other,
}

fn section_for(header: &str) -> Section {
    match header.trim().to_lowercase().as_str() {
        "descripción" | "descripcion" => Section::Description,
        "ingredientes" => Section::Ingredients,
        "preparación" | "preparacion" => Section::Instructions,
        _ => Section::Other,
    }
}

/// Parse markdown `content` that was read from `filename`.
pub fn parse_recipe(content: &str, filename: &str) -> ParsedRecipe {
    let mut title: Option<String> = None;
    let mut description = Vec::new();
    let mut ingredients = Vec::new();
    let mut instructions = Vec::new();
    let mut section = Section::None;

    for line in content.lines() {
        let trimmed = line.trim_end();

        if let Some(header) = trimmed.strip_prefix("## ") {
            section = section_for(header);
            continue;
        }
        if title.is_none() {
            if let Some(t) = trimmed.strip_prefix("# ") {
                title = Some(t.trim().to_string());
                continue;
            }
        }
        if trimmed.trim() == "---" {
            section = Section::None;
            continue;
        }

        match section {
            Section::Description => description.push(trimmed),
            Section::Ingredients => ingredients.push(trimmed),
            Section::Instructions => instructions.push(trimmed),
            Section::None | Section::Other => {}
        }
    }

    let title = title.unwrap_or_else(|| filename.to_string());
    let description = join_block(&description);
    let ingredients = join_block(&ingredients);
    let instructions = join_block(&instructions);
    let category = categorize(&title, &description, &ingredients).to_string();

    ParsedRecipe {
        title,
        description,
        ingredients,
        instructions,
        category,
        filename: filename.to_string(),
    }
}

fn join_block(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Read and parse one markdown recipe file.
pub fn parse_recipe_file(path: &Path) -> Result<ParsedRecipe, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ImportError::Empty(filename));
    }

    Ok(parse_recipe(&content, &filename))
}
