//! Calorie estimation from free-text ingredient lists.
//!
//! Each ingredient line is reduced to a weight in grams (from the first
//! quantity and unit it mentions) and matched against a nutrition table
//! with values per 100 g. Nutrition data is loaded from
//! `data/nutrition.json` at compile time.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Grams assumed for a line without a usable quantity.
const DEFAULT_GRAMS: f64 = 100.0;

/// Grams per piece when a number is followed by an unknown word ("2 huevos").
const GRAMS_PER_PIECE: f64 = 100.0;

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*(\p{L}+)?").expect("quantity regex is valid")
});

/// Approximate grams per unit for Spanish kitchen measures.
fn grams_per_unit(unit: &str) -> Option<f64> {
    let grams = match unit {
        "kg" | "kilo" | "kilos" | "kilogramo" | "kilogramos" => 1000.0,
        "g" | "gr" | "grs" | "gramo" | "gramos" => 1.0,
        // 1 l of most kitchen liquids weighs about 1 kg
        "l" | "litro" | "litros" => 1000.0,
        "ml" | "mililitro" | "mililitros" => 1.0,
        "cucharada" | "cucharadas" => 15.0,
        "cucharadita" | "cucharaditas" => 5.0,
        "taza" | "tazas" => 200.0,
        "unidad" | "unidades" | "pieza" | "piezas" => 100.0,
        "loncha" | "lonchas" => 20.0,
        "rebanada" | "rebanadas" => 30.0,
        "diente" | "dientes" => 3.0,
        _ => return None,
    };
    Some(grams)
}

/// Nutrition values per 100 g.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NutritionFacts {
    pub kcal: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

#[derive(Deserialize)]
struct NutritionData {
    ingredients: HashMap<String, NutritionFacts>,
}

/// Ingredient names with their nutrition, longest name first so specific
/// entries ("pimentón") are tried before general ones ("pimienta", "pan").
pub struct NutritionTable {
    entries: Vec<(String, NutritionFacts)>,
}

static BUILTIN: LazyLock<NutritionTable> = LazyLock::new(|| {
    NutritionTable::from_json(include_str!("../../data/nutrition.json"))
        .expect("Failed to parse nutrition.json")
});

impl NutritionTable {
    /// The table shipped with the crate.
    pub fn builtin() -> &'static NutritionTable {
        &BUILTIN
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: NutritionData = serde_json::from_str(json)?;
        let mut entries: Vec<(String, NutritionFacts)> = data
            .ingredients
            .into_iter()
            .map(|(name, facts)| (name.to_lowercase(), facts))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Ok(NutritionTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the ingredient a line talks about.
    ///
    /// Whole-word matches win over substring matches.
    pub fn find(&self, line: &str) -> Option<(&str, NutritionFacts)> {
        let lower = line.to_lowercase();
        let words: Vec<&str> = lower.split(|c: char| !c.is_alphanumeric()).collect();

        self.entries
            .iter()
            .find(|(name, _)| words.contains(&name.as_str()))
            .or_else(|| self.entries.iter().find(|(name, _)| lower.contains(name.as_str())))
            .map(|(name, facts)| (name.as_str(), *facts))
    }
}

/// Quantity and unit found on an ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Option<String>,
}

impl Quantity {
    pub fn grams(&self) -> f64 {
        match self.unit.as_deref().and_then(grams_per_unit) {
            Some(factor) => self.amount * factor,
            None => self.amount * GRAMS_PER_PIECE,
        }
    }
}

/// Extract the first quantity on a line, with the word that follows it.
pub fn extract_quantity(line: &str) -> Option<Quantity> {
    let caps = QUANTITY_RE.captures(line)?;
    let amount: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
    Some(Quantity { amount, unit })
}

/// Estimated contribution of one ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IngredientCalories {
    pub line: String,
    pub ingredient: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub grams: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalorieEstimate {
    pub total_calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub ingredients: Vec<IngredientCalories>,
    pub matched_lines: usize,
    pub total_lines: usize,
}

impl CalorieEstimate {
    /// Share of ingredient lines matched against the nutrition table.
    pub fn match_rate(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.matched_lines as f64 / self.total_lines as f64
    }

    pub fn per_serving(&self, servings: Option<i32>) -> Option<i32> {
        match servings {
            Some(n) if n > 0 => Some((self.total_calories as f64 / n as f64).round() as i32),
            _ => None,
        }
    }
}

/// Strip list markers and skip blank lines and section headers.
fn ingredient_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
}

/// Estimate calories for an ingredients block using `table`.
pub fn estimate(ingredients: &str, table: &NutritionTable) -> CalorieEstimate {
    let mut estimate = CalorieEstimate::default();
    let mut total = 0.0;

    for line in ingredient_lines(ingredients) {
        estimate.total_lines += 1;

        let Some((name, facts)) = table.find(line) else {
            tracing::trace!(line, "no nutrition match");
            continue;
        };

        let quantity = extract_quantity(line);
        let grams = quantity.as_ref().map(Quantity::grams).unwrap_or(DEFAULT_GRAMS);
        let factor = grams / 100.0;
        let calories = factor * facts.kcal;

        total += calories;
        estimate.protein_g += factor * facts.protein;
        estimate.carbs_g += factor * facts.carbs;
        estimate.fat_g += factor * facts.fat;
        estimate.matched_lines += 1;
        estimate.ingredients.push(IngredientCalories {
            line: line.to_string(),
            ingredient: name.to_string(),
            quantity: quantity.as_ref().map(|q| q.amount),
            unit: quantity.and_then(|q| q.unit),
            grams,
            calories,
        });
    }

    estimate.total_calories = total as i32;
    estimate
}
