//! JSON Lines recipe rows → [`Recipe`] records.
//!
//! Each line is one object:
//!
//! ```text
//! {"id": 137739, "name": "arriba baked winter squash", "minutes": 55,
//!  "ingredients": ["winter squash", "olive oil"], "steps": ["preheat oven"],
//!  "nutrition": [51.5, 0.0, 13.0, 0.0, 2.0, 0.0, 4.0]}
//! ```
//!
//! `ingredients`, `steps` and `nutrition` may also arrive as strings holding the
//! JSON-encoded list, which is how tabular exports carry them.

use std::io::BufRead;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::error::CorpusResult;
use super::model::{Nutrition, Recipe};

/// Counts of per-row faults seen while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub loaded: usize,
    pub dropped: usize,
    pub defaulted_nutrition: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListField {
    List(Vec<String>),
    Encoded(String),
}

impl ListField {
    fn into_list(self) -> Option<Vec<String>> {
        match self {
            ListField::List(items) => Some(items),
            ListField::Encoded(raw) => serde_json::from_str(&raw).ok(),
        }
    }
}

#[derive(Deserialize)]
struct RawRecipeRow {
    id: Value,
    name: String,
    minutes: u32,
    ingredients: ListField,
    #[serde(default)]
    steps: Option<ListField>,
    #[serde(default)]
    nutrition: Value,
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Parses a nutrition field given either as an array or as a string holding one.
pub(crate) fn parse_nutrition(value: &Value) -> Option<Nutrition> {
    let owned;
    let array = match value {
        Value::Array(items) => items,
        Value::String(raw) => {
            owned = serde_json::from_str::<Value>(raw).ok()?;
            owned.as_array()?
        }
        _ => return None,
    };

    let figures: Option<Vec<f64>> = array.iter().map(Value::as_f64).collect();
    Nutrition::from_values(&figures?)
}

enum RowOutcome {
    Loaded(Recipe),
    Defaulted(Recipe),
    Dropped,
}

fn parse_row(line_no: usize, line: &str) -> RowOutcome {
    let raw: RawRecipeRow = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(line = line_no, error = %e, "Dropping malformed recipe row");
            return RowOutcome::Dropped;
        }
    };

    let Some(id) = id_from_value(&raw.id) else {
        warn!(line = line_no, "Dropping recipe row without a usable id");
        return RowOutcome::Dropped;
    };

    let Some(ingredients) = raw.ingredients.into_list() else {
        warn!(line = line_no, recipe_id = %id, "Dropping recipe row with unparsable ingredients");
        return RowOutcome::Dropped;
    };

    let steps = match raw.steps.map(ListField::into_list) {
        None => Vec::new(),
        Some(Some(steps)) => steps,
        Some(None) => {
            warn!(line = line_no, recipe_id = %id, "Dropping recipe row with unparsable steps");
            return RowOutcome::Dropped;
        }
    };

    let (nutrition, defaulted) = match parse_nutrition(&raw.nutrition) {
        Some(n) => (n, false),
        None => {
            warn!(
                line = line_no,
                recipe_id = %id,
                "Malformed nutrition field, defaulting to zero"
            );
            (Nutrition::default(), true)
        }
    };

    let recipe = Recipe {
        id,
        name: raw.name,
        ingredients,
        steps,
        minutes: raw.minutes,
        nutrition,
    };

    if defaulted {
        RowOutcome::Defaulted(recipe)
    } else {
        RowOutcome::Loaded(recipe)
    }
}

/// Reads every row from `reader`, isolating faults per row.
///
/// Rows are read as raw bytes, so a row that is not valid UTF-8 is dropped
/// like any other malformed row. Only an I/O failure of the reader itself is
/// returned as an error.
pub fn read_rows<R: BufRead>(mut reader: R) -> CorpusResult<(Vec<Recipe>, LoadStats)> {
    let mut recipes = Vec::new();
    let mut stats = LoadStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(line = line_no, error = %e, "Dropping recipe row that is not valid UTF-8");
                stats.dropped += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match parse_row(line_no, line) {
            RowOutcome::Loaded(recipe) => recipes.push(recipe),
            RowOutcome::Defaulted(recipe) => {
                stats.defaulted_nutrition += 1;
                recipes.push(recipe);
            }
            RowOutcome::Dropped => stats.dropped += 1,
        }
    }

    stats.loaded = recipes.len();
    Ok((recipes, stats))
}
