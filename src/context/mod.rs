//! Input handed to the external text generator.
//!
//! The generator sees a compact Tauq rendering of the detected ingredients, the
//! user's saved preferences (if any) and the ranked recipes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::profile::UserPreference;
use crate::recommend::RecipeSummary;

pub use tauq::error::TauqError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreference>,
    /// Best match first.
    pub recipes: Vec<RecipeSummary>,
}

impl GenerationContext {
    pub fn new(
        ingredients: Vec<String>,
        preferences: Option<UserPreference>,
        recipes: Vec<RecipeSummary>,
    ) -> Self {
        Self {
            ingredients,
            preferences,
            recipes,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Tauq text of the whole context.
    pub fn render(&self) -> serde_json::Result<String> {
        Ok(tauq::format_to_tauq(&self.to_value()?))
    }

    /// Parses text produced by [`render`](Self::render) back into JSON.
    pub fn parse_rendered(input: &str) -> Result<Value, TauqError> {
        tauq::compile_tauq(input)
    }
}
