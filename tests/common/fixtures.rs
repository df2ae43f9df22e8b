//! Shared builders for integration tests.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pantry::cache::{CacheLayer, MemoryStore};
use pantry::filter::{FactorSnapshot, ItemFactor, LatentFactor};
use pantry::profile::{MemoryProfileStore, ProfileSnapshot, UserProfileManager};
use serde_json::{Value, json};

pub const DEFAULT_NUTRITION: [f64; 7] = [200.0, 10.0, 5.0, 3.0, 12.0, 2.0, 40.0];

/// Builds one JSON Lines recipe row.
#[derive(Debug, Clone)]
pub struct RecipeRowBuilder {
    id: Value,
    name: String,
    minutes: u32,
    ingredients: Value,
    steps: Value,
    nutrition: Value,
}

impl RecipeRowBuilder {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id: json!(id),
            name: name.to_string(),
            minutes: 30,
            ingredients: json!([]),
            steps: json!(["prepare", "cook"]),
            nutrition: json!(DEFAULT_NUTRITION),
        }
    }

    pub fn ingredients(mut self, ingredients: &[&str]) -> Self {
        self.ingredients = json!(ingredients);
        self
    }

    /// Stores ingredients as a JSON-encoded string, as tabular exports do.
    pub fn encoded_ingredients(mut self, ingredients: &[&str]) -> Self {
        self.ingredients = Value::String(json!(ingredients).to_string());
        self
    }

    pub fn steps(mut self, steps: &[&str]) -> Self {
        self.steps = json!(steps);
        self
    }

    pub fn minutes(mut self, minutes: u32) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn nutrition(mut self, nutrition: Value) -> Self {
        self.nutrition = nutrition;
        self
    }

    pub fn build(self) -> String {
        json!({
            "id": self.id,
            "name": self.name,
            "minutes": self.minutes,
            "ingredients": self.ingredients,
            "steps": self.steps,
            "nutrition": self.nutrition,
        })
        .to_string()
    }
}

/// The three-recipe corpus used across search tests.
pub fn sample_rows() -> Vec<String> {
    vec![
        RecipeRowBuilder::new(1, "pancakes")
            .ingredients(&["egg", "milk", "flour"])
            .build(),
        RecipeRowBuilder::new(2, "meringue")
            .ingredients(&["egg", "sugar"])
            .build(),
        RecipeRowBuilder::new(3, "shortbread")
            .ingredients(&["flour", "butter"])
            .steps(&["cream butter", "bake in the oven"])
            .minutes(90)
            .build(),
    ]
}

pub fn write_lines(dir: &Path, file_name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(file_name);
    let mut file = std::fs::File::create(&path).expect("create fixture file");
    for line in lines {
        writeln!(file, "{line}").expect("write fixture line");
    }
    path
}

/// Two factors; `alice` leans towards item "1", `bob` towards item "3".
pub fn sample_factors() -> FactorSnapshot {
    let mut users = BTreeMap::new();
    users.insert(
        "alice".to_string(),
        LatentFactor {
            vector: vec![1.0, 0.0],
            bias: 0.2,
        },
    );
    users.insert(
        "bob".to_string(),
        LatentFactor {
            vector: vec![0.0, 1.0],
            bias: -0.2,
        },
    );

    let item = |id: &str, vector: [f32; 2]| ItemFactor {
        id: id.to_string(),
        vector: vector.to_vec(),
        bias: 0.0,
    };

    FactorSnapshot {
        global_mean: 3.5,
        users,
        items: vec![item("1", [1.0, 0.0]), item("2", [0.5, 0.5]), item("3", [0.0, 1.0])],
    }
}

pub fn memory_manager() -> UserProfileManager<MemoryProfileStore, MemoryStore> {
    UserProfileManager::with_snapshot(
        MemoryProfileStore::new(),
        Arc::new(CacheLayer::new(MemoryStore::new())),
        ProfileSnapshot::default(),
    )
}
