use super::*;
use crate::corpus::{Nutrition, Recipe, RecipeCorpus};
use crate::error::ValidationError;

fn recipe(id: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: format!("Recipe {id}"),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        steps: vec![],
        minutes: 10,
        nutrition: Nutrition::default(),
    }
}

fn sample_corpus() -> RecipeCorpus {
    RecipeCorpus::from_recipes(vec![
        recipe("R1", &["egg", "milk", "flour"]),
        recipe("R2", &["egg", "sugar"]),
        recipe("R3", &["flour", "butter"]),
    ])
}

#[test]
fn test_normalized_query_sorts_dedupes_and_lowercases() {
    let query = NormalizedQuery::new(&["Milk", " egg ", "EGG", ""]).expect("valid");
    assert_eq!(query.ingredients(), &["egg".to_string(), "milk".to_string()]);
    assert_eq!(query.len(), 2);
}

#[test]
fn test_normalized_query_rejects_empty() {
    let empty: [&str; 0] = [];
    assert_eq!(
        NormalizedQuery::new(&empty),
        Err(ValidationError::EmptyIngredients)
    );
    assert_eq!(
        NormalizedQuery::new(&["   ", "\t"]),
        Err(ValidationError::EmptyIngredients)
    );
}

#[test]
fn test_substring_match() {
    let query = NormalizedQuery::new(&["tomato"]).unwrap();
    let ingredients = vec!["diced tomatoes".to_string()];
    assert_eq!(ingredient_score(&query, &ingredients), 1.0);
}

#[test]
fn test_superset_recipe_scores_one() {
    let query = NormalizedQuery::new(&["egg", "milk"]).unwrap();
    let ingredients: Vec<String> = ["egg", "milk", "flour", "salt", "sugar"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(ingredient_score(&query, &ingredients), 1.0);
}

#[test]
fn test_scores_within_unit_interval() {
    let corpus = sample_corpus();
    let queries: [&[&str]; 4] = [
        &["egg"],
        &["egg", "flour"],
        &["caviar"],
        &["butter", "sugar", "egg", "saffron"],
    ];

    for q in queries {
        let query = NormalizedQuery::new(q).unwrap();
        let scores = IngredientScorer::new().score(&query, &corpus).unwrap();
        assert_eq!(scores.len(), corpus.len());
        for s in scores {
            assert!((0.0..=1.0).contains(&s.score), "score {} out of range", s.score);
        }
    }
}

#[test]
fn test_scorer_matches_case_insensitively() {
    let corpus = RecipeCorpus::from_recipes(vec![recipe("R1", &["  Fresh BASIL leaves"])]);
    let query = NormalizedQuery::new(&["Basil"]).unwrap();
    let scores = IngredientScorer::new().score(&query, &corpus).unwrap();
    assert_eq!(scores[0].score, 1.0);
}

#[test]
fn test_rank_example_scenario() {
    let corpus = sample_corpus();
    let query = NormalizedQuery::new(&["egg", "flour"]).unwrap();
    let scores = IngredientScorer::new().score(&query, &corpus).unwrap();

    let ranked = rank(scores, 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0], ScoredRecipe::new(0, 1.0));
    assert_eq!(ranked[1], ScoredRecipe::new(1, 0.5));
}

#[test]
fn test_rank_tie_break_is_corpus_order() {
    let scored = vec![
        ScoredRecipe::new(3, 0.5),
        ScoredRecipe::new(1, 0.5),
        ScoredRecipe::new(2, 0.9),
        ScoredRecipe::new(0, 0.5),
    ];
    let ranked = rank(scored, 10);
    let order: Vec<usize> = ranked.iter().map(|s| s.index).collect();
    assert_eq!(order, vec![2, 0, 1, 3]);
}

#[test]
fn test_rank_top_k_larger_than_corpus() {
    let ranked = rank(vec![ScoredRecipe::new(0, 0.1)], 5);
    assert_eq!(ranked.len(), 1);
}
