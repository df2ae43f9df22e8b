//! Namespaced cache keys.
//!
//! The prefixes are shared with already-persisted caches and must not change.

use std::fmt;

use crate::scoring::NormalizedQuery;

pub const RECIPE_SEARCH_PREFIX: &str = "recipe-search";
pub const USER_PROFILE_PREFIX: &str = "user-profile";
pub const USER_INTERACTIONS_PREFIX: &str = "user-interactions";
pub const RATING_PREFIX: &str = "rating";
pub const CURRENT_RECIPE_SUFFIX: &str = "current-recipe";

/// Delimiter between ingredients in a recipe-search key.
pub const INGREDIENT_DELIMITER: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `recipe-search:<sorted,lower-cased,comma-joined ingredients>`.
    ///
    /// [`NormalizedQuery`] is already sorted and lower-cased, so the key does not
    /// depend on input order or case. A `,` or `\` inside an ingredient is
    /// backslash-escaped, keeping `"salt, pepper"` apart from `salt` + `pepper`.
    pub fn recipe_search(query: &NormalizedQuery) -> Self {
        let joined = query
            .ingredients()
            .iter()
            .map(|ingredient| escape_ingredient(ingredient))
            .collect::<Vec<_>>()
            .join(INGREDIENT_DELIMITER);
        Self(format!("{RECIPE_SEARCH_PREFIX}:{joined}"))
    }

    /// `user-profile:<user_id>`.
    pub fn user_profile(user_id: &str) -> Self {
        Self(format!("{USER_PROFILE_PREFIX}:{user_id}"))
    }

    /// `user-interactions:<user_id>`.
    pub fn user_interactions(user_id: &str) -> Self {
        Self(format!("{USER_INTERACTIONS_PREFIX}:{user_id}"))
    }

    /// `rating:<user_id>:current-recipe`.
    pub fn current_rating(user_id: &str) -> Self {
        Self(format!("{RATING_PREFIX}:{user_id}:{CURRENT_RECIPE_SUFFIX}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

fn escape_ingredient(ingredient: &str) -> std::borrow::Cow<'_, str> {
    if !ingredient.contains([',', '\\']) {
        return ingredient.into();
    }
    ingredient.replace('\\', "\\\\").replace(',', "\\,").into()
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
