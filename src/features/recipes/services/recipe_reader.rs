use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::recipes::models::RecipeDetail;

/// Store-level predicates pushed down to the recipe store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeLookup {
    /// Case-insensitive substring of the recipe name
    pub name_contains: Option<String>,
    /// Case-insensitive substring of any ingredient name
    pub ingredient_contains: Option<String>,
}

impl RecipeLookup {
    pub fn all() -> Self {
        Self::default()
    }
}

/// Read-side view of the recipe store used by search and analytics.
///
/// Implementations return recipes most-recent-first with their ingredients
/// loaded, each recipe at most once.
#[async_trait]
pub trait RecipeReader: Send + Sync {
    async fn find_recipes(&self, lookup: &RecipeLookup) -> Result<Vec<RecipeDetail>>;
}
