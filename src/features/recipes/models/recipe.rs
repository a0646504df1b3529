use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::recipes::classification::{calculate_difficulty, TimeBucket};
use crate::features::recipes::images::image_for_recipe;
use crate::features::recipes::models::RecipeIngredient;
use crate::shared::constants::INGREDIENT_SUMMARY_LIMIT;

/// Recipe difficulty enum matching database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "recipe_difficulty")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Case-insensitive: "easy", "EASY" and "Easy" all parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown difficulty '{}'", s))
    }
}

/// Database model for recipe, joined with its category name
#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub cooking_time: i32,
    pub servings: i32,
    /// Difficulty as stored at first save (or as explicitly set)
    pub difficulty: Difficulty,
    pub owner_id: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recipe together with its ingredient associations
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

impl RecipeDetail {
    /// Classify against the current cooking time and ingredient count.
    ///
    /// May differ from `recipe.difficulty`, which is never recomputed after
    /// the first save.
    pub fn computed_difficulty(&self) -> Difficulty {
        calculate_difficulty(self.recipe.cooking_time, self.ingredients.len())
    }

    pub fn time_bucket(&self) -> TimeBucket {
        TimeBucket::from_minutes(self.recipe.cooking_time)
    }

    pub fn ingredient_descriptions(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| i.description()).collect()
    }

    /// First few ingredient descriptions, with "..." when more exist
    pub fn ingredient_summary(&self) -> String {
        if self.ingredients.is_empty() {
            return "No ingredients".to_string();
        }

        let shown: Vec<String> = self
            .ingredients
            .iter()
            .take(INGREDIENT_SUMMARY_LIMIT)
            .map(|i| i.description())
            .collect();

        let mut summary = shown.join(", ");
        if self.ingredients.len() > INGREDIENT_SUMMARY_LIMIT {
            summary.push_str("...");
        }
        summary
    }

    pub fn image_url(&self) -> &'static str {
        image_for_recipe(&self.recipe.name)
    }
}

/// Data for inserting a new recipe
#[derive(Debug)]
pub struct CreateRecipe {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub owner_id: String,
    pub category_id: Option<Uuid>,
}
