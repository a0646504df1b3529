use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::recipes::classification::TimeBucket;
use crate::features::recipes::models::{Difficulty, RecipeDetail, RecipeIngredient};

// =============================================================================
// REQUESTS
// =============================================================================

/// Ingredient line attached to a recipe
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecipeIngredientInputDto {
    pub ingredient_id: Uuid,

    /// Amount in the ingredient's unit of measure; omitted means "to taste"
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    #[serde(default)]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRecipeDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub instructions: String,

    /// Cooking time in minutes
    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    pub cooking_time: i32,

    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    #[serde(default = "default_servings")]
    pub servings: i32,

    /// Derived from cooking time and ingredient count when omitted
    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    #[serde(default)]
    pub category_id: Option<Uuid>,

    #[validate(nested)]
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientInputDto>,
}

fn default_servings() -> i32 {
    1
}

/// Partial update. Stored difficulty only changes when `difficulty` is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRecipeDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i32>,

    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,

    /// Detach the recipe from its category
    #[serde(default)]
    pub clear_category: bool,

    /// Replaces every ingredient association when present
    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<RecipeIngredientInputDto>>,
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientDto {
    pub ingredient_id: Uuid,
    pub name: String,
    pub unit_of_measure: String,
    pub quantity: Option<f64>,
    /// e.g. "200 grams of cheese"
    pub description: String,
}

impl From<&RecipeIngredient> for RecipeIngredientDto {
    fn from(i: &RecipeIngredient) -> Self {
        Self {
            ingredient_id: i.ingredient_id,
            name: i.ingredient_name.clone(),
            unit_of_measure: i.unit_of_measure.clone(),
            quantity: i.quantity,
            description: i.description(),
        }
    }
}

/// List item used by the recipe list and search results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub computed_difficulty: Difficulty,
    pub time_bucket: TimeBucket,
    pub category_name: Option<String>,
    pub ingredient_summary: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<&RecipeDetail> for RecipeSummaryDto {
    fn from(d: &RecipeDetail) -> Self {
        Self {
            id: d.recipe.id,
            name: d.recipe.name.clone(),
            cooking_time: d.recipe.cooking_time,
            servings: d.recipe.servings,
            difficulty: d.recipe.difficulty,
            computed_difficulty: d.computed_difficulty(),
            time_bucket: d.time_bucket(),
            category_name: d.recipe.category_name.clone(),
            ingredient_summary: d.ingredient_summary(),
            image_url: d.image_url().to_string(),
            created_at: d.recipe.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetailDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub cooking_time: i32,
    pub servings: i32,
    /// Difficulty as stored
    pub difficulty: Difficulty,
    /// Difficulty for the current cooking time and ingredients
    pub computed_difficulty: Difficulty,
    /// True when the stored difficulty no longer matches the computed one
    pub difficulty_is_stale: bool,
    pub time_bucket: TimeBucket,
    pub owner_id: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub ingredient_summary: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeDetail> for RecipeDetailDto {
    fn from(d: RecipeDetail) -> Self {
        let computed_difficulty = d.computed_difficulty();
        let time_bucket = d.time_bucket();
        let ingredient_summary = d.ingredient_summary();
        let image_url = d.image_url().to_string();
        let ingredients = d.ingredients.iter().map(RecipeIngredientDto::from).collect();
        let r = d.recipe;

        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            instructions: r.instructions,
            cooking_time: r.cooking_time,
            servings: r.servings,
            difficulty: r.difficulty,
            computed_difficulty,
            difficulty_is_stale: r.difficulty != computed_difficulty,
            time_bucket,
            owner_id: r.owner_id,
            category_id: r.category_id,
            category_name: r.category_name,
            ingredients,
            ingredient_summary,
            image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::shared::test_helpers::recipe_fixture;

    #[test]
    fn test_create_dto_defaults() {
        let dto: CreateRecipeDto =
            serde_json::from_str(r#"{"name": "Toast", "cooking_time": 5}"#).unwrap();

        assert_eq!(dto.servings, 1);
        assert!(dto.difficulty.is_none());
        assert!(dto.ingredients.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_zero_cooking_time() {
        let dto: CreateRecipeDto =
            serde_json::from_str(r#"{"name": "Toast", "cooking_time": 0}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_negative_cooking_time() {
        let dto: CreateRecipeDto =
            serde_json::from_str(r#"{"name": "Toast", "cooking_time": -5}"#).unwrap();

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cooking_time"));
    }

    #[test]
    fn test_create_dto_rejects_negative_servings() {
        let dto: CreateRecipeDto =
            serde_json::from_str(r#"{"name": "Toast", "cooking_time": 5, "servings": -2}"#)
                .unwrap();

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("servings"));
    }

    #[test]
    fn test_update_dto_range_rules() {
        assert!(UpdateRecipeDto::default().validate().is_ok());

        let cases = [
            json!({ "cooking_time": -5 }),
            json!({ "cooking_time": 0 }),
            json!({ "servings": -2 }),
            json!({ "name": "" }),
            json!({ "ingredients": [{ "ingredient_id": Uuid::nil(), "quantity": -0.5 }] }),
        ];
        for case in cases {
            let dto: UpdateRecipeDto = serde_json::from_value(case.clone()).unwrap();
            assert!(dto.validate().is_err(), "{} should be rejected", case);
        }

        let dto: UpdateRecipeDto =
            serde_json::from_value(json!({ "cooking_time": 45, "servings": 4 })).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_negative_quantity() {
        let dto: CreateRecipeDto = serde_json::from_value(serde_json::json!({
            "name": "Toast",
            "cooking_time": 5,
            "ingredients": [{"ingredient_id": Uuid::nil(), "quantity": -1.0}]
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_empty_name() {
        let dto: CreateRecipeDto =
            serde_json::from_str(r#"{"name": "", "cooking_time": 5}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_detail_dto_flags_stale_difficulty() {
        let mut detail = recipe_fixture("Stew", 20, &[("beef", Some(500.0))]);
        detail.recipe.cooking_time = 90;

        let dto = RecipeDetailDto::from(detail);
        assert_eq!(dto.difficulty, Difficulty::Easy);
        assert_eq!(dto.computed_difficulty, Difficulty::Hard);
        assert!(dto.difficulty_is_stale);
        assert_eq!(dto.time_bucket, TimeBucket::Long);
        assert_eq!(dto.ingredients[0].description, "500 grams of beef");
    }
}
