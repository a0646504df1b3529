use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::ingredients::models::Ingredient;
use crate::shared::constants::DEFAULT_UNIT_OF_MEASURE;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateIngredientDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Defaults to "grams"
    #[validate(
        length(min = 1, max = 50, message = "Unit of measure must be 1-50 characters"),
        regex(
            path = "*crate::shared::validation::UNIT_OF_MEASURE_REGEX",
            message = "Unit of measure may only contain letters, spaces, dots and dashes"
        )
    )]
    #[serde(default = "default_unit")]
    pub unit_of_measure: String,
}

fn default_unit() -> String {
    DEFAULT_UNIT_OF_MEASURE.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateIngredientDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "Unit of measure must be 1-50 characters"),
        regex(
            path = "*crate::shared::validation::UNIT_OF_MEASURE_REGEX",
            message = "Unit of measure may only contain letters, spaces, dots and dashes"
        )
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
}

/// Query params for listing ingredients
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListIngredientsQuery {
    /// Case-insensitive substring of the ingredient name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponseDto {
    pub id: Uuid,
    pub name: String,
    pub unit_of_measure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ingredient> for IngredientResponseDto {
    fn from(i: Ingredient) -> Self {
        Self {
            id: i.id,
            name: i.name,
            unit_of_measure: i.unit_of_measure,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
