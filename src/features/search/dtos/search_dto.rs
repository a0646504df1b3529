use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::recipes::dtos::RecipeSummaryDto;
use crate::features::search::models::{SearchCriteria, SearchOutcome};
use crate::shared::query::non_blank;

/// Search parameters, accepted as a query string or a JSON body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQueryDto {
    /// Case-insensitive substring of the recipe name
    #[validate(length(max = 200, message = "Recipe name must not exceed 200 characters"))]
    #[serde(default)]
    pub recipe_name: Option<String>,

    /// Case-insensitive substring of any ingredient name
    #[validate(length(max = 100, message = "Ingredient must not exceed 100 characters"))]
    #[serde(default)]
    pub ingredients: Option<String>,

    /// any, easy, medium or hard
    #[serde(default)]
    pub difficulty: Option<String>,

    /// any, quick (<30 min), medium (30-60 min) or long (>60 min)
    #[serde(default)]
    pub cooking_time: Option<String>,

    /// List every recipe when no filter is given
    #[serde(default)]
    pub show_all: bool,
}

impl TryFrom<SearchQueryDto> for SearchCriteria {
    type Error = AppError;

    fn try_from(dto: SearchQueryDto) -> Result<Self, Self::Error> {
        dto.validate()?;

        Ok(SearchCriteria {
            recipe_name: non_blank(dto.recipe_name.as_deref()),
            ingredients: non_blank(dto.ingredients.as_deref()),
            difficulty: dto
                .difficulty
                .as_deref()
                .unwrap_or_default()
                .parse()
                .map_err(AppError::Validation)?,
            cooking_time: dto
                .cooking_time
                .as_deref()
                .unwrap_or_default()
                .parse()
                .map_err(AppError::Validation)?,
            show_all: dto.show_all,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponseDto {
    /// False when no criteria were given
    pub search_performed: bool,
    /// True when a search ran and matched nothing
    pub no_results: bool,
    pub recipes_count: usize,
    pub recipes: Vec<RecipeSummaryDto>,
}

impl From<SearchOutcome> for SearchResponseDto {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::NotPerformed => Self {
                search_performed: false,
                no_results: false,
                recipes_count: 0,
                recipes: Vec::new(),
            },
            SearchOutcome::NoResults => Self {
                search_performed: true,
                no_results: true,
                recipes_count: 0,
                recipes: Vec::new(),
            },
            SearchOutcome::Found(recipes) => Self {
                search_performed: true,
                no_results: false,
                recipes_count: recipes.len(),
                recipes: recipes.iter().map(RecipeSummaryDto::from).collect(),
            },
        }
    }
}

impl SearchResponseDto {
    pub fn message(&self) -> Option<String> {
        if !self.search_performed {
            Some("Enter search criteria or request all recipes".to_string())
        } else if self.no_results {
            Some("No recipes found".to_string())
        } else {
            None
        }
    }
}
