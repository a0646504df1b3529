use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::recipes::dtos::{
    CreateRecipeDto, RecipeDetailDto, RecipeIngredientInputDto, RecipeSummaryDto, UpdateRecipeDto,
};
use crate::shared::types::PaginationQuery;

/// Recipe CRUD as served by the recipe handlers
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Create a recipe owned by `user`, deriving difficulty when not given
    async fn create(&self, user: &AuthenticatedUser, dto: CreateRecipeDto)
        -> Result<RecipeDetailDto>;

    /// Page of recipes, most recent first, with the total count
    async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<RecipeSummaryDto>, i64)>;

    async fn get(&self, id: Uuid) -> Result<RecipeDetailDto>;

    /// Partial update. Only the owner may edit.
    async fn update(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        dto: UpdateRecipeDto,
    ) -> Result<RecipeDetailDto>;

    /// Delete a recipe and its ingredient associations. Only the owner may delete.
    async fn delete(&self, id: Uuid, user: &AuthenticatedUser) -> Result<()>;

    async fn add_ingredient(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        input: RecipeIngredientInputDto,
    ) -> Result<RecipeDetailDto>;

    async fn remove_ingredient(
        &self,
        id: Uuid,
        ingredient_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<RecipeDetailDto>;
}

/// Edit check for recipe `id` whose owner lookup returned `owner_id`
pub fn authorize_edit(id: Uuid, owner_id: Option<&str>, user: &AuthenticatedUser) -> Result<()> {
    match owner_id {
        None => Err(AppError::NotFound(format!("Recipe {} not found", id))),
        Some(owner_id) if !user.owns(owner_id) => Err(AppError::Forbidden(
            "Only the owner can modify this recipe".to_string(),
        )),
        Some(_) => Ok(()),
    }
}
