use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;

const CATEGORY_COLUMNS: &str = "id, name, description, image_url, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, description, image_url) VALUES ($1, $2, $3) RETURNING {}",
            CATEGORY_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(dto.description)
        .bind(dto.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "A category with this name already exists"))?;

        tracing::info!("Category {} created ({})", category.id, category.name);
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.description)
        .bind(dto.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "A category with this name already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Category {} updated", id);
        Ok(category.into())
    }

    /// Delete a category. Recipes in it keep existing without a category.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Category {} deleted", id);
        Ok(())
    }
}
