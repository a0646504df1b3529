use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::ingredients::dtos::{
    CreateIngredientDto, IngredientResponseDto, UpdateIngredientDto,
};
use crate::features::ingredients::models::Ingredient;
use crate::shared::query::{contains_pattern, non_blank};

const INGREDIENT_SELECT: &str =
    "SELECT id, name, unit_of_measure, created_at, updated_at FROM ingredients";

const DUPLICATE_NAME: &str = "An ingredient with this name already exists";

/// Service for the ingredient catalog
pub struct IngredientService {
    pool: PgPool,
}

impl IngredientService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List ingredients ordered by name, optionally filtered by a name substring
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<IngredientResponseDto>> {
        let mut qb = QueryBuilder::<Postgres>::new(INGREDIENT_SELECT);
        if let Some(search) = non_blank(search) {
            qb.push(" WHERE name ILIKE ")
                .push_bind(contains_pattern(&search));
        }
        qb.push(" ORDER BY name");

        let ingredients = qb
            .build_query_as::<Ingredient>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list ingredients: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(ingredients.into_iter().map(|i| i.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<IngredientResponseDto> {
        self.find(id).await.map(|i| i.into())
    }

    pub async fn create(&self, dto: CreateIngredientDto) -> Result<IngredientResponseDto> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (name, unit_of_measure)
            VALUES ($1, $2)
            RETURNING id, name, unit_of_measure, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.unit_of_measure.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, DUPLICATE_NAME))?;

        tracing::info!("Ingredient {} created ({})", ingredient.id, ingredient.name);
        Ok(ingredient.into())
    }

    /// Update an ingredient that no recipe uses yet.
    ///
    /// The row is locked for the whole check-then-update; attaching the
    /// ingredient to a recipe needs a key-share lock on the same row, so it
    /// waits for this transaction and cannot slip in between.
    pub async fn update(&self, id: Uuid, dto: UpdateIngredientDto) -> Result<IngredientResponseDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM ingredients WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to lock ingredient {}: {:?}", id, e);
                    AppError::Database(e)
                })?;
        if locked.is_none() {
            return Err(AppError::NotFound(format!("Ingredient {} not found", id)));
        }

        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM recipe_ingredients WHERE ingredient_id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check usage of ingredient {}: {:?}", id, e);
            AppError::Database(e)
        })?;
        ensure_unreferenced(id, referenced)?;

        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            UPDATE ingredients
            SET name = COALESCE($2, name),
                unit_of_measure = COALESCE($3, unit_of_measure),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, unit_of_measure, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.unit_of_measure.as_deref().map(str::trim))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, DUPLICATE_NAME))?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit ingredient {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Ingredient {} updated", id);
        Ok(ingredient.into())
    }

    /// Delete an ingredient; its recipe associations go with it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete ingredient {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Ingredient {} not found", id)));
        }

        tracing::info!("Ingredient {} deleted", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Ingredient> {
        sqlx::query_as::<_, Ingredient>(&format!("{} WHERE id = $1", INGREDIENT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get ingredient {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Ingredient {} not found", id)))
    }
}

fn ensure_unreferenced(id: Uuid, referenced: bool) -> Result<()> {
    if referenced {
        return Err(AppError::Conflict(format!(
            "Ingredient {} is used by a recipe and can no longer be changed",
            id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_ingredient_is_conflict() {
        let id = Uuid::now_v7();
        assert!(ensure_unreferenced(id, false).is_ok());
        assert!(matches!(
            ensure_unreferenced(id, true),
            Err(AppError::Conflict(_))
        ));
    }

    /// Runs against a real database: `DATABASE_URL=... cargo test -- --ignored`
    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_update_after_attach_is_conflict(pool: PgPool) {
        let service = IngredientService::new(pool.clone());
        let basil = service
            .create(CreateIngredientDto {
                name: "basil".to_string(),
                unit_of_measure: "leaves".to_string(),
            })
            .await
            .unwrap();

        let recipe_id: Uuid = sqlx::query_scalar(
            "INSERT INTO recipes (name, cooking_time, servings, difficulty, owner_id) \
             VALUES ('Pesto', 10, 2, 'Easy', 'cook') RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let renamed = service
            .update(
                basil.id,
                UpdateIngredientDto {
                    name: Some("sweet basil".to_string()),
                    unit_of_measure: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "sweet basil");

        sqlx::query("INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(basil.id)
            .execute(&pool)
            .await
            .unwrap();

        let result = service
            .update(basil.id, UpdateIngredientDto::default())
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let missing = service
            .update(Uuid::now_v7(), UpdateIngredientDto::default())
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
