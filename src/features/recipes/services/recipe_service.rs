use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::recipes::classification::calculate_difficulty;
use crate::features::recipes::dtos::{
    CreateRecipeDto, RecipeDetailDto, RecipeIngredientInputDto, RecipeSummaryDto, UpdateRecipeDto,
};
use crate::features::recipes::models::{CreateRecipe, Recipe, RecipeDetail, RecipeIngredient};
use crate::features::recipes::services::{
    authorize_edit, RecipeLookup, RecipeReader, RecipeStore,
};
use crate::shared::query::{contains_pattern, non_blank};
use crate::shared::types::PaginationQuery;

const RECIPE_SELECT: &str = r#"
    SELECT r.id, r.name, r.description, r.instructions, r.cooking_time, r.servings,
           r.difficulty, r.owner_id, r.category_id, c.name AS category_name,
           r.created_at, r.updated_at
    FROM recipes r
    LEFT JOIN categories c ON c.id = r.category_id
"#;

const RECIPE_ORDER: &str = " ORDER BY r.created_at DESC, r.id DESC";

const DUPLICATE_INGREDIENT: &str = "Ingredient is already part of this recipe";

/// Service for recipe operations
pub struct RecipeService {
    pool: PgPool,
}

impl RecipeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn get_detail(&self, id: Uuid) -> Result<RecipeDetail> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!("{} WHERE r.id = $1", RECIPE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get recipe {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))?;

        let mut details = self.attach_ingredients(vec![recipe]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal("Recipe vanished while loading".to_string()))
    }

    async fn ensure_owner(&self, id: Uuid, user: &AuthenticatedUser) -> Result<()> {
        let owner_id: Option<String> =
            sqlx::query_scalar("SELECT owner_id FROM recipes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to look up owner of recipe {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        authorize_edit(id, owner_id.as_deref(), user)
    }

    /// Load ingredient rows for every recipe in one query, keeping recipe order
    async fn attach_ingredients(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetail>> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
        let rows = sqlx::query_as::<_, RecipeIngredient>(
            r#"
            SELECT ri.recipe_id, ri.ingredient_id, i.name AS ingredient_name,
                   i.unit_of_measure, ri.quantity
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY ri.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load recipe ingredients: {:?}", e);
            AppError::Database(e)
        })?;

        let mut by_recipe: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
        for row in rows {
            by_recipe.entry(row.recipe_id).or_default().push(row);
        }

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let ingredients = by_recipe.remove(&recipe.id).unwrap_or_default();
                RecipeDetail {
                    recipe,
                    ingredients,
                }
            })
            .collect())
    }

    async fn insert_ingredients(
        conn: &mut PgConnection,
        recipe_id: Uuid,
        lines: &[RecipeIngredientInputDto],
    ) -> Result<()> {
        for line in lines {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(recipe_id)
            .bind(line.ingredient_id)
            .bind(line.quantity)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::from_db(e, DUPLICATE_INGREDIENT))?;
        }
        Ok(())
    }

    async fn touch(conn: &mut PgConnection, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE recipes SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to touch recipe {}: {:?}", id, e);
                AppError::Database(e)
            })?;
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for RecipeService {
    async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreateRecipeDto,
    ) -> Result<RecipeDetailDto> {
        let difficulty = dto
            .difficulty
            .unwrap_or_else(|| calculate_difficulty(dto.cooking_time, dto.ingredients.len()));

        let data = CreateRecipe {
            name: dto.name.trim().to_string(),
            description: dto.description,
            instructions: dto.instructions,
            cooking_time: dto.cooking_time,
            servings: dto.servings,
            difficulty,
            owner_id: user.user_id.clone(),
            category_id: dto.category_id,
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO recipes (name, description, instructions, cooking_time, servings, difficulty, owner_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.instructions)
        .bind(data.cooking_time)
        .bind(data.servings)
        .bind(data.difficulty)
        .bind(&data.owner_id)
        .bind(data.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "Recipe already exists"))?;

        Self::insert_ingredients(&mut tx, id, &dto.ingredients).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit recipe {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Recipe {} created by {} with difficulty {}",
            id,
            data.owner_id,
            data.difficulty
        );

        self.get(id).await
    }

    async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<RecipeSummaryDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count recipes: {:?}", e);
                AppError::Database(e)
            })?;

        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            "{}{} LIMIT $1 OFFSET $2",
            RECIPE_SELECT, RECIPE_ORDER
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list recipes: {:?}", e);
            AppError::Database(e)
        })?;

        let details = self.attach_ingredients(recipes).await?;
        Ok((details.iter().map(RecipeSummaryDto::from).collect(), total))
    }

    async fn get(&self, id: Uuid) -> Result<RecipeDetailDto> {
        self.get_detail(id).await.map(RecipeDetailDto::from)
    }

    async fn update(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        dto: UpdateRecipeDto,
    ) -> Result<RecipeDetailDto> {
        self.ensure_owner(id, user).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query(
            r#"
            UPDATE recipes
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                instructions = COALESCE($4, instructions),
                cooking_time = COALESCE($5, cooking_time),
                servings = COALESCE($6, servings),
                difficulty = COALESCE($7, difficulty),
                category_id = CASE WHEN $8 THEN NULL ELSE COALESCE($9, category_id) END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.description.as_deref())
        .bind(dto.instructions.as_deref())
        .bind(dto.cooking_time)
        .bind(dto.servings)
        .bind(dto.difficulty)
        .bind(dto.clear_category)
        .bind(dto.category_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "Recipe already exists"))?;

        if let Some(ingredients) = &dto.ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to clear ingredients of recipe {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

            Self::insert_ingredients(&mut tx, id, ingredients).await?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit recipe {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Recipe {} updated by {}", id, user.user_id);
        self.get(id).await
    }

    async fn delete(&self, id: Uuid, user: &AuthenticatedUser) -> Result<()> {
        self.ensure_owner(id, user).await?;

        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete recipe {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        tracing::info!("Recipe {} deleted by {}", id, user.user_id);
        Ok(())
    }

    async fn add_ingredient(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        input: RecipeIngredientInputDto,
    ) -> Result<RecipeDetailDto> {
        self.ensure_owner(id, user).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        Self::insert_ingredients(&mut tx, id, std::slice::from_ref(&input)).await?;
        Self::touch(&mut tx, id).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit recipe {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        self.get(id).await
    }

    async fn remove_ingredient(
        &self,
        id: Uuid,
        ingredient_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<RecipeDetailDto> {
        self.ensure_owner(id, user).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let removed = sqlx::query(
            "DELETE FROM recipe_ingredients WHERE recipe_id = $1 AND ingredient_id = $2",
        )
        .bind(id)
        .bind(ingredient_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove ingredient from recipe {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .rows_affected();

        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "Ingredient {} is not part of recipe {}",
                ingredient_id, id
            )));
        }

        Self::touch(&mut tx, id).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit recipe {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        self.get(id).await
    }
}

#[async_trait]
impl RecipeReader for RecipeService {
    async fn find_recipes(&self, lookup: &RecipeLookup) -> Result<Vec<RecipeDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(RECIPE_SELECT);
        qb.push(" WHERE TRUE");

        if let Some(name) = non_blank(lookup.name_contains.as_deref()) {
            qb.push(" AND r.name ILIKE ")
                .push_bind(contains_pattern(&name));
        }

        if let Some(ingredient) = non_blank(lookup.ingredient_contains.as_deref()) {
            qb.push(
                " AND EXISTS (SELECT 1 FROM recipe_ingredients ri \
                 JOIN ingredients i ON i.id = ri.ingredient_id \
                 WHERE ri.recipe_id = r.id AND i.name ILIKE ",
            )
            .push_bind(contains_pattern(&ingredient))
            .push(")");
        }

        qb.push(RECIPE_ORDER);

        let recipes = qb
            .build_query_as::<Recipe>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search recipes: {:?}", e);
                AppError::Database(e)
            })?;

        self.attach_ingredients(recipes).await
    }
}
