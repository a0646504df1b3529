use std::sync::Mutex;

use async_trait::async_trait;
use axum::{Extension, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, ROLE_ADMIN};
use crate::features::recipes::classification::calculate_difficulty;
use crate::features::recipes::dtos::{
    CreateRecipeDto, RecipeDetailDto, RecipeIngredientInputDto, RecipeSummaryDto, UpdateRecipeDto,
};
use crate::features::recipes::models::{Recipe, RecipeDetail, RecipeIngredient};
use crate::features::recipes::services::{
    authorize_edit, RecipeLookup, RecipeReader, RecipeStore,
};
use crate::shared::constants::DEFAULT_UNIT_OF_MEASURE;
use crate::shared::types::PaginationQuery;

pub const TEST_SECRET: &str = "test-signing-secret-for-recipe-box";
pub const TEST_ISSUER: &str = "https://id.recipe-box.test";
pub const TEST_AUDIENCE: &str = "recipe-box-api";

// =============================================================================
// AUTH
// =============================================================================

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: &'a str,
    iss: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
    preferred_username: &'a str,
    roles: Vec<String>,
}

/// Sign an HS256 token expiring `exp_offset_secs` from now (negative for expired)
pub fn issue_token(sub: &str, roles: &[&str], secret: &str, exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = TestClaims {
        sub,
        iss: TEST_ISSUER,
        aud: TEST_AUDIENCE,
        exp: now + exp_offset_secs,
        iat: now,
        preferred_username: sub,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token should encode")
}

pub fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "test-cook".to_string(),
        username: Some("test-cook".to_string()),
        roles: vec![],
    }
}

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "test-admin".to_string(),
        username: Some("test-admin".to_string()),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

/// Serve `router` as if `user` had passed the auth middleware
pub fn with_authenticated_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(Extension(user))
}

/// Pool that never connects, for routes that must fail before any query runs
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://recipe_box@localhost/recipe_box_test")
        .expect("lazy pool")
}

// =============================================================================
// RECIPES
// =============================================================================

/// Recipe with the given ingredients `(name, quantity)`, difficulty as on first save
pub fn recipe_fixture(
    name: &str,
    cooking_time: i32,
    ingredients: &[(&str, Option<f64>)],
) -> RecipeDetail {
    let id = Uuid::now_v7();
    let now = Utc::now();

    RecipeDetail {
        recipe: Recipe {
            id,
            name: name.to_string(),
            description: String::new(),
            instructions: String::new(),
            cooking_time,
            servings: 1,
            difficulty: calculate_difficulty(cooking_time, ingredients.len()),
            owner_id: test_user().user_id,
            category_id: None,
            category_name: None,
            created_at: now,
            updated_at: now,
        },
        ingredients: ingredients
            .iter()
            .map(|(ingredient, quantity)| RecipeIngredient {
                recipe_id: id,
                ingredient_id: Uuid::now_v7(),
                ingredient_name: ingredient.to_string(),
                unit_of_measure: DEFAULT_UNIT_OF_MEASURE.to_string(),
                quantity: *quantity,
            })
            .collect(),
    }
}

/// Shift a fixture's creation time into the past
pub fn created_minutes_ago(mut detail: RecipeDetail, minutes: i64) -> RecipeDetail {
    detail.recipe.created_at = Utc::now() - Duration::minutes(minutes);
    detail.recipe.updated_at = detail.recipe.created_at;
    detail
}

/// Pizza (25 min; tomato, cheese), pasta (15 min; cheese), steak (45 min), newest first
pub fn sample_recipes() -> Vec<RecipeDetail> {
    vec![
        created_minutes_ago(
            recipe_fixture(
                "Margherita Pizza",
                25,
                &[("tomato", Some(200.0)), ("cheese", Some(150.0))],
            ),
            1,
        ),
        created_minutes_ago(recipe_fixture("Cheese Pasta", 15, &[("cheese", None)]), 2),
        created_minutes_ago(recipe_fixture("Grilled Steak", 45, &[]), 3),
    ]
}

/// Fixture recipe owned by someone other than [`test_user`]
pub fn foreign_recipe(name: &str, cooking_time: i32) -> RecipeDetail {
    let mut detail = recipe_fixture(name, cooking_time, &[]);
    detail.recipe.owner_id = "another-cook".to_string();
    detail
}

/// In-memory recipe store with the same matching and ownership rules as the
/// database-backed service.
///
/// Ingredient ids are resolved against the ingredients already attached to
/// stored recipes; anything else behaves like a foreign key violation.
#[derive(Default)]
pub struct InMemoryRecipes {
    recipes: Mutex<Vec<RecipeDetail>>,
}

impl InMemoryRecipes {
    pub fn new(recipes: Vec<RecipeDetail>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
        }
    }

    pub fn replace(&self, recipes: Vec<RecipeDetail>) {
        *self.recipes.lock().unwrap() = recipes;
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl RecipeReader for InMemoryRecipes {
    async fn find_recipes(&self, lookup: &RecipeLookup) -> Result<Vec<RecipeDetail>> {
        let mut found: Vec<RecipeDetail> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|d| {
                lookup
                    .name_contains
                    .as_deref()
                    .is_none_or(|name| contains_ignore_case(&d.recipe.name, name))
            })
            .filter(|d| {
                lookup.ingredient_contains.as_deref().is_none_or(|needle| {
                    d.ingredients
                        .iter()
                        .any(|i| contains_ignore_case(&i.ingredient_name, needle))
                })
            })
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.recipe
                .created_at
                .cmp(&a.recipe.created_at)
                .then_with(|| b.recipe.id.cmp(&a.recipe.id))
        });
        Ok(found)
    }
}

impl InMemoryRecipes {
    pub fn count(&self) -> usize {
        self.recipes.lock().unwrap().len()
    }

    fn detail(&self, id: Uuid) -> Result<RecipeDetail> {
        self.recipes
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.recipe.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }

    fn owner_of(&self, id: Uuid) -> Option<String> {
        self.recipes
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.recipe.id == id)
            .map(|d| d.recipe.owner_id.clone())
    }

    fn lines(
        &self,
        recipe_id: Uuid,
        inputs: &[RecipeIngredientInputDto],
    ) -> Result<Vec<RecipeIngredient>> {
        let recipes = self.recipes.lock().unwrap();
        let mut lines: Vec<RecipeIngredient> = Vec::new();

        for input in inputs {
            if lines.iter().any(|l| l.ingredient_id == input.ingredient_id) {
                return Err(AppError::Conflict(
                    "Ingredient is already part of this recipe".to_string(),
                ));
            }
            let known = recipes
                .iter()
                .flat_map(|d| d.ingredients.iter())
                .find(|i| i.ingredient_id == input.ingredient_id)
                .ok_or_else(|| {
                    AppError::BadRequest("Referenced record does not exist".to_string())
                })?;

            lines.push(RecipeIngredient {
                recipe_id,
                ingredient_id: known.ingredient_id,
                ingredient_name: known.ingredient_name.clone(),
                unit_of_measure: known.unit_of_measure.clone(),
                quantity: input.quantity,
            });
        }
        Ok(lines)
    }

    fn modify(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut RecipeDetail),
    ) -> Result<RecipeDetailDto> {
        let mut recipes = self.recipes.lock().unwrap();
        let detail = recipes
            .iter_mut()
            .find(|d| d.recipe.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))?;
        change(detail);
        detail.recipe.updated_at = Utc::now();
        Ok(RecipeDetailDto::from(detail.clone()))
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipes {
    async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreateRecipeDto,
    ) -> Result<RecipeDetailDto> {
        if dto.category_id.is_some() {
            return Err(AppError::BadRequest(
                "Referenced record does not exist".to_string(),
            ));
        }

        let id = Uuid::now_v7();
        let ingredients = self.lines(id, &dto.ingredients)?;
        let now = Utc::now();
        let detail = RecipeDetail {
            recipe: Recipe {
                id,
                name: dto.name.trim().to_string(),
                description: dto.description,
                instructions: dto.instructions,
                cooking_time: dto.cooking_time,
                servings: dto.servings,
                difficulty: dto
                    .difficulty
                    .unwrap_or_else(|| calculate_difficulty(dto.cooking_time, ingredients.len())),
                owner_id: user.user_id.clone(),
                category_id: None,
                category_name: None,
                created_at: now,
                updated_at: now,
            },
            ingredients,
        };

        self.recipes.lock().unwrap().insert(0, detail.clone());
        Ok(detail.into())
    }

    async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<RecipeSummaryDto>, i64)> {
        let all = self.find_recipes(&RecipeLookup::all()).await?;
        let page = all
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(RecipeSummaryDto::from)
            .collect();
        Ok((page, all.len() as i64))
    }

    async fn get(&self, id: Uuid) -> Result<RecipeDetailDto> {
        self.detail(id).map(RecipeDetailDto::from)
    }

    async fn update(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        dto: UpdateRecipeDto,
    ) -> Result<RecipeDetailDto> {
        authorize_edit(id, self.owner_of(id).as_deref(), user)?;
        let ingredients = match &dto.ingredients {
            Some(inputs) => Some(self.lines(id, inputs)?),
            None => None,
        };

        self.modify(id, |d| {
            let r = &mut d.recipe;
            if let Some(name) = dto.name {
                r.name = name.trim().to_string();
            }
            if let Some(description) = dto.description {
                r.description = description;
            }
            if let Some(instructions) = dto.instructions {
                r.instructions = instructions;
            }
            if let Some(cooking_time) = dto.cooking_time {
                r.cooking_time = cooking_time;
            }
            if let Some(servings) = dto.servings {
                r.servings = servings;
            }
            if let Some(difficulty) = dto.difficulty {
                r.difficulty = difficulty;
            }
            if dto.clear_category {
                r.category_id = None;
                r.category_name = None;
            }
            if let Some(ingredients) = ingredients {
                d.ingredients = ingredients;
            }
        })
    }

    async fn delete(&self, id: Uuid, user: &AuthenticatedUser) -> Result<()> {
        authorize_edit(id, self.owner_of(id).as_deref(), user)?;
        self.recipes.lock().unwrap().retain(|d| d.recipe.id != id);
        Ok(())
    }

    async fn add_ingredient(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        input: RecipeIngredientInputDto,
    ) -> Result<RecipeDetailDto> {
        authorize_edit(id, self.owner_of(id).as_deref(), user)?;
        let existing = self.detail(id)?;
        if existing
            .ingredients
            .iter()
            .any(|i| i.ingredient_id == input.ingredient_id)
        {
            return Err(AppError::Conflict(
                "Ingredient is already part of this recipe".to_string(),
            ));
        }
        let mut added = self.lines(id, std::slice::from_ref(&input))?;

        self.modify(id, |d| d.ingredients.append(&mut added))
    }

    async fn remove_ingredient(
        &self,
        id: Uuid,
        ingredient_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<RecipeDetailDto> {
        authorize_edit(id, self.owner_of(id).as_deref(), user)?;
        if !self
            .detail(id)?
            .ingredients
            .iter()
            .any(|i| i.ingredient_id == ingredient_id)
        {
            return Err(AppError::NotFound(format!(
                "Ingredient {} is not part of recipe {}",
                ingredient_id, id
            )));
        }

        self.modify(id, |d| d.ingredients.retain(|i| i.ingredient_id != ingredient_id))
    }
}
