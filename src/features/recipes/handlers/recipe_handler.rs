use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::recipes::dtos::{
    CreateRecipeDto, RecipeDetailDto, RecipeIngredientInputDto, RecipeSummaryDto, UpdateRecipeDto,
};
use crate::features::recipes::services::RecipeStore;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = CreateRecipeDto,
    responses(
        (status = 201, description = "Recipe created", body = ApiResponse<RecipeDetailDto>),
        (status = 400, description = "Validation error or unknown category/ingredient"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Ingredient listed twice")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn create_recipe(
    user: AuthenticatedUser,
    State(service): State<Arc<dyn RecipeStore>>,
    AppJson(dto): AppJson<CreateRecipeDto>,
) -> Result<(StatusCode, Json<ApiResponse<RecipeDetailDto>>)> {
    dto.validate()?;

    let recipe = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(recipe),
            Some("Recipe created successfully".to_string()),
            None,
        )),
    ))
}

/// List recipes, most recent first
#[utoipa::path(
    get,
    path = "/api/recipes",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of recipes", body = ApiResponse<Vec<RecipeSummaryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn list_recipes(
    State(service): State<Arc<dyn RecipeStore>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<RecipeSummaryDto>>>> {
    let (recipes, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(recipes),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe found", body = ApiResponse<RecipeDetailDto>),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn get_recipe(
    State(service): State<Arc<dyn RecipeStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RecipeDetailDto>>> {
    let recipe = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(recipe), None, None)))
}

/// Update a recipe (owner only)
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeDto,
    responses(
        (status = 200, description = "Recipe updated", body = ApiResponse<RecipeDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn update_recipe(
    user: AuthenticatedUser,
    State(service): State<Arc<dyn RecipeStore>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRecipeDto>,
) -> Result<Json<ApiResponse<RecipeDetailDto>>> {
    dto.validate()?;

    let recipe = service.update(id, &user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(recipe),
        Some("Recipe updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn delete_recipe(
    user: AuthenticatedUser,
    State(service): State<Arc<dyn RecipeStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Recipe deleted successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/ingredients",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipeIngredientInputDto,
    responses(
        (status = 200, description = "Ingredient added", body = ApiResponse<RecipeDetailDto>),
        (status = 400, description = "Validation error or unknown ingredient"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Recipe not found"),
        (status = 409, description = "Ingredient already part of the recipe")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn add_recipe_ingredient(
    user: AuthenticatedUser,
    State(service): State<Arc<dyn RecipeStore>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RecipeIngredientInputDto>,
) -> Result<Json<ApiResponse<RecipeDetailDto>>> {
    dto.validate()?;

    let recipe = service.add_ingredient(id, &user, dto).await?;
    Ok(Json(ApiResponse::success(Some(recipe), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/ingredients/{ingredient_id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID"),
        ("ingredient_id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient removed", body = ApiResponse<RecipeDetailDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Recipe or association not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
pub async fn remove_recipe_ingredient(
    user: AuthenticatedUser,
    State(service): State<Arc<dyn RecipeStore>>,
    Path((id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<RecipeDetailDto>>> {
    let recipe = service.remove_ingredient(id, ingredient_id, &user).await?;
    Ok(Json(ApiResponse::success(Some(recipe), None, None)))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::recipes::routes::routes;
    use crate::shared::test_helpers::{
        foreign_recipe, sample_recipes, test_user, with_authenticated_user, InMemoryRecipes,
    };

    fn server_with(store: Arc<InMemoryRecipes>) -> TestServer {
        TestServer::new(with_authenticated_user(routes(store), test_user())).unwrap()
    }

    fn store() -> Arc<InMemoryRecipes> {
        let mut recipes = sample_recipes();
        recipes.push(foreign_recipe("Borrowed Curry", 50));
        Arc::new(InMemoryRecipes::new(recipes))
    }

    async fn first_recipe(server: &TestServer, name: &str) -> Value {
        let body: Value = server
            .get("/api/recipes")
            .add_query_param("page_size", 100)
            .await
            .json();
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["name"] == name)
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_negative_cooking_time() {
        let store = store();
        let server = server_with(store.clone());

        let response = server
            .post("/api/recipes")
            .json(&json!({ "name": "Toast", "cooking_time": -5 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(store.count(), 4);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_servings() {
        let response = server_with(store())
            .post("/api/recipes")
            .json(&json!({ "name": "Toast", "cooking_time": 5, "servings": -2 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_body() {
        let response = server_with(store())
            .post("/api/recipes")
            .json(&json!({ "name": "Toast", "cooking_time": "soon" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_derives_difficulty() {
        let server = server_with(store());
        let pizza_id = first_recipe(&server, "Margherita Pizza").await["id"].clone();
        let detail: Value = server
            .get(&format!("/api/recipes/{}", pizza_id.as_str().unwrap()))
            .await
            .json();
        let cheese = detail["data"]["ingredients"][1]["ingredient_id"].clone();

        let response = server
            .post("/api/recipes")
            .json(&json!({
                "name": "Cheese Toast",
                "cooking_time": 8,
                "ingredients": [{ "ingredient_id": cheese, "quantity": 50.0 }]
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["difficulty"], "Easy");
        assert_eq!(body["data"]["owner_id"], "test-cook");
        assert_eq!(body["data"]["ingredients"][0]["description"], "50 grams of cheese");
    }

    #[tokio::test]
    async fn test_create_with_unknown_ingredient_is_bad_request() {
        let response = server_with(store())
            .post("/api/recipes")
            .json(&json!({
                "name": "Mystery Stew",
                "cooking_time": 40,
                "ingredients": [{ "ingredient_id": Uuid::now_v7() }]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_is_paginated() {
        let response = server_with(store())
            .get("/api/recipes")
            .add_query_param("page", 2)
            .add_query_param("page_size", 3)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 4);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_not_found() {
        let server = server_with(store());
        let missing = Uuid::now_v7();

        server
            .get(&format!("/api/recipes/{}", missing))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .put(&format!("/api/recipes/{}", missing))
            .json(&json!({ "cooking_time": 20 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/recipes/{}", missing))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_recipe_id_is_bad_request() {
        server_with(store())
            .get("/api/recipes/not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_only_owner_can_edit() {
        let server = server_with(store());
        let curry = first_recipe(&server, "Borrowed Curry").await;
        let path = format!("/api/recipes/{}", curry["id"].as_str().unwrap());

        server
            .put(&path)
            .json(&json!({ "name": "My Curry" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server.delete(&path).await.assert_status(StatusCode::FORBIDDEN);

        // Reading is open to everyone
        server.get(&path).await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_update_rejects_negative_cooking_time() {
        let server = server_with(store());
        let steak = first_recipe(&server, "Grilled Steak").await;

        server
            .put(&format!("/api/recipes/{}", steak["id"].as_str().unwrap()))
            .json(&json!({ "cooking_time": -5 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_keeps_stored_difficulty() {
        let server = server_with(store());
        let pasta = first_recipe(&server, "Cheese Pasta").await;

        let response = server
            .put(&format!("/api/recipes/{}", pasta["id"].as_str().unwrap()))
            .json(&json!({ "cooking_time": 90 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["cooking_time"], 90);
        assert_eq!(body["data"]["difficulty"], "Easy");
        assert_eq!(body["data"]["computed_difficulty"], "Hard");
        assert_eq!(body["data"]["difficulty_is_stale"], true);
    }

    #[tokio::test]
    async fn test_delete_own_recipe() {
        let store = store();
        let server = server_with(store.clone());
        let steak = first_recipe(&server, "Grilled Steak").await;
        let path = format!("/api/recipes/{}", steak["id"].as_str().unwrap());

        server.delete(&path).await.assert_status_ok();
        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(store.count(), 3);
    }

    #[tokio::test]
    async fn test_ingredient_associations() {
        let server = server_with(store());
        let pizza = first_recipe(&server, "Margherita Pizza").await;
        let path = format!("/api/recipes/{}", pizza["id"].as_str().unwrap());
        let detail: Value = server.get(&path).await.json();
        let tomato = detail["data"]["ingredients"][0]["ingredient_id"]
            .as_str()
            .unwrap()
            .to_string();

        // Already attached
        server
            .post(&format!("{}/ingredients", path))
            .json(&json!({ "ingredient_id": tomato }))
            .await
            .assert_status(StatusCode::CONFLICT);

        let response = server
            .delete(&format!("{}/ingredients/{}", path, tomato))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["ingredient_summary"], "150 grams of cheese");

        server
            .delete(&format!("{}/ingredients/{}", path, tomato))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .post(&format!("{}/ingredients", path))
            .json(&json!({ "ingredient_id": tomato, "quantity": -1.0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
