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
use crate::features::auth::guards::RequireAdmin;
use crate::features::ingredients::dtos::{
    CreateIngredientDto, IngredientResponseDto, ListIngredientsQuery, UpdateIngredientDto,
};
use crate::features::ingredients::services::IngredientService;
use crate::shared::types::ApiResponse;

/// List ingredients ordered by name
#[utoipa::path(
    get,
    path = "/api/ingredients",
    params(ListIngredientsQuery),
    responses(
        (status = 200, description = "List of ingredients", body = ApiResponse<Vec<IngredientResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "ingredients"
)]
pub async fn list_ingredients(
    State(service): State<Arc<IngredientService>>,
    AppQuery(query): AppQuery<ListIngredientsQuery>,
) -> Result<Json<ApiResponse<Vec<IngredientResponseDto>>>> {
    let ingredients = service.list(query.search.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(ingredients), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient found", body = ApiResponse<IngredientResponseDto>),
        (status = 404, description = "Ingredient not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ingredients"
)]
pub async fn get_ingredient(
    State(service): State<Arc<IngredientService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IngredientResponseDto>>> {
    let ingredient = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(ingredient), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    request_body = CreateIngredientDto,
    responses(
        (status = 201, description = "Ingredient created", body = ApiResponse<IngredientResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "ingredients"
)]
pub async fn create_ingredient(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<IngredientService>>,
    AppJson(dto): AppJson<CreateIngredientDto>,
) -> Result<(StatusCode, Json<ApiResponse<IngredientResponseDto>>)> {
    dto.validate()?;

    let ingredient = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ingredient),
            Some("Ingredient created successfully".to_string()),
            None,
        )),
    ))
}

/// Update an ingredient that is not yet used by any recipe
#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    request_body = UpdateIngredientDto,
    responses(
        (status = 200, description = "Ingredient updated", body = ApiResponse<IngredientResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ingredient not found"),
        (status = 409, description = "Ingredient in use or name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "ingredients"
)]
pub async fn update_ingredient(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<IngredientService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateIngredientDto>,
) -> Result<Json<ApiResponse<IngredientResponseDto>>> {
    dto.validate()?;

    let ingredient = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ingredient),
        Some("Ingredient updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ingredient not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ingredients"
)]
pub async fn delete_ingredient(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<IngredientService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Ingredient deleted successfully".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::ingredients::routes::routes;
    use crate::shared::test_helpers::{admin_user, lazy_pool, test_user, with_authenticated_user};

    // Every request here is rejected before the service touches the pool
    fn server(user: AuthenticatedUser) -> TestServer {
        let service = Arc::new(IngredientService::new(lazy_pool()));
        TestServer::new(with_authenticated_user(routes(service), user)).unwrap()
    }

    #[tokio::test]
    async fn test_writes_require_admin() {
        let server = server(test_user());
        let path = format!("/api/ingredients/{}", Uuid::now_v7());

        server
            .post("/api/ingredients")
            .json(&json!({ "name": "saffron" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .put(&path)
            .json(&json!({ "name": "saffron" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server.delete(&path).await.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let server = server(admin_user());

        let response = server
            .post("/api/ingredients")
            .json(&json!({ "name": "", "unit_of_measure": "200g!" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_rejects_long_name() {
        let response = server(admin_user())
            .put(&format!("/api/ingredients/{}", Uuid::now_v7()))
            .json(&json!({ "name": "x".repeat(101) }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        server(admin_user())
            .delete("/api/ingredients/42")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
