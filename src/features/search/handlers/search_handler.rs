use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::search::dtos::{SearchQueryDto, SearchResponseDto};
use crate::features::search::models::SearchCriteria;
use crate::features::search::services::SearchService;
use crate::shared::types::ApiResponse;

async fn run_search(
    service: &SearchService,
    dto: SearchQueryDto,
) -> Result<Json<ApiResponse<SearchResponseDto>>> {
    let criteria = SearchCriteria::try_from(dto)?;
    let response = SearchResponseDto::from(service.search(&criteria).await?);
    let message = response.message();
    Ok(Json(ApiResponse::success(Some(response), message, None)))
}

/// Search recipes by query string
#[utoipa::path(
    get,
    path = "/api/recipes/search",
    params(SearchQueryDto),
    responses(
        (status = 200, description = "Search outcome", body = ApiResponse<SearchResponseDto>),
        (status = 400, description = "Unknown difficulty or cooking time"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "search"
)]
pub async fn search_recipes(
    State(service): State<Arc<SearchService>>,
    AppQuery(dto): AppQuery<SearchQueryDto>,
) -> Result<Json<ApiResponse<SearchResponseDto>>> {
    run_search(&service, dto).await
}

/// Search recipes with a JSON body
#[utoipa::path(
    post,
    path = "/api/recipes/search",
    request_body = SearchQueryDto,
    responses(
        (status = 200, description = "Search outcome", body = ApiResponse<SearchResponseDto>),
        (status = 400, description = "Unknown difficulty or cooking time"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "search"
)]
pub async fn search_recipes_json(
    State(service): State<Arc<SearchService>>,
    AppJson(dto): AppJson<SearchQueryDto>,
) -> Result<Json<ApiResponse<SearchResponseDto>>> {
    run_search(&service, dto).await
}
