use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::analytics::dtos::AnalyticsDto;
use crate::features::analytics::services::AnalyticsService;
use crate::shared::types::ApiResponse;

/// Recipe statistics and charts
#[utoipa::path(
    get,
    path = "/api/recipes/analytics",
    responses(
        (status = 200, description = "Analytics report", body = ApiResponse<AnalyticsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Chart rendering failed")
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_analytics(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<ApiResponse<AnalyticsDto>>> {
    let report = service.report().await?;
    let message = report.message.clone();
    Ok(Json(ApiResponse::success(Some(report), message, None)))
}
