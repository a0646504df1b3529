use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{ListProfilesQuery, ProfileResponseDto, UpdateProfileDto};
use crate::features::profiles::services::ProfileStore;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_my_profile(
    user: AuthenticatedUser,
    State(store): State<Arc<dyn ProfileStore>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = store.get_or_create(&user.user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(ProfileResponseDto::new(profile, user.username.as_deref())),
        None,
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/profile/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_my_profile(
    user: AuthenticatedUser,
    State(store): State<Arc<dyn ProfileStore>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    dto.validate()?;

    let profile = store.update(&user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ProfileResponseDto::new(profile, user.username.as_deref())),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

/// List every profile (admin only)
#[utoipa::path(
    get,
    path = "/api/profiles",
    params(ListProfilesQuery),
    responses(
        (status = 200, description = "List of profiles", body = ApiResponse<Vec<ProfileResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_profiles(
    RequireAdmin(_admin): RequireAdmin,
    State(store): State<Arc<dyn ProfileStore>>,
    AppQuery(query): AppQuery<ListProfilesQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileResponseDto>>>> {
    let profiles = store.list(query.search.as_deref()).await?;
    Ok(Json(ApiResponse::success(
        Some(profiles.into_iter().map(ProfileResponseDto::from).collect()),
        None,
        None,
    )))
}
