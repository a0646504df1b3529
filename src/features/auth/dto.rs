use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::AuthenticatedUser;

/// DTO for /api/auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub user_id: String,
    pub username: Option<String>,
    pub roles: Vec<String>,
    pub is_admin: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        let is_admin = user.is_admin();
        Self {
            user_id: user.user_id,
            username: user.username,
            roles: user.roles,
            is_admin,
        }
    }
}
