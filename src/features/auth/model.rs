use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role allowed to manage the ingredient and category catalogs
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Subject claim; recipes are owned by this id
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Whether this user owns a record created by `owner_id`
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}
