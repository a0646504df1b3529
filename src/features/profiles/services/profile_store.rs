use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::profiles::dtos::UpdateProfileDto;
use crate::features::profiles::models::UserProfile;

/// Profile persistence as used by the profile handlers
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The owner's profile, created blank on first access
    async fn get_or_create(&self, owner_id: &str) -> Result<UserProfile>;

    /// Merge `dto` into the owner's profile, creating it when missing
    async fn update(&self, owner_id: &str, dto: UpdateProfileDto) -> Result<UserProfile>;

    /// Profiles ordered by owner, optionally filtered by owner id or location
    async fn list(&self, search: Option<&str>) -> Result<Vec<UserProfile>>;
}
