use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a user's cooking profile
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    /// Token subject of the user this profile belongs to
    pub owner_id: String,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub favorite_cuisine: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile with every field empty
    pub fn blank(owner_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            owner_id: owner_id.to_string(),
            bio: String::new(),
            location: String::new(),
            birth_date: None,
            favorite_cuisine: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.bio.is_empty()
            && self.location.is_empty()
            && self.birth_date.is_none()
            && self.favorite_cuisine.is_empty()
    }

    /// e.g. "testuser's Profile"
    pub fn title(&self, username: Option<&str>) -> String {
        format!("{}'s Profile", username.unwrap_or(&self.owner_id))
    }
}
