use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for ingredient
#[derive(Debug, Clone, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub unit_of_measure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
