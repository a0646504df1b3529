use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::UpdateProfileDto;
use crate::features::profiles::models::UserProfile;
use crate::features::profiles::services::ProfileStore;
use crate::shared::query::{contains_pattern, non_blank};

const PROFILE_SELECT: &str = "SELECT id, owner_id, bio, location, birth_date, favorite_cuisine, \
                              created_at, updated_at FROM profiles";

/// Service for user profiles
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a blank profile unless one exists; the unique owner keeps it to one
    async fn ensure_exists(conn: &mut PgConnection, owner_id: &str) -> Result<()> {
        sqlx::query("INSERT INTO profiles (owner_id) VALUES ($1) ON CONFLICT (owner_id) DO NOTHING")
            .bind(owner_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create profile for {}: {:?}", owner_id, e);
                AppError::Database(e)
            })?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for ProfileService {
    async fn get_or_create(&self, owner_id: &str) -> Result<UserProfile> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!("Failed to acquire connection: {:?}", e);
            AppError::Database(e)
        })?;

        Self::ensure_exists(&mut conn, owner_id).await?;

        sqlx::query_as::<_, UserProfile>(&format!("{} WHERE owner_id = $1", PROFILE_SELECT))
            .bind(owner_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get profile for {}: {:?}", owner_id, e);
                AppError::Database(e)
            })
    }

    async fn update(&self, owner_id: &str, dto: UpdateProfileDto) -> Result<UserProfile> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        Self::ensure_exists(&mut tx, owner_id).await?;

        let mut profile = sqlx::query_as::<_, UserProfile>(&format!(
            "{} WHERE owner_id = $1 FOR UPDATE",
            PROFILE_SELECT
        ))
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to lock profile for {}: {:?}", owner_id, e);
            AppError::Database(e)
        })?;

        dto.apply_to(&mut profile);

        let updated = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE profiles
            SET bio = $2, location = $3, birth_date = $4, favorite_cuisine = $5,
                updated_at = NOW()
            WHERE owner_id = $1
            RETURNING id, owner_id, bio, location, birth_date, favorite_cuisine,
                      created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(profile.birth_date)
        .bind(&profile.favorite_cuisine)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile for {}: {:?}", owner_id, e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit profile for {}: {:?}", owner_id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Profile of {} updated", owner_id);
        Ok(updated)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<UserProfile>> {
        let mut qb = QueryBuilder::<Postgres>::new(PROFILE_SELECT);
        if let Some(search) = non_blank(search) {
            let pattern = contains_pattern(&search);
            qb.push(" WHERE owner_id ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR location ILIKE ")
                .push_bind(pattern);
        }
        qb.push(" ORDER BY owner_id");

        qb.build_query_as::<UserProfile>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list profiles: {:?}", e);
                AppError::Database(e)
            })
    }
}
