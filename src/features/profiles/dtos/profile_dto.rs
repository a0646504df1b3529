use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::profiles::models::UserProfile;
use crate::shared::constants::PROFILE_MIN_BIRTH_YEAR;

/// Request DTO for updating the caller's profile. Omitted fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(max = 500, message = "Bio must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[validate(length(max = 100, message = "Location must not exceed 100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// ISO date, e.g. "1990-05-15"
    #[validate(custom(function = "validate_birth_date"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    /// Remove the stored birth date
    #[serde(default)]
    pub clear_birth_date: bool,

    #[validate(length(max = 50, message = "Favorite cuisine must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_cuisine: Option<String>,
}

fn validate_birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        return Err(ValidationError::new("birth_date_in_future")
            .with_message("Birth date cannot be in the future".into()));
    }
    if date.year() < PROFILE_MIN_BIRTH_YEAR {
        return Err(
            ValidationError::new("birth_date_too_early").with_message(
                format!("Birth date must be in {} or later", PROFILE_MIN_BIRTH_YEAR).into(),
            ),
        );
    }
    Ok(())
}

impl UpdateProfileDto {
    /// Merge the given fields into `profile`; text fields are trimmed
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(bio) = self.bio {
            profile.bio = bio.trim().to_string();
        }
        if let Some(location) = self.location {
            profile.location = location.trim().to_string();
        }
        if self.clear_birth_date {
            profile.birth_date = None;
        } else if let Some(birth_date) = self.birth_date {
            profile.birth_date = Some(birth_date);
        }
        if let Some(cuisine) = self.favorite_cuisine {
            profile.favorite_cuisine = cuisine.trim().to_string();
        }
    }
}

/// Query params for the admin profile listing
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListProfilesQuery {
    /// Case-insensitive substring of the owner id or location
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub owner_id: String,
    /// e.g. "testuser's Profile"
    pub title: String,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub favorite_cuisine: String,
    /// True while nothing has been filled in
    pub is_blank: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileResponseDto {
    pub fn new(profile: UserProfile, username: Option<&str>) -> Self {
        Self {
            title: profile.title(username),
            is_blank: profile.is_blank(),
            id: profile.id,
            owner_id: profile.owner_id,
            bio: profile.bio,
            location: profile.location,
            birth_date: profile.birth_date,
            favorite_cuisine: profile.favorite_cuisine,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<UserProfile> for ProfileResponseDto {
    fn from(profile: UserProfile) -> Self {
        Self::new(profile, None)
    }
}
