//! Difficulty classification and cooking-time buckets.
//!
//! Both are pure and total over every `(cooking_time, ingredient_count)` pair.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::features::recipes::models::Difficulty;
use crate::shared::constants::{
    EASY_MAX_INGREDIENTS, MEDIUM_MAX_INGREDIENTS, MEDIUM_MAX_MINUTES, QUICK_MAX_MINUTES,
};

/// Classify a recipe from its cooking time (minutes) and ingredient count.
///
/// - Easy: under 30 minutes and at most 5 ingredients
/// - Medium: at most 60 minutes and at most 10 ingredients
/// - Hard: everything else
pub fn calculate_difficulty(cooking_time: i32, ingredient_count: usize) -> Difficulty {
    if cooking_time < QUICK_MAX_MINUTES && ingredient_count <= EASY_MAX_INGREDIENTS {
        Difficulty::Easy
    } else if cooking_time <= MEDIUM_MAX_MINUTES && ingredient_count <= MEDIUM_MAX_INGREDIENTS {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

/// Cooking-time bucket: quick (< 30), medium (30..=60), long (> 60)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Quick,
    Medium,
    Long,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 3] = [TimeBucket::Quick, TimeBucket::Medium, TimeBucket::Long];

    pub fn from_minutes(cooking_time: i32) -> Self {
        if cooking_time < QUICK_MAX_MINUTES {
            TimeBucket::Quick
        } else if cooking_time <= MEDIUM_MAX_MINUTES {
            TimeBucket::Medium
        } else {
            TimeBucket::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBucket::Quick => "quick",
            TimeBucket::Medium => "medium",
            TimeBucket::Long => "long",
        }
    }

    /// Human label used on charts
    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Quick => "Quick (<30 min)",
            TimeBucket::Medium => "Medium (30-60 min)",
            TimeBucket::Long => "Long (>60 min)",
        }
    }
}

impl std::fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeBucket::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown cooking time '{}'", s))
    }
}
