use sha2::{Digest, Sha256};

use crate::features::recipes::classification::TimeBucket;
use crate::features::recipes::models::{Difficulty, RecipeDetail};

/// Aggregates over a recipe collection
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStats {
    pub total: usize,
    /// Computed difficulty counts, most frequent first, zero counts left out
    pub difficulty_counts: Vec<(Difficulty, usize)>,
    /// Counts for every bucket in quick, medium, long order
    pub time_bucket_counts: Vec<(TimeBucket, usize)>,
    /// Mean cooking time in minutes, one decimal
    pub avg_cooking_time: f64,
}

impl RecipeStats {
    pub fn from_recipes(recipes: &[RecipeDetail]) -> Self {
        let mut difficulty_counts: Vec<(Difficulty, usize)> = Difficulty::ALL
            .into_iter()
            .map(|d| {
                let count = recipes
                    .iter()
                    .filter(|r| r.computed_difficulty() == d)
                    .count();
                (d, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();
        // Stable, so ties stay in Easy, Medium, Hard order
        difficulty_counts.sort_by(|a, b| b.1.cmp(&a.1));

        let time_bucket_counts = TimeBucket::ALL
            .into_iter()
            .map(|b| (b, recipes.iter().filter(|r| r.time_bucket() == b).count()))
            .collect();

        Self {
            total: recipes.len(),
            difficulty_counts,
            time_bucket_counts,
            avg_cooking_time: average_minutes(recipes),
        }
    }
}

fn average_minutes(recipes: &[RecipeDetail]) -> f64 {
    if recipes.is_empty() {
        return 0.0;
    }
    let sum: i64 = recipes.iter().map(|r| r.recipe.cooking_time as i64).sum();
    let mean = sum as f64 / recipes.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// One bar of the per-recipe cooking time chart
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeTime {
    pub name: String,
    pub cooking_time: i32,
    pub bucket: TimeBucket,
}

impl RecipeTime {
    /// Chart rows sorted by ascending cooking time
    pub fn sorted_from(recipes: &[RecipeDetail]) -> Vec<RecipeTime> {
        let mut times: Vec<RecipeTime> = recipes
            .iter()
            .map(|r| RecipeTime {
                name: r.recipe.name.clone(),
                cooking_time: r.recipe.cooking_time,
                bucket: r.time_bucket(),
            })
            .collect();
        times.sort_by_key(|t| t.cooking_time);
        times
    }
}

/// SHA-256 over what the analytics depend on; any recipe write changes it
pub fn fingerprint(recipes: &[RecipeDetail]) -> String {
    let mut hasher = Sha256::new();
    for r in recipes {
        hasher.update(r.recipe.id.as_bytes());
        hasher.update(r.recipe.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(r.recipe.cooking_time.to_le_bytes());
        hasher.update((r.ingredients.len() as u64).to_le_bytes());
        hasher.update(r.recipe.updated_at.timestamp_micros().to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
