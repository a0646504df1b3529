use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::analytics::charts::RenderedCharts;
use crate::features::analytics::models::RecipeStats;
use crate::features::recipes::classification::TimeBucket;
use crate::features::recipes::models::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DifficultyCountDto {
    pub difficulty: Difficulty,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeBucketCountDto {
    pub bucket: TimeBucket,
    pub label: String,
    pub count: usize,
}

/// Chart images as `data:image/svg+xml;base64,...` URIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartsDto {
    /// Bar chart of recipes per difficulty
    pub difficulty_chart: String,
    /// Pie chart of cooking time buckets
    pub time_bucket_chart: String,
    /// Horizontal bars of every recipe's cooking time
    pub recipe_times_chart: String,
}

impl From<RenderedCharts> for ChartsDto {
    fn from(c: RenderedCharts) -> Self {
        Self {
            difficulty_chart: c.difficulty_chart,
            time_bucket_chart: c.time_bucket_chart,
            recipe_times_chart: c.recipe_times_chart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsDto {
    pub total_recipes: usize,
    pub has_recipes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Most frequent first
    pub difficulty_counts: Vec<DifficultyCountDto>,
    pub time_bucket_counts: Vec<TimeBucketCountDto>,
    /// Minutes, rounded to one decimal
    pub avg_cooking_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<ChartsDto>,
}

impl AnalyticsDto {
    pub fn empty() -> Self {
        Self::from_stats(&RecipeStats::from_recipes(&[]), None)
    }

    pub fn from_stats(stats: &RecipeStats, charts: Option<RenderedCharts>) -> Self {
        let has_recipes = stats.total > 0;

        Self {
            total_recipes: stats.total,
            has_recipes,
            message: (!has_recipes).then(|| "No recipes yet".to_string()),
            difficulty_counts: stats
                .difficulty_counts
                .iter()
                .map(|(difficulty, count)| DifficultyCountDto {
                    difficulty: *difficulty,
                    count: *count,
                })
                .collect(),
            time_bucket_counts: stats
                .time_bucket_counts
                .iter()
                .map(|(bucket, count)| TimeBucketCountDto {
                    bucket: *bucket,
                    label: bucket.label().to_string(),
                    count: *count,
                })
                .collect(),
            avg_cooking_time: stats.avg_cooking_time,
            charts: charts.map(ChartsDto::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let dto = AnalyticsDto::empty();

        assert_eq!(dto.total_recipes, 0);
        assert!(!dto.has_recipes);
        assert_eq!(dto.message.as_deref(), Some("No recipes yet"));
        assert!(dto.charts.is_none());
        assert_eq!(dto.avg_cooking_time, 0.0);
    }

    #[test]
    fn test_empty_report_serializes_without_charts() {
        let value = serde_json::to_value(AnalyticsDto::empty()).unwrap();
        assert!(value.get("charts").is_none());
        assert_eq!(value["time_bucket_counts"][0]["bucket"], "quick");
    }
}
