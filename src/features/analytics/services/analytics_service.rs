use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::config::ChartConfig;
use crate::core::error::{AppError, Result};
use crate::features::analytics::charts::render_all;
use crate::features::analytics::dtos::AnalyticsDto;
use crate::features::analytics::models::{fingerprint, RecipeStats, RecipeTime};
use crate::features::recipes::services::{RecipeLookup, RecipeReader};

/// Last rendered report and the recipe fingerprint it was built from
struct CachedReport {
    fingerprint: String,
    report: AnalyticsDto,
}

/// Builds the analytics report over every recipe
pub struct AnalyticsService {
    reader: Arc<dyn RecipeReader>,
    config: ChartConfig,
    cache: RwLock<Option<CachedReport>>,
}

impl AnalyticsService {
    pub fn new(reader: Arc<dyn RecipeReader>, config: ChartConfig) -> Self {
        Self {
            reader,
            config,
            cache: RwLock::new(None),
        }
    }

    pub async fn report(&self) -> Result<AnalyticsDto> {
        let recipes = self.reader.find_recipes(&RecipeLookup::all()).await?;
        if recipes.is_empty() {
            return Ok(AnalyticsDto::empty());
        }

        let fingerprint = fingerprint(&recipes);
        if self.config.cache_enabled {
            if let Some(cached) = self.cache.read().await.as_ref() {
                if cached.fingerprint == fingerprint {
                    tracing::debug!("Serving cached analytics for {}", fingerprint);
                    return Ok(cached.report.clone());
                }
            }
        }

        let stats = RecipeStats::from_recipes(&recipes);
        let times = RecipeTime::sorted_from(&recipes);
        let config = self.config.clone();
        let difficulty_counts = stats.difficulty_counts.clone();
        let time_bucket_counts = stats.time_bucket_counts.clone();

        let charts = tokio::task::spawn_blocking(move || {
            render_all(&difficulty_counts, &time_bucket_counts, &times, &config)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Chart rendering task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Failed to render analytics charts: {}", e);
            AppError::Internal(e.to_string())
        })?;

        let report = AnalyticsDto::from_stats(&stats, Some(charts));
        tracing::info!(
            "Rendered analytics for {} recipes (avg {} min)",
            stats.total,
            stats.avg_cooking_time
        );

        if self.config.cache_enabled {
            *self.cache.write().await = Some(CachedReport {
                fingerprint,
                report: report.clone(),
            });
        }

        Ok(report)
    }
}
