use std::sync::Arc;

use crate::core::error::Result;
use crate::features::recipes::services::RecipeReader;
use crate::features::search::models::{apply_filters, SearchCriteria, SearchOutcome};

/// Runs the search pipeline over any [`RecipeReader`]
pub struct SearchService {
    reader: Arc<dyn RecipeReader>,
}

impl SearchService {
    pub fn new(reader: Arc<dyn RecipeReader>) -> Self {
        Self { reader }
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome> {
        if !criteria.is_requested() {
            return Ok(SearchOutcome::NotPerformed);
        }

        let candidates = self.reader.find_recipes(&criteria.lookup()).await?;
        let candidate_count = candidates.len();
        let matches = apply_filters(candidates, criteria.difficulty, criteria.cooking_time);

        tracing::debug!(
            "Search {:?}: {} candidates, {} matches",
            criteria,
            candidate_count,
            matches.len()
        );

        if matches.is_empty() {
            Ok(SearchOutcome::NoResults)
        } else {
            Ok(SearchOutcome::Found(matches))
        }
    }
}
