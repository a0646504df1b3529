use std::str::FromStr;

use crate::features::recipes::classification::TimeBucket;
use crate::features::recipes::models::{Difficulty, RecipeDetail};
use crate::features::recipes::services::RecipeLookup;

/// Word that disables a categorical filter
const ANY: &str = "any";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    Any,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn matches(&self, recipe: &RecipeDetail) -> bool {
        match self {
            DifficultyFilter::Any => true,
            DifficultyFilter::Only(wanted) => recipe.computed_difficulty() == *wanted,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = String;

    /// "" and "any" (any case) disable the filter
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ANY) {
            return Ok(DifficultyFilter::Any);
        }
        s.parse::<Difficulty>()
            .map(DifficultyFilter::Only)
            .map_err(|_| {
                format!(
                    "Invalid difficulty '{}'. Expected one of: any, easy, medium, hard",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFilter {
    #[default]
    Any,
    Only(TimeBucket),
}

impl TimeFilter {
    pub fn matches(&self, recipe: &RecipeDetail) -> bool {
        match self {
            TimeFilter::Any => true,
            TimeFilter::Only(wanted) => recipe.time_bucket() == *wanted,
        }
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ANY) {
            return Ok(TimeFilter::Any);
        }
        s.parse::<TimeBucket>().map(TimeFilter::Only).map_err(|_| {
            format!(
                "Invalid cooking time '{}'. Expected one of: any, quick, medium, long",
                s
            )
        })
    }
}

/// Normalized search request. Blank strings are already `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub recipe_name: Option<String>,
    pub ingredients: Option<String>,
    pub difficulty: DifficultyFilter,
    pub cooking_time: TimeFilter,
    pub show_all: bool,
}

impl SearchCriteria {
    /// Whether any filter narrows the result
    pub fn has_filters(&self) -> bool {
        self.recipe_name.is_some()
            || self.ingredients.is_some()
            || self.difficulty != DifficultyFilter::Any
            || self.cooking_time != TimeFilter::Any
    }

    /// A search runs when a filter is given or everything was asked for
    pub fn is_requested(&self) -> bool {
        self.show_all || self.has_filters()
    }

    /// The part of the criteria the recipe store evaluates itself
    pub fn lookup(&self) -> RecipeLookup {
        RecipeLookup {
            name_contains: self.recipe_name.clone(),
            ingredient_contains: self.ingredients.clone(),
        }
    }
}

/// Result of a search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Nothing was asked for
    NotPerformed,
    NoResults,
    Found(Vec<RecipeDetail>),
}

/// Apply the difficulty filter, then the cooking-time filter, keeping order
pub fn apply_filters(
    recipes: Vec<RecipeDetail>,
    difficulty: DifficultyFilter,
    cooking_time: TimeFilter,
) -> Vec<RecipeDetail> {
    recipes
        .into_iter()
        .filter(|r| difficulty.matches(r))
        .filter(|r| cooking_time.matches(r))
        .collect()
}
