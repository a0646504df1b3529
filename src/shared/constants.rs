/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// RECIPE RULES
// =============================================================================

/// Recipes under this many minutes are "quick"; also the Easy time ceiling (exclusive)
pub const QUICK_MAX_MINUTES: i32 = 30;

/// Recipes up to this many minutes are "medium"; also the Medium time ceiling (inclusive)
pub const MEDIUM_MAX_MINUTES: i32 = 60;

/// Most ingredients an Easy recipe may have
pub const EASY_MAX_INGREDIENTS: usize = 5;

/// Most ingredients a Medium recipe may have
pub const MEDIUM_MAX_INGREDIENTS: usize = 10;

/// Ingredient descriptions shown before the summary is truncated with "..."
pub const INGREDIENT_SUMMARY_LIMIT: usize = 3;

/// Unit used when an ingredient is created without one
pub const DEFAULT_UNIT_OF_MEASURE: &str = "grams";

// =============================================================================
// PROFILES
// =============================================================================

/// Earliest accepted birth year on a profile
pub const PROFILE_MIN_BIRTH_YEAR: i32 = 1900;
