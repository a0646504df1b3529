use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::analytics::{dtos as analytics_dtos, handlers as analytics_handlers};
use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::ingredients::{dtos as ingredients_dtos, handlers as ingredients_handlers};
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::features::recipes::classification::TimeBucket;
use crate::features::recipes::models::Difficulty;
use crate::features::recipes::{dtos as recipes_dtos, handlers as recipes_handlers};
use crate::features::search::{dtos as search_dtos, handlers as search_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Recipes
        recipes_handlers::create_recipe,
        recipes_handlers::list_recipes,
        recipes_handlers::get_recipe,
        recipes_handlers::update_recipe,
        recipes_handlers::delete_recipe,
        recipes_handlers::add_recipe_ingredient,
        recipes_handlers::remove_recipe_ingredient,
        // Search
        search_handlers::search_recipes,
        search_handlers::search_recipes_json,
        // Analytics
        analytics_handlers::get_analytics,
        // Ingredients
        ingredients_handlers::list_ingredients,
        ingredients_handlers::get_ingredient,
        ingredients_handlers::create_ingredient,
        ingredients_handlers::update_ingredient,
        ingredients_handlers::delete_ingredient,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Profiles
        profiles_handlers::get_my_profile,
        profiles_handlers::update_my_profile,
        profiles_handlers::list_profiles,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            ApiResponse<auth::dto::MeResponseDto>,
            // Recipes
            Difficulty,
            TimeBucket,
            recipes_dtos::CreateRecipeDto,
            recipes_dtos::UpdateRecipeDto,
            recipes_dtos::RecipeIngredientInputDto,
            recipes_dtos::RecipeIngredientDto,
            recipes_dtos::RecipeSummaryDto,
            recipes_dtos::RecipeDetailDto,
            ApiResponse<recipes_dtos::RecipeDetailDto>,
            ApiResponse<Vec<recipes_dtos::RecipeSummaryDto>>,
            // Search
            search_dtos::SearchQueryDto,
            search_dtos::SearchResponseDto,
            ApiResponse<search_dtos::SearchResponseDto>,
            // Analytics
            analytics_dtos::DifficultyCountDto,
            analytics_dtos::TimeBucketCountDto,
            analytics_dtos::ChartsDto,
            analytics_dtos::AnalyticsDto,
            ApiResponse<analytics_dtos::AnalyticsDto>,
            // Ingredients
            ingredients_dtos::CreateIngredientDto,
            ingredients_dtos::UpdateIngredientDto,
            ingredients_dtos::IngredientResponseDto,
            ApiResponse<ingredients_dtos::IngredientResponseDto>,
            ApiResponse<Vec<ingredients_dtos::IngredientResponseDto>>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Profiles
            profiles_dtos::UpdateProfileDto,
            profiles_dtos::ProfileResponseDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<Vec<profiles_dtos::ProfileResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Current user"),
        (name = "recipes", description = "Recipe records and their ingredients"),
        (name = "search", description = "Recipe search by name, ingredient, difficulty and cooking time"),
        (name = "analytics", description = "Recipe statistics and charts"),
        (name = "ingredients", description = "Ingredient catalog (writes are admin only)"),
        (name = "categories", description = "Recipe categories (writes are admin only)"),
        (name = "profiles", description = "Cooking profiles, one per user"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Recipe Box API",
        version = "0.1.0",
        description = "API documentation for Recipe Box",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_recipe_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/recipes",
            "/api/recipes/{id}",
            "/api/recipes/search",
            "/api/recipes/analytics",
            "/api/ingredients/{id}",
            "/api/categories",
            "/api/profile/me",
            "/api/profiles",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Kitchen".to_string(),
            version: "9.9.9".to_string(),
            description: "Internal".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Kitchen");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
