mod recipe_reader;
mod recipe_service;
mod recipe_store;

pub use recipe_reader::{RecipeLookup, RecipeReader};
pub use recipe_service::RecipeService;
pub use recipe_store::{authorize_edit, RecipeStore};
