mod recipe;
mod recipe_ingredient;

pub use recipe::*;
pub use recipe_ingredient::*;
