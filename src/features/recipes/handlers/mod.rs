mod recipe_handler;

pub use recipe_handler::*;
