pub mod analytics;
pub mod auth;
pub mod categories;
pub mod ingredients;
pub mod profiles;
pub mod recipes;
pub mod search;
