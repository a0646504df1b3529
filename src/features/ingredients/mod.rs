//! Ingredient catalog.
//!
//! Anyone signed in can browse; only admins manage entries. An ingredient that
//! is part of any recipe can no longer be edited, only deleted.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::IngredientService;
