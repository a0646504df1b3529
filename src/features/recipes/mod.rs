//! Recipe records and their ingredient associations.
//!
//! Difficulty is derived on first save by [`classification::calculate_difficulty`]
//! and stored; later edits leave it alone unless a difficulty is given explicitly.

pub mod classification;
pub mod dtos;
pub mod handlers;
pub mod images;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{RecipeLookup, RecipeReader, RecipeService, RecipeStore};
