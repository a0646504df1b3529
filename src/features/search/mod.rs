//! Recipe search.
//!
//! Name and ingredient substrings are pushed down to the recipe store; the
//! difficulty and cooking-time filters run over the loaded recipes, classifying
//! each one from its current cooking time and ingredient count.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SearchService;
