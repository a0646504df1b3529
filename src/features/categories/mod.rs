//! Recipe categories. Browsable by everyone signed in, managed by admins.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
