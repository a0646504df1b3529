//! Recipe analytics: counts per difficulty and cooking-time bucket, average
//! cooking time, and three SVG charts rendered with plotters.

pub mod charts;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AnalyticsService;
