//! Bearer token authentication.
//!
//! Tokens are issued by an external identity provider; this feature only
//! validates them and exposes the current user to handlers.

mod validator;

pub mod dto;
pub mod guards;
pub mod handler;
pub mod model;
pub mod routes;

pub use validator::JwtValidator;
