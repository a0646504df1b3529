//! Cooking profiles.
//!
//! Every signed-in user has exactly one profile, keyed by the token subject.
//! It starts out blank and is created on first access.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/profile/me` | Own profile (created blank when missing) |
//! | PUT | `/api/profile/me` | Update own profile; omitted fields are kept |
//! | GET | `/api/profiles` | All profiles, optional `search` (admin only) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ProfileService, ProfileStore};
