//! Middleware and extractors for the admin service.

pub mod auth;

pub use auth::RequireApiToken;
