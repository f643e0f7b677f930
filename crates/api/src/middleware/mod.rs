//! Request middleware.

pub mod auth;

pub use auth::{CurrentPrincipal, resolve_principal};
