//! Shared types, errors, and configuration for Simpanan.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy
//! - JWT token issuance and validation
//! - Auth request/response payloads
//! - Pagination types for list endpoints
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
