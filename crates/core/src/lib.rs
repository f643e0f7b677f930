//! Core business logic for Simpanan.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain rules, validation, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and credential format validation
//! - `authz` - Principal model and the authorization gate
//! - `underwriting` - Loan eligibility evaluation and lifecycle rules

pub mod auth;
pub mod authz;
pub mod underwriting;
