//! Credential handling: password hashing and format validation.

pub mod password;
pub mod validate;

pub use password::{PasswordError, hash_password, verify_password};
pub use validate::{validate_phone_number, validate_pin};
