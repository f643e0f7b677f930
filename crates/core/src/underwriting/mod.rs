//! Loan underwriting: eligibility evaluation and lifecycle rules.

pub mod error;
pub mod service;
pub mod types;

pub use error::LoanError;
pub use service::{UnderwritingPolicy, ensure_deletable, ensure_transition};
pub use types::{Evaluation, LoanStatus};
