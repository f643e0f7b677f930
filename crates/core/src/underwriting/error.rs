//! Loan lifecycle and underwriting errors.

use thiserror::Error;

use simpanan_shared::AppError;

use super::types::LoanStatus;

/// Errors raised by the underwriting engine and the loan state machine.
#[derive(Debug, Error)]
pub enum LoanError {
    /// Underwriting rejected the requested amount.
    #[error("loan is not viable: {0}")]
    NotViable(String),

    /// Status string is not one of pending/approved/rejected.
    #[error("unknown loan status: {0}")]
    UnknownStatus(String),

    /// Transition not permitted by the state machine.
    #[error("illegal transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: LoanStatus,
        /// Requested status.
        to: LoanStatus,
    },

    /// Operation requires a pending loan.
    #[error("loan is no longer pending (status: {0})")]
    NotPending(LoanStatus),
}

impl From<LoanError> for AppError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::NotViable(reason) => Self::LoanNotViable(reason),
            LoanError::UnknownStatus(_) => Self::Validation(err.to_string()),
            LoanError::InvalidTransition { .. } | LoanError::NotPending(_) => {
                Self::InvalidStateTransition(err.to_string())
            }
        }
    }
}
