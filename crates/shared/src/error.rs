//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure that crosses a crate boundary is expressed in this
/// taxonomy; the API layer maps each variant onto an HTTP status and a
/// machine-readable error code.
#[derive(Debug, Error)]
pub enum AppError {
    /// No token, invalid signature, or expired token.
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    /// Token was valid but the account it names no longer exists.
    #[error("Principal not found: {0}")]
    PrincipalNotFound(String),

    /// Role or ownership violation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Malformed input (bad amount, phone, or password format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate phone/email/group-code or already-a-member.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underwriting rejected the requested loan.
    #[error("Loan not viable: {0}")]
    LoanNotViable(String),

    /// Illegal lifecycle transition (e.g. deleting a non-pending loan).
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) | Self::PrincipalNotFound(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::NotFound(_) => 404,
            Self::LoanNotViable(_) | Self::InvalidStateTransition(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::PrincipalNotFound(_) => "PRINCIPAL_NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::LoanNotViable(_) => "LOAN_NOT_VIABLE",
            Self::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True if the error should be surfaced to clients with its message;
    /// 5xx variants get a generic message instead.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthenticated(String::new()).status_code(), 401);
        assert_eq!(
            AppError::PrincipalNotFound(String::new()).status_code(),
            401
        );
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::LoanNotViable(String::new()).status_code(), 422);
        assert_eq!(
            AppError::InvalidStateTransition(String::new()).status_code(),
            422
        );
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Unauthenticated(String::new()).error_code(),
            "UNAUTHENTICATED"
        );
        assert_eq!(
            AppError::PrincipalNotFound(String::new()).error_code(),
            "PRINCIPAL_NOT_FOUND"
        );
        assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::LoanNotViable(String::new()).error_code(),
            "LOAN_NOT_VIABLE"
        );
        assert_eq!(
            AppError::InvalidStateTransition(String::new()).error_code(),
            "INVALID_STATE_TRANSITION"
        );
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_error_split() {
        assert!(AppError::Validation("bad amount".into()).is_client_error());
        assert!(AppError::LoanNotViable("below minimum".into()).is_client_error());
        assert!(!AppError::Database("pool exhausted".into()).is_client_error());
        assert!(!AppError::Internal("oops".into()).is_client_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Unauthenticated("msg".into()).to_string(),
            "Authentication failed: msg"
        );
        assert_eq!(
            AppError::LoanNotViable("msg".into()).to_string(),
            "Loan not viable: msg"
        );
        assert_eq!(
            AppError::InvalidStateTransition("msg".into()).to_string(),
            "Invalid state transition: msg"
        );
    }
}
