//! Loan lifecycle and evaluation types.

use rust_decimal::Decimal;
use serde::Serialize;

/// Loan lifecycle state.
///
/// `Pending` is the only non-terminal state; the two outcomes are
/// terminal and admit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// Awaiting an administrator's decision.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl LoanStatus {
    /// Returns the status as its stored string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a stored status string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether this state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an eligibility evaluation.
///
/// Advisory and pure: the same evaluation runs client-side as a UX hint
/// and server-side at submission time, and only the latter is trusted.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Whether the requested amount is approvable.
    pub viable: bool,
    /// The largest amount currently approvable (0 when the base is
    /// insufficient).
    pub max_loan: Decimal,
    /// The ratio applied to the accumulated total.
    pub ratio: Decimal,
    /// Human-readable rejection reason, absent when viable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            LoanStatus::Pending,
            LoanStatus::Approved,
            LoanStatus::Rejected,
        ] {
            assert_eq!(LoanStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(LoanStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!LoanStatus::Pending.is_terminal());
        assert!(LoanStatus::Approved.is_terminal());
        assert!(LoanStatus::Rejected.is_terminal());
    }
}
