//! Risk check result view for callers that want a `(viable, message)` pair.

use crate::application::risk::Approval;
use crate::error::RiskError;

/// Result of a risk check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskCheckResult {
    /// Trade may proceed, possibly with a warning attached.
    Approved(Approval),
    /// Trade is rejected with reason.
    Rejected(RiskError),
}

impl RiskCheckResult {
    /// Check if approved. Warning-annotated approvals are still approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, RiskCheckResult::Approved(_))
    }

    /// Get rejection error if rejected.
    #[must_use]
    pub const fn rejection_error(&self) -> Option<&RiskError> {
        match self {
            RiskCheckResult::Rejected(e) => Some(e),
            RiskCheckResult::Approved(_) => None,
        }
    }

    /// Human-readable outcome: `"approved"`, the warning, or the rejection reason.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            RiskCheckResult::Approved(approval) => approval.message(),
            RiskCheckResult::Rejected(e) => e.to_string(),
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (bool, String) {
        (self.is_approved(), self.message())
    }
}

impl From<Result<Approval, RiskError>> for RiskCheckResult {
    fn from(result: Result<Approval, RiskError>) -> Self {
        match result {
            Ok(approval) => Self::Approved(approval),
            Err(e) => Self::Rejected(e),
        }
    }
}
