//! Risk limits and the viability rules that enforce them.

pub mod limits;
pub mod policy;

pub use limits::{CrowdfundingLimits, ForexLimits, RiskLimits};
pub use policy::{Approval, RiskPolicy};
