use crate::domain::account::models::AccountId;

/// Outcome of a successful gate decision: who the caller is and which role
/// claim their verified credential carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub account_id: AccountId,
    pub role: String,
}
