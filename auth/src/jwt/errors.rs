use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures other than expiry are deliberately collapsed into
/// the reasonless `Invalid` variant so callers cannot tell a bad signature
/// from a truncated token; the concrete reason is only logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,
}
