use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer-token payload.
///
/// Carries the account identity and its role claim alongside the standard
/// RFC 7519 timestamps. Tokens are never persisted; the signature and the
/// `exp` timestamp are the only validity criteria.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier, string-encoded)
    pub sub: String,

    /// Role claim attached at issuance
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account with an expiry relative to now.
    ///
    /// # Arguments
    /// * `subject` - Account identifier (string-encoded into `sub`)
    /// * `role` - Role name to embed as the role claim
    /// * `ttl` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, role, iat, and exp set
    pub fn new(subject: impl ToString, role: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if the claims are expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
