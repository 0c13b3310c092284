use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use chrono::Duration;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessGrant;

/// Authentication service: answers whether a username/password pair is
/// valid, mints bearer credentials, and makes the gate decision for
/// protected operations.
///
/// Login paths read the credential store; `verify_and_authorize` is a pure
/// function of (token, secret, clock) and touches no shared state.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
    fallback_hash: String,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password + token coordinator (already configured
    ///   with the process-wide signing secret)
    /// * `token_ttl` - Lifetime of issued bearer credentials
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>, token_ttl: Duration) -> Self {
        // The miss path of authenticate() burns one verification against this
        // hash so its latency matches the hit path.
        let fallback_hash = match authenticator.hash_password("fallback") {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("Failed to prepare fallback hash: {}", e);
                String::new()
            }
        };

        Self {
            repository,
            authenticator,
            token_ttl,
            fallback_hash,
        }
    }

    /// Validate a username/password pair.
    ///
    /// # Arguments
    /// * `username` - Exact, case-sensitive username
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// The account id on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, uniformly
    /// * `DatabaseError` - Store lookup failed
    pub async fn authenticate_plain(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountId, AuthError> {
        let account = self.verify_credentials(username, password).await?;
        Ok(account.id)
    }

    /// Validate a username/password pair and issue a bearer credential.
    ///
    /// The account's role resolves deterministically (lowest role id wins
    /// when several are assigned) and is embedded as the token's role claim.
    ///
    /// # Arguments
    /// * `username` - Exact, case-sensitive username
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, uniformly
    /// * `DatabaseError` - Store lookup failed
    /// * `Unknown` - Account has no role assignment, or token signing failed
    pub async fn authenticate_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        let account = self.verify_credentials(username, password).await?;

        let role = self
            .repository
            .find_primary_role(&account.id)
            .await
            .map_err(Self::store_error)?
            .ok_or_else(|| {
                tracing::error!(account_id = %account.id, "Account has no role assignment");
                AuthError::Unknown("account has no role assignment".to_string())
            })?;

        let claims = Claims::new(account.id, role.name.as_str(), self.token_ttl);

        let token = self.authenticator.issue_token(&claims).map_err(|e| {
            tracing::error!("Token issuance failed: {}", e);
            AuthError::Unknown("token issuance failed".to_string())
        })?;

        Ok(token)
    }

    /// Gate decision for protected operations.
    ///
    /// Verifies the token's signature and expiry before reading any claim,
    /// then compares the role claim against the required role. With no
    /// required role, any verified token passes.
    ///
    /// # Arguments
    /// * `token` - Presented bearer token string
    /// * `required_role` - Role the operation requires, if any
    ///
    /// # Returns
    /// AccessGrant with the verified identity and role
    ///
    /// # Errors
    /// * `Unauthenticated` - Missing, malformed, tampered, or expired token
    /// * `Forbidden` - Verified identity whose role claim does not match
    pub fn verify_and_authorize(
        &self,
        token: &str,
        required_role: Option<&str>,
    ) -> Result<AccessGrant, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!("Bearer token rejected: {}", e);
            AuthError::Unauthenticated
        })?;

        let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!("Verified token carries a malformed subject: {}", e);
            AuthError::Unauthenticated
        })?;

        if let Some(required) = required_role {
            if claims.role != required {
                tracing::debug!(
                    account_id = %account_id,
                    role = %claims.role,
                    required = required,
                    "Role claim does not satisfy the required role"
                );
                return Err(AuthError::Forbidden);
            }
        }

        Ok(AccessGrant {
            account_id,
            role: claims.role,
        })
    }

    /// Shared lookup + password check for both login variants. The miss path
    /// still performs one hash verification before failing, so unknown
    /// usernames and wrong passwords cost the same and return the same error.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let account = match Username::new(username.to_string()) {
            Ok(username) => self
                .repository
                .find_active_by_username(&username)
                .await
                .map_err(Self::store_error)?,
            // A name that fails validation cannot be stored, so it is a miss
            Err(_) => None,
        };

        match account {
            Some(account) if self
                .authenticator
                .verify_password(password, &account.password_hash) =>
            {
                Ok(account)
            }
            Some(_) => Err(AuthError::InvalidCredentials),
            None => {
                let _ = self
                    .authenticator
                    .verify_password(password, &self.fallback_hash);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    fn store_error(err: AccountError) -> AuthError {
        match err {
            AccountError::DatabaseError(msg) => AuthError::DatabaseError(msg),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}
