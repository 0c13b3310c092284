use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an account (raw JSON).
///
/// The updatable fields are enumerated here; unknown keys are rejected at
/// deserialization instead of being forwarded to the store.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<AccountStatus>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        // Validation happens here - errors are automatically converted via #[from]
        let username = self.username.map(Username::new).transpose()?;

        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateAccountCommand {
            username,
            email,
            password: self.password,
            status: self.status,
        })
    }
}

/// Response body for account update operations
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub status: AccountStatus,
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            status: account.status,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountResponse>, ApiError> {
    // Parse account ID and request at HTTP boundary - errors automatically converted
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;
    let command = req.try_into_command()?;

    state
        .account_service
        .update_account(&account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|account| ApiSuccess::new(StatusCode::OK, account.into()))
}
