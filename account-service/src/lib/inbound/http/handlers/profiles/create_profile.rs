use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ProfileRequest;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::accounts::get_account_details::ProfileData;
use crate::inbound::http::router::AppState;

pub async fn create_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProfileRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;

    state
        .account_service
        .create_profile(&account_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}
