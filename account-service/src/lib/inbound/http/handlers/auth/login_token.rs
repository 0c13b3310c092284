use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Bearer-style login: validates the credential pair and returns a signed
/// token carrying the account's role claim.
pub async fn login_token(
    State(state): State<AppState>,
    Json(body): Json<LoginTokenRequestBody>,
) -> Result<ApiSuccess<LoginTokenResponseData>, ApiError> {
    let token = state
        .auth_service
        .authenticate_token(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginTokenResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginTokenRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginTokenResponseData {
    pub token: String,
}
