use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::RoleResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_role(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<ApiSuccess<RoleResponseData>, ApiError> {
    state
        .role_service
        .get_role(role_id)
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::OK, role.into()))
}
