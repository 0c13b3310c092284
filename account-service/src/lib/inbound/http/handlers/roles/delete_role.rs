use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .role_service
        .delete_role(role_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
