use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::RoleResponseData;
use crate::domain::role::errors::RoleError;
use crate::domain::role::models::RoleName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_role(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<ApiSuccess<RoleResponseData>, ApiError> {
    let name = RoleName::new(body.name).map_err(RoleError::from)?;

    state
        .role_service
        .rename_role(role_id, name)
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::OK, role.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRoleRequest {
    name: String,
}
