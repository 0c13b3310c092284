use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::RoleResponseData;
use crate::domain::role::errors::RoleError;
use crate::domain::role::models::CreateRoleCommand;
use crate::domain::role::models::RoleName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<ApiSuccess<RoleResponseData>, ApiError> {
    let name = RoleName::new(body.name).map_err(RoleError::from)?;

    let command = CreateRoleCommand {
        name,
        description: body.description,
    };

    state
        .role_service
        .create_role(command)
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::CREATED, role.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRoleRequest {
    name: String,
    description: Option<String>,
}
