use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::ImageAttachment;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Records an image attachment (name and url); the bytes live elsewhere.
pub async fn attach_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AttachImageRequest>,
) -> Result<ApiSuccess<ImageResponseData>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;

    if body.image_name.is_empty() || body.image_url.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "image_name and image_url must not be empty".to_string(),
        ));
    }

    state
        .account_service
        .attach_image(&account_id, body.image_name, body.image_url)
        .await
        .map_err(ApiError::from)
        .map(|ref image| ApiSuccess::new(StatusCode::CREATED, image.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttachImageRequest {
    image_name: String,
    image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResponseData {
    pub id: String,
    pub image_name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ImageAttachment> for ImageResponseData {
    fn from(image: &ImageAttachment) -> Self {
        Self {
            id: image.id.to_string(),
            image_name: image.image_name.clone(),
            image_url: image.image_url.clone(),
            created_at: image.created_at,
        }
    }
}
