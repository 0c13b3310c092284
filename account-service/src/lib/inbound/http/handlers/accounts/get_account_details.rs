use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::models::AccountDetails;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::Profile;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_account_details(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<AccountDetailsData>, ApiError> {
    let account_id =
        AccountId::from_string(&account_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .account_service
        .get_account_details(&account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDetailsData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub profile: Option<ProfileData>,
    pub role: Option<String>,
    pub images: Vec<ImageRefData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_no: Option<String>,
    pub dob: Option<NaiveDate>,
    pub bio: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRefData {
    pub image_name: String,
    pub image_url: String,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            contact_no: profile.contact_no.clone(),
            dob: profile.dob,
            bio: profile.bio.clone(),
            country: profile.country.clone(),
        }
    }
}

impl From<&AccountDetails> for AccountDetailsData {
    fn from(details: &AccountDetails) -> Self {
        Self {
            id: details.id.to_string(),
            username: details.username.as_str().to_string(),
            email: details.email.as_str().to_string(),
            status: details.status,
            created_at: details.created_at,
            profile: details.profile.as_ref().map(ProfileData::from),
            role: details.role.clone(),
            images: details
                .images
                .iter()
                .map(|image| ImageRefData {
                    image_name: image.image_name.clone(),
                    image_url: image.image_url.clone(),
                })
                .collect(),
        }
    }
}
