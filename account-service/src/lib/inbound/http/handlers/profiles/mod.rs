use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::account::models::Profile;

pub mod create_profile;
pub mod update_profile;

/// HTTP request body for profile writes (raw JSON).
///
/// Every writable field is listed by name; unknown keys are rejected at
/// deserialization instead of being forwarded to the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_no: Option<String>,
    pub dob: Option<NaiveDate>,
    pub bio: Option<String>,
    pub country: Option<String>,
}

impl From<ProfileRequest> for Profile {
    fn from(req: ProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            contact_no: req.contact_no,
            dob: req.dob,
            bio: req.bio,
            country: req.country,
        }
    }
}
