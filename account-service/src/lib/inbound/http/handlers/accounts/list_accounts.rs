use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::get_account_details::AccountDetailsData;
use crate::domain::account::models::Page;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<ApiSuccess<Vec<AccountDetailsData>>, ApiError> {
    let page = Page::new(query.page, query.per_page);

    state
        .account_service
        .list_account_details(page)
        .await
        .map_err(ApiError::from)
        .map(|details| {
            ApiSuccess::new(
                StatusCode::OK,
                details.iter().map(AccountDetailsData::from).collect(),
            )
        })
}

/// Pagination query parameters (1-based page number)
#[derive(Debug, Clone, Deserialize)]
pub struct ListAccountsQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_per_page")]
    per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}
