use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::account::models::AccountId;
use crate::domain::auth::errors::AuthError;
use crate::inbound::http::router::AppState;

/// Role required by the administrative route group.
pub const ADMIN_ROLE: &str = "admin";

/// Extension type to store the verified caller identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub role: String,
}

/// Middleware gating routes behind any verified bearer token.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    gate(state, req, next, None).await
}

/// Middleware gating routes behind a verified bearer token with the admin
/// role claim.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    gate(state, req, next, Some(ADMIN_ROLE)).await
}

/// The access-control gate. Every protected route passes through here; the
/// token is fully verified (signature and expiry) before its role claim is
/// consulted, and the wrapped handler only runs on a grant.
async fn gate(
    state: AppState,
    mut req: Request,
    next: Next,
    required_role: Option<&str>,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let grant = state
        .auth_service
        .verify_and_authorize(token, required_role)
        .map_err(|e| match e {
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Administration privileges required"
                })),
            )
                .into_response(),
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Invalid or expired token"
                })),
            )
                .into_response(),
        })?;

    // Add the verified identity to request extensions
    req.extensions_mut().insert(AuthenticatedAccount {
        account_id: grant.account_id,
        role: grant.role,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
