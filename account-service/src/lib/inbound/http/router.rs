use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::accounts::delete_account::delete_account;
use super::handlers::accounts::get_account::get_account;
use super::handlers::accounts::get_account_details::get_account_details;
use super::handlers::accounts::list_accounts::list_accounts;
use super::handlers::accounts::purge_account::purge_account;
use super::handlers::accounts::register::register;
use super::handlers::accounts::update_account::update_account;
use super::handlers::auth::login::login;
use super::handlers::auth::login_token::login_token;
use super::handlers::images::attach_image::attach_image;
use super::handlers::profiles::create_profile::create_profile;
use super::handlers::profiles::update_profile::update_profile;
use super::handlers::roles::create_role::create_role;
use super::handlers::roles::delete_role::delete_role;
use super::handlers::roles::get_role::get_role;
use super::handlers::roles::update_role::update_role;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::account::service::AccountService;
use crate::domain::auth::service::AuthService;
use crate::domain::role::service::RoleService;
use crate::outbound::repositories::account::PostgresAccountRepository;
use crate::outbound::repositories::role::PostgresRoleRepository;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<PostgresAccountRepository>>,
    pub role_service: Arc<RoleService<PostgresRoleRepository>>,
    pub auth_service: Arc<AuthService<PostgresAccountRepository>>,
}

pub fn create_router(
    account_service: Arc<AccountService<PostgresAccountRepository>>,
    role_service: Arc<RoleService<PostgresRoleRepository>>,
    auth_service: Arc<AuthService<PostgresAccountRepository>>,
) -> Router {
    let state = AppState {
        account_service,
        role_service,
        auth_service,
    };

    let public_routes = Router::new()
        .route("/api/accounts", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/token", post(login_token));

    // Reachable only through the bearer gate; there is no bypass path
    let protected_routes = Router::new()
        .route("/api/accounts", get(list_accounts))
        .route("/api/accounts/:account_id", get(get_account))
        .route("/api/accounts/:account_id", patch(update_account))
        .route("/api/accounts/:account_id", delete(delete_account))
        .route("/api/accounts/:account_id/details", get(get_account_details))
        .route("/api/accounts/:account_id/profile", post(create_profile))
        .route("/api/accounts/:account_id/profile", put(update_profile))
        .route("/api/accounts/:account_id/images", post(attach_image))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Administrative operations additionally require the admin role claim
    let admin_routes = Router::new()
        .route("/api/accounts/:account_id/purge", delete(purge_account))
        .route("/api/roles", post(create_role))
        .route("/api/roles/:role_id", get(get_role))
        .route("/api/roles/:role_id", patch(update_role))
        .route("/api/roles/:role_id", delete(delete_role))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
