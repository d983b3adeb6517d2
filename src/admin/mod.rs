//! Admin API: partition inspection and URL generation.
//!
//! Enabled by `admin.enabled`; every route requires `Authorization: Bearer <admin.api_key>`.

pub mod auth;
pub mod handlers;

use axum::{
    routing::get,
    Router,
    middleware,
};
use crate::http::server::AppState;
use self::handlers::*;
use self::auth::admin_auth_middleware;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/_admin/status", get(get_status))
        .route("/_admin/routes", get(get_routes))
        .route("/_admin/generate", get(get_generate))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
