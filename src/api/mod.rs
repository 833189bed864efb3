pub mod dashboard;

pub use dashboard::*;

use crate::{auth, middleware::logging::request_logging, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Health check endpoint
async fn health_check() -> &'static str {
    "🛵 Spinx Delivery Dashboard Operational"
}

/// Assemble the full application router: public health and login routes,
/// session-gated data routes, permissive CORS for the rendering frontend.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/login", post(auth::api::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/orders", get(dashboard::get_orders))
        .route("/api/metrics", get(dashboard::get_metrics))
        .route("/api/charts", get(dashboard::get_charts))
        .route("/api/auth/logout", post(auth::api::logout))
        .route("/api/auth/me", get(auth::api::get_current_user))
        .route("/api/admin/users", get(auth::api::list_users))
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            auth::session_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}
