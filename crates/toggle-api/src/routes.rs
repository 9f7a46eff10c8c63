//! # Routes
//!
//! Axum router configuration for the gateway-toggling API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Checkout:
///   - GET  /api/v1/gateways - Full gateway list, pre-restriction
///   - POST /api/v1/checkout/gateways - Available gateways for a cart
///   - POST /api/v1/preview - Hidden methods for a category set
///
/// - Admin:
///   - GET /api/v1/rules - Current rule set
///   - PUT /api/v1/rules - Replace rule set (signed)
///
/// - Health:
///   - GET /health
pub fn create_router(state: AppState) -> Router {
    // Storefront preview calls come from the shop origin; keep CORS open and
    // let the signature requirement protect the write path.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Checkout surface
        .route("/gateways", get(handlers::list_gateways))
        .route("/checkout/gateways", post(handlers::checkout_gateways))
        .route("/preview", post(handlers::preview))
        // Admin surface
        .route(
            "/rules",
            get(handlers::get_rules).put(handlers::update_rules),
        );

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
