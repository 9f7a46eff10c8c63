//! # Request Handlers
//!
//! Axum request handlers for the gateway-toggling API.
//!
//! The checkout and preview handlers are thin adapters over the core
//! matcher; the rules handlers are the administrative read/write channel.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use toggle_core::{
    compute_hidden_methods, filter_available_gateways, Cart, CartProvider, CategoryId, MethodId,
    Rule, RuleSet, ToggleError,
};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Checkout filter request: the active cart, if any.
///
/// An absent or null cart is the no-active-session state and leaves the
/// gateway list unrestricted.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutGatewaysRequest {
    #[serde(default)]
    pub cart: Option<Cart>,
}

/// Live-preview request: category ids selected in the admin UI or storefront
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

/// Live-preview response
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Method ids to hide, sorted for stable output
    pub hidden_methods: Vec<MethodId>,
}

/// Administrative replace-rules request
#[derive(Debug, Deserialize)]
pub struct UpdateRulesRequest {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Administrative replace-rules response
#[derive(Debug, Serialize)]
pub struct UpdateRulesResponse {
    /// Rules persisted after sanitization
    pub saved: usize,
    /// Incomplete rules dropped before save
    pub dropped: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn toggle_error_to_response(err: ToggleError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "toggle-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List the full gateway registry, pre-restriction
pub async fn list_gateways(State(state): State<AppState>) -> impl IntoResponse {
    let available = state.available_gateways();
    Json(serde_json::json!({
        "gateways": available.gateways,
        "count": available.len()
    }))
}

/// The checkout filter hook: available gateways for the posted cart.
///
/// Invoked immediately before gateway options are rendered. Returns the
/// same-shaped ordered gateway list with hidden methods removed.
#[instrument(skip(state, request), fields(has_cart = request.cart.is_some()))]
pub async fn checkout_gateways(
    State(state): State<AppState>,
    Json(request): Json<CheckoutGatewaysRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let rules = state.store.load().await.map_err(|e| {
        error!("Failed to load rules: {}", e);
        toggle_error_to_response(e)
    })?;

    let all_gateways = state.available_gateways();
    let categories = request.cart.as_ref().and_then(|cart| cart.cart_categories());

    let available = filter_available_gateways(&all_gateways, categories.as_ref(), &rules);

    info!(
        "Checkout filter: {} of {} gateways offered",
        available.len(),
        all_gateways.len()
    );

    Ok(Json(serde_json::json!({
        "gateways": available.gateways,
        "count": available.len()
    })))
}

/// Live-preview query: hidden methods for a set of category ids.
///
/// This is the matcher exposed over HTTP, with the same hide-wins tie-break,
/// so storefront UIs can reflect restrictions before checkout.
#[instrument(skip(state, request), fields(categories = request.categories.len()))]
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, (StatusCode, Json<ErrorResponse>)> {
    let rules = state.store.load().await.map_err(|e| {
        error!("Failed to load rules: {}", e);
        toggle_error_to_response(e)
    })?;

    let categories: HashSet<CategoryId> = request.categories.into_iter().collect();

    let mut hidden: Vec<MethodId> =
        compute_hidden_methods(&categories, &rules).into_iter().collect();
    hidden.sort();

    Ok(Json(PreviewResponse {
        hidden_methods: hidden,
    }))
}

/// Read the configured rule set (admin)
pub async fn get_rules(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let rules = state.store.load().await.map_err(|e| {
        error!("Failed to load rules: {}", e);
        toggle_error_to_response(e)
    })?;

    // Gateways no rule references yet, surfaced as an admin hint
    let referenced = rules.referenced_methods();
    let unassigned: Vec<&str> = state
        .gateways
        .enabled_gateways()
        .filter(|g| !referenced.contains(&g.id))
        .map(|g| g.id.as_str())
        .collect();

    Ok(Json(serde_json::json!({
        "rules": rules.rules,
        "count": rules.len(),
        "unassigned_gateways": unassigned
    })))
}

/// Replace the rule set wholesale (admin, signed).
///
/// The signature covers the raw body, so the body is taken as bytes and
/// parsed only after verification. Incomplete rules are dropped rather than
/// rejected; a failed signature rejects the request with no partial effect.
#[instrument(skip(state, headers, body))]
pub async fn update_rules(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UpdateRulesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let signature = headers
        .get("x-toggle-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing X-Toggle-Signature header", 401)),
            )
        })?;

    state.auth.verify(&body, signature).map_err(|e| {
        error!("Admin signature rejected: {}", e);
        toggle_error_to_response(e)
    })?;

    let request: UpdateRulesRequest = serde_json::from_slice(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid rules payload", 400).with_details(e.to_string())),
        )
    })?;

    let submitted = RuleSet {
        rules: request.rules,
    };
    let clean = submitted.sanitized();
    let dropped = submitted.len() - clean.len();

    state.store.save(&clean).await.map_err(|e| {
        error!("Failed to save rules: {}", e);
        toggle_error_to_response(e)
    })?;

    info!("Rules replaced: {} saved, {} dropped", clean.len(), dropped);

    Ok(Json(UpdateRulesResponse {
        saved: clean.len(),
        dropped,
    }))
}
