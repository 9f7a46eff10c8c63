//! # toggle-api
//!
//! HTTP API layer for toggle-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout-time gateway filter endpoint
//! - The live-preview query for storefront UIs
//! - The signed administrative rules channel
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/gateways` | Gateway list, pre-restriction |
//! | POST | `/api/v1/checkout/gateways` | Available gateways for a cart |
//! | POST | `/api/v1/preview` | Hidden methods for a category set |
//! | GET | `/api/v1/rules` | Current rule set |
//! | PUT | `/api/v1/rules` | Replace rule set (signed) |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::AdminAuth;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
