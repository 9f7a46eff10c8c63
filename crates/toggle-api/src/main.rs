//! # Toggle-Checkout
//!
//! Category-based payment gateway toggling service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export TOGGLE_ADMIN_SECRET=...
//! export TOGGLE_SETTINGS_PATH=data/payment_settings.json
//!
//! # Run the server
//! toggle-checkout
//! ```

use toggle_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Gateways loaded: {}", state.gateways.len());
    info!(
        "Settings: {} store at {}",
        state.store.backend_name(),
        state.config.settings_path
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Toggle-Checkout starting on http://{}", addr);

    if !is_prod {
        info!("Checkout filter: POST http://{}/api/v1/checkout/gateways", addr);
        info!("Live preview:    POST http://{}/api/v1/preview", addr);
        info!("Rules admin:     PUT  http://{}/api/v1/rules", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
