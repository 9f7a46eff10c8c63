//! # Application State
//!
//! Shared state for the Axum application: the settings store, the gateway
//! registry, the admin verifier, and configuration. Everything mutable lives
//! behind the store; the rest is read-only after startup.

use crate::auth::AdminAuth;
use std::sync::Arc;
use toggle_core::GatewayRegistry;
use toggle_store::{BoxedSettingsStore, FileStore};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Path of the persisted settings blob
    pub settings_path: String,
    /// Path of the gateway registry config (optional override)
    pub gateways_path: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            settings_path: std::env::var("TOGGLE_SETTINGS_PATH")
                .unwrap_or_else(|_| "data/payment_settings.json".to_string()),
            gateways_path: std::env::var("TOGGLE_GATEWAYS_PATH").ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings persistence
    pub store: BoxedSettingsStore,
    /// Live gateway registry (pre-restriction)
    pub gateways: GatewayRegistry,
    /// Admin write-path verifier
    pub auth: AdminAuth,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the production state: file-backed store, TOML gateway registry,
    /// admin secret from the environment.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let secret = std::env::var("TOGGLE_ADMIN_SECRET")
            .map_err(|_| anyhow::anyhow!("TOGGLE_ADMIN_SECRET not set"))?;

        let gateways = load_gateway_registry(config.gateways_path.as_deref())?;
        let store: BoxedSettingsStore = Arc::new(FileStore::new(&config.settings_path));

        Ok(Self {
            store,
            gateways,
            auth: AdminAuth::new(secret),
            config,
        })
    }

    /// Assemble a state from explicit parts (tests, embedding)
    pub fn with_parts(
        store: BoxedSettingsStore,
        gateways: GatewayRegistry,
        auth: AdminAuth,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            gateways,
            auth,
            config,
        }
    }

    /// The platform's list of enabled gateways, in registry order.
    /// This is the pre-restriction input to the checkout filter.
    pub fn available_gateways(&self) -> GatewayRegistry {
        GatewayRegistry {
            gateways: self.gateways.enabled_gateways().cloned().collect(),
        }
    }
}

/// Load the gateway registry from a config file
fn load_gateway_registry(explicit_path: Option<&str>) -> anyhow::Result<GatewayRegistry> {
    let default_paths = [
        "config/gateways.toml",
        "../config/gateways.toml",
        "../../config/gateways.toml",
    ];

    let candidates: Vec<&str> = match explicit_path {
        Some(path) => vec![path],
        None => default_paths.to_vec(),
    };

    for path in candidates {
        if let Ok(content) = std::fs::read_to_string(path) {
            let registry = GatewayRegistry::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} gateways from {}", registry.len(), path);
            return Ok(registry);
        }
    }

    // Return empty registry if no config found
    tracing::warn!("No gateway config found, using empty registry");
    Ok(GatewayRegistry::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toggle_core::Gateway;
    use toggle_store::MemoryStore;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "test".to_string(),
            settings_path: "data/payment_settings.json".to_string(),
            gateways_path: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..test_config()
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_available_gateways_skips_disabled() {
        let registry = GatewayRegistry::new()
            .with_gateway(Gateway::new("cod", "Cash on delivery"))
            .with_gateway(Gateway::new("cheque", "Cheque").disabled());

        let state = AppState::with_parts(
            Arc::new(MemoryStore::new()),
            registry,
            AdminAuth::new("test-secret"),
            test_config(),
        );

        assert_eq!(state.available_gateways().ids(), vec!["cod"]);
    }
}
