//! # Application State
//!
//! Shared state for the axum application: the store handle, the gateway
//! client, the token signer and the optional asset-host client.

use std::sync::Arc;

use shop_razorpay::RazorpayClient;
use shop_store::{BoxedStore, PgStore};
use tracing::info;

use crate::assets::{AssetClient, AssetConfig};
use crate::auth::TokenSigner;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
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
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
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
    /// Persistence handle
    pub store: BoxedStore,
    /// Payment gateway client
    pub gateway: Arc<RazorpayClient>,
    /// Session token signer
    pub tokens: TokenSigner,
    /// Asset host client, absent when unconfigured
    pub assets: Option<Arc<AssetClient>>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the production state: connect to PostgreSQL, run migrations,
    /// and initialize the gateway and signer from the environment.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL not set"))?;

        let store = PgStore::connect(&database_url).await?;
        store.migrate().await?;

        let gateway = RazorpayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;

        let tokens = TokenSigner::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize token signer: {}", e))?;

        let assets = AssetConfig::maybe_from_env().map(|c| Arc::new(AssetClient::new(c)));
        if assets.is_none() {
            info!("Asset host not configured; only direct image URLs accepted");
        }

        Ok(Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            tokens,
            assets,
            config,
        })
    }

    /// Assemble state from explicit parts. Used by tests to run against the
    /// in-memory store and a mocked gateway.
    pub fn from_parts(store: BoxedStore, gateway: RazorpayClient, tokens: TokenSigner) -> Self {
        Self {
            store,
            gateway: Arc::new(gateway),
            tokens,
            assets: None,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }

    /// Builder: attach an asset-host client
    pub fn with_assets(mut self, assets: AssetClient) -> Self {
        self.assets = Some(Arc::new(assets));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_production_detection() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "production".to_string(),
        };
        assert!(config.is_production());
    }
}
