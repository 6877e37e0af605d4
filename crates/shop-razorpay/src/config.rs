//! # Razorpay Configuration
//!
//! Configuration management for the Razorpay integration.
//! All secrets are loaded from environment variables.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use shop_core::ShopError;
use std::env;

/// Razorpay API configuration
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// API key id (rzp_test_... or rzp_live_...)
    pub key_id: String,

    /// API key secret
    pub key_secret: String,

    /// Webhook signing secret
    pub webhook_secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl RazorpayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `RAZORPAY_KEY_ID`
    /// - `RAZORPAY_KEY_SECRET`
    /// - `RAZORPAY_WEBHOOK_SECRET`
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let key_id = env::var("RAZORPAY_KEY_ID")
            .map_err(|_| ShopError::Configuration("RAZORPAY_KEY_ID not set".to_string()))?;

        let key_secret = env::var("RAZORPAY_KEY_SECRET")
            .map_err(|_| ShopError::Configuration("RAZORPAY_KEY_SECRET not set".to_string()))?;

        let webhook_secret = env::var("RAZORPAY_WEBHOOK_SECRET")
            .map_err(|_| ShopError::Configuration("RAZORPAY_WEBHOOK_SECRET not set".to_string()))?;

        if !key_id.starts_with("rzp_test_") && !key_id.starts_with("rzp_live_") {
            return Err(ShopError::Configuration(
                "RAZORPAY_KEY_ID must start with rzp_test_ or rzp_live_".to_string(),
            ));
        }

        Ok(Self {
            key_id,
            key_secret,
            webhook_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            webhook_secret: webhook_secret.into(),
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.key_id.starts_with("rzp_live_")
    }

    /// Get the Basic authorization header value
    pub fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.key_id, self.key_secret);
        format!("Basic {}", BASE64.encode(credentials))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_mode_detection() {
        let config = RazorpayConfig::new("rzp_test_abc123", "secret", "whsecret");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = RazorpayConfig::new("rzp_live_abc123", "secret", "whsecret");
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header_is_basic() {
        let config = RazorpayConfig::new("rzp_test_abc", "s3cret", "whsecret");
        let header = config.auth_header();
        assert!(header.starts_with("Basic "));
        // base64("rzp_test_abc:s3cret")
        assert_eq!(header, "Basic cnpwX3Rlc3RfYWJjOnMzY3JldA==");
    }

    #[test]
    fn test_base_url_override() {
        let config = RazorpayConfig::new("rzp_test_abc", "s", "w")
            .with_api_base_url("http://127.0.0.1:9999");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }
}
