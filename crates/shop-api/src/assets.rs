//! # Asset Host Client
//!
//! Uploads product images to the external asset host. Inline `data:` URIs
//! are pushed through the host's signed upload endpoint; plain URLs are
//! used as-is by the caller without touching this client.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use shop_core::{ImageRef, ShopError, ShopResult};

/// Asset host configuration
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Account ("cloud") name
    pub cloud_name: String,

    /// API key
    pub api_key: String,

    /// API secret used to sign uploads
    pub api_secret: String,

    /// API base URL (for testing/mocking)
    pub base_url: String,
}

impl AssetConfig {
    /// Load from `ASSET_CLOUD_NAME` / `ASSET_API_KEY` / `ASSET_API_SECRET`.
    ///
    /// Returns `None` when the asset host is not configured; the storefront
    /// then only accepts direct image URLs.
    pub fn maybe_from_env() -> Option<Self> {
        dotenvy::dotenv().ok();

        let cloud_name = std::env::var("ASSET_CLOUD_NAME").ok()?;
        let api_key = std::env::var("ASSET_API_KEY").ok()?;
        let api_secret = std::env::var("ASSET_API_SECRET").ok()?;

        Some(Self {
            cloud_name,
            api_key,
            api_secret,
            base_url: "https://api.cloudinary.com".to_string(),
        })
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Asset host REST client
pub struct AssetClient {
    config: AssetConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

impl AssetClient {
    /// Create a new client
    pub fn new(config: AssetConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Upload an inline `data:` URI and return the hosted reference
    #[instrument(skip(self, source))]
    pub async fn upload(&self, source: &str, folder: &str) -> ShopResult<ImageRef> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(folder, &timestamp);

        let url = format!(
            "{}/v1_1/{}/image/upload",
            self.config.base_url, self.config.cloud_name
        );

        let form = [
            ("file", source),
            ("api_key", self.config.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("folder", folder),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ShopError::Gateway {
                message: format!("asset upload failed: HTTP {}: {}", status, body),
            });
        }

        let uploaded: UploadResponse = serde_json::from_str(&body).map_err(|e| {
            ShopError::Serialization(format!("Failed to parse upload response: {}", e))
        })?;

        info!("Uploaded asset: {}", uploaded.public_id);

        Ok(ImageRef {
            url: uploaded.secure_url,
            asset_id: Some(uploaded.public_id),
        })
    }

    /// SHA-256 upload signature over the sorted parameter string
    fn sign(&self, folder: &str, timestamp: &str) -> String {
        let to_sign = format!(
            "folder={}&timestamp={}{}",
            folder, timestamp, self.config.api_secret
        );
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// True when an image source is an inline payload that needs uploading
pub fn is_inline_source(source: &str) -> bool {
    source.starts_with("data:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> AssetConfig {
        AssetConfig {
            cloud_name: "hatrack".to_string(),
            api_key: "key123".to_string(),
            api_secret: "secret456".to_string(),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_signature_is_hex_and_deterministic() {
        let client = AssetClient::new(test_config("http://unused"));
        let a = client.sign("products", "1700000000");
        let b = client.sign("products", "1700000000");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

        // Different inputs change the signature
        assert_ne!(a, client.sign("products", "1700000001"));
    }

    #[test]
    fn test_inline_source_detection() {
        assert!(is_inline_source("data:image/png;base64,iVBOR"));
        assert!(!is_inline_source("https://cdn.example.com/cap.png"));
    }

    #[tokio::test]
    async fn test_upload_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/hatrack/image/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.example.com/hatrack/cap.png",
                "public_id": "hatrack/cap"
            })))
            .mount(&server)
            .await;

        let client = AssetClient::new(test_config(&server.uri()));
        let image = client
            .upload("data:image/png;base64,iVBOR", "products")
            .await
            .unwrap();

        assert_eq!(image.url, "https://res.example.com/hatrack/cap.png");
        assert_eq!(image.asset_id.as_deref(), Some("hatrack/cap"));
    }

    #[tokio::test]
    async fn test_upload_failure_is_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/hatrack/image/upload"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid signature"))
            .mount(&server)
            .await;

        let client = AssetClient::new(test_config(&server.uri()));
        let err = client
            .upload("data:image/png;base64,iVBOR", "products")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Gateway { .. }));
    }
}
