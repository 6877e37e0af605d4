//! # Storefront Error Types
//!
//! Typed error handling for the hatrack storefront.
//! All fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Missing or malformed bearer credential
    #[error("Authorization required")]
    Unauthorized,

    /// Session token failed signature or expiry checks
    #[error("Invalid or expired session token")]
    InvalidToken,

    /// Login failed. Deliberately does not say whether the email or the
    /// password was wrong (no account enumeration).
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Caller's role does not permit the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Entity lookup came up empty
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// Email already registered
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// Product slug collision
    #[error("A product with this name already exists")]
    DuplicateSlug,

    /// Webhook signature verification failed
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Webhook payload could not be parsed after verification
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Payment gateway API error
    #[error("Gateway error: {message}")]
    Gateway { message: String },

    /// Network/HTTP error reaching an external service
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration errors (missing env vars, invalid keys)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store failure
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Unauthorized => 401,
            ShopError::InvalidToken => 401,
            ShopError::InvalidCredentials => 400,
            ShopError::Forbidden(_) => 403,
            ShopError::NotFound { .. } => 404,
            ShopError::DuplicateEmail => 400,
            ShopError::DuplicateSlug => 400,
            ShopError::InvalidSignature => 400,
            ShopError::InvalidRequest(_) => 400,
            ShopError::WebhookParse(_) => 500,
            ShopError::Gateway { .. } => 502,
            ShopError::Network(_) => 503,
            ShopError::Configuration(_) => 500,
            ShopError::Database(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }

    /// Returns true if the public message should be replaced with a
    /// generic one before it reaches a client
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// Shorthand for a `NotFound` error
    pub fn not_found(entity: impl Into<String>) -> Self {
        ShopError::NotFound {
            entity: entity.into(),
        }
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
