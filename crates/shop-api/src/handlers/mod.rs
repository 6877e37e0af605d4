//! # Request Handlers
//!
//! Axum request handlers, one module per resource. Session gating happens
//! through the `AuthSession`/`AdminSession` extractors; handlers only see
//! verified callers.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod users;

use axum::response::IntoResponse;
use axum::Json;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hatrack",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
