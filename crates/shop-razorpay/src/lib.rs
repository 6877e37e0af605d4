//! # shop-razorpay
//!
//! Razorpay gateway integration for the hatrack storefront.
//!
//! This crate provides:
//!
//! 1. **RazorpayClient** - Orders REST API
//!    - Opens a gateway order per checkout attempt
//!    - Round-trips the internal order id through gateway notes
//!
//! 2. **Webhook utilities** - notification handling
//!    - HMAC-SHA256 signature verification over the raw body
//!    - Payload parsing and order-reference resolution
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_razorpay::RazorpayClient;
//!
//! // Create client from environment
//! let gateway = RazorpayClient::from_env()?;
//!
//! // Open a gateway order for a checkout attempt
//! let gw_order = gateway.create_order(order.amount, &order.receipt, order.id).await?;
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use shop_razorpay::webhook::{parse_event, verify_signature, EventKind};
//!
//! // In your webhook endpoint:
//! verify_signature(gateway.webhook_secret(), &body, signature)?;
//! let event = parse_event(&body)?;
//!
//! if event.kind == EventKind::PaymentCaptured {
//!     // mark the matching order paid
//! }
//! ```

pub mod client;
pub mod config;
pub mod webhook;

// Re-exports
pub use client::{GatewayOrder, RazorpayClient};
pub use config::RazorpayConfig;
pub use webhook::{
    compute_hmac_sha256, parse_event, verify_signature, EventKind, GatewayEvent, PaymentEntity,
    SIGNATURE_HEADER,
};
